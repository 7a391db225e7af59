//! Random mutation generator
//!
//! One generator per ready connection, each with its own RNG. The id bound is
//! server-wide and knows nothing about the client's table size, so clients
//! must expect (and drop) ids they do not have.

use crate::names::NamePool;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::num::NonZeroU32;
use tables_core::MutationEvent;

/// Produces uniformly random mutation events
#[derive(Debug, Clone)]
pub struct MutationGenerator<R = StdRng> {
    rng: R,
    num_items: NonZeroU32,
    names: NamePool,
}

impl MutationGenerator<StdRng> {
    /// Generator with an OS-seeded RNG
    #[must_use]
    pub fn from_entropy(num_items: NonZeroU32) -> Self {
        Self::with_rng(StdRng::from_entropy(), num_items)
    }
}

impl<R: Rng> MutationGenerator<R> {
    /// Generator over a caller-supplied RNG
    #[must_use]
    pub fn with_rng(rng: R, num_items: NonZeroU32) -> Self {
        Self {
            rng,
            num_items,
            names: NamePool::default(),
        }
    }

    /// With custom name pool
    #[inline]
    #[must_use]
    pub fn with_names(mut self, names: NamePool) -> Self {
        self.names = names;
        self
    }

    /// Exclusive bound for ids and values
    #[inline]
    #[must_use]
    pub fn num_items(&self) -> NonZeroU32 {
        self.num_items
    }

    /// Draw the next event
    pub fn next_event(&mut self) -> MutationEvent {
        let bound = self.num_items.get();
        let id = self.rng.gen_range(0..bound);
        let value = self.rng.gen_range(0..bound);
        let name = self.names.pick(&mut self.rng);
        MutationEvent::new(i64::from(id), i64::from(value), name)
    }
}

impl<R: Rng> Iterator for MutationGenerator<R> {
    type Item = MutationEvent;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_event())
    }
}
