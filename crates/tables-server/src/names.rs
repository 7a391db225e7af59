//! Name pools for generated rows

use rand::seq::SliceRandom;
use rand::Rng;

/// First-name tokens
pub const FIRST_NAMES: &[&str] = &[
    "MARY", "PATRICIA", "LINDA", "BARBARA", "ELIZABETH", "JENNIFER", "MARIA", "SUSAN",
    "MARGARET", "DOROTHY", "LISA", "NANCY", "KAREN", "BETTY", "HELEN", "SANDRA", "DONNA",
    "CAROL", "RUTH", "SHARON", "MICHELLE", "LAURA", "SARAH", "KIMBERLY", "DEBORAH", "JESSICA",
    "JAMES", "JOHN", "ROBERT", "MICHAEL", "WILLIAM", "DAVID", "RICHARD", "CHARLES", "JOSEPH",
    "THOMAS", "CHRISTOPHER", "DANIEL", "PAUL", "MARK", "DONALD", "GEORGE", "KENNETH", "STEVEN",
    "EDWARD", "BRIAN", "RONALD", "ANTHONY", "KEVIN", "JASON", "MATTHEW", "GARY", "TIMOTHY",
    "JOSE", "LARRY", "JEFFREY", "FRANK", "SCOTT", "ERIC", "STEPHEN",
];

/// Surname tokens
pub const LAST_NAMES: &[&str] = &[
    "SMITH", "JOHNSON", "WILLIAMS", "BROWN", "JONES", "GARCIA", "MILLER", "DAVIS", "RODRIGUEZ",
    "MARTINEZ", "HERNANDEZ", "LOPEZ", "GONZALEZ", "WILSON", "ANDERSON", "THOMAS", "TAYLOR",
    "MOORE", "JACKSON", "MARTIN", "LEE", "PEREZ", "THOMPSON", "WHITE", "HARRIS", "SANCHEZ",
    "CLARK", "RAMIREZ", "LEWIS", "ROBINSON", "WALKER", "YOUNG", "ALLEN", "KING", "WRIGHT",
    "SCOTT", "TORRES", "NGUYEN", "HILL", "FLORES", "GREEN", "ADAMS", "NELSON", "BAKER", "HALL",
    "RIVERA", "CAMPBELL", "MITCHELL", "CARTER", "ROBERTS", "GOMEZ", "PHILLIPS", "EVANS",
    "TURNER", "DIAZ", "PARKER", "CRUZ", "EDWARDS", "COLLINS", "REYES",
];

/// Pair of token pools drawn from with replacement
#[derive(Debug, Clone, Copy)]
pub struct NamePool {
    first: &'static [&'static str],
    last: &'static [&'static str],
}

impl NamePool {
    /// Pool over custom token lists
    ///
    /// Returns `None` if either list is empty.
    #[must_use]
    pub fn new(first: &'static [&'static str], last: &'static [&'static str]) -> Option<Self> {
        (!first.is_empty() && !last.is_empty()).then_some(Self { first, last })
    }

    /// `"FIRST LAST"`, each half uniform over its pool
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let first = self.first.choose(rng).copied().unwrap_or_default();
        let last = self.last.choose(rng).copied().unwrap_or_default();
        format!("{first} {last}")
    }

    /// Whether `name` could have come from this pool
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        name.split_once(' ')
            .is_some_and(|(first, last)| self.first.contains(&first) && self.last.contains(&last))
    }
}

impl Default for NamePool {
    fn default() -> Self {
        Self {
            first: FIRST_NAMES,
            last: LAST_NAMES,
        }
    }
}
