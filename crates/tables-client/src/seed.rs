//! Seed sources
//!
//! The table is seeded from one of the bundled datasets for 100 and 1000 rows,
//! and from the randomuser.me name service for any other size. The bundled
//! datasets are compiled in; a data directory holding files of the same name
//! overrides them. Service rows are synthesized as
//! `{id: i, value: i, name: "<first> <last>"}`.
//!
//! Whatever the source, [`seed`] checks that exactly the requested number of
//! rows came back and that their ids are `0..size` before building the store.

use crate::error::SeedError;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tables_core::{Row, RowStore};

/// Bundled dataset for 100 rows
pub const DATA_FILE_100: &str = "data100.json";

/// Bundled dataset for 1000 rows
pub const DATA_FILE_1K: &str = "data1k.json";

/// Compiled-in copy of [`DATA_FILE_100`]
pub const BUNDLED_100: &str = include_str!("../data/data100.json");

/// Compiled-in copy of [`DATA_FILE_1K`]
pub const BUNDLED_1K: &str = include_str!("../data/data1k.json");

/// Name-lookup service; `results=<size>` is appended per request
pub const NAME_SERVICE_URL: &str = "https://randomuser.me/api/?inc=name";

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can produce seed rows
#[async_trait]
pub trait SeedSource: Send + Sync {
    /// Fetch rows for a table of `size`
    ///
    /// Sources may return a different count; [`seed`] rejects that.
    async fn fetch(&self, size: usize) -> Result<Vec<Row>, SeedError>;

    /// Human-readable origin, for logs
    fn describe(&self) -> String;
}

#[async_trait]
impl<T: SeedSource + ?Sized> SeedSource for Box<T> {
    async fn fetch(&self, size: usize) -> Result<Vec<Row>, SeedError> {
        (**self).fetch(size).await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// JSON array of rows on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Source reading `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File this source reads
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SeedSource for FileSource {
    async fn fetch(&self, _size: usize) -> Result<Vec<Row>, SeedError> {
        let raw = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SeedError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(serde_json::from_slice(&raw)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Dataset compiled into the binary
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedSource {
    name: &'static str,
    json: &'static str,
}

impl EmbeddedSource {
    /// Source over a JSON array of rows
    #[must_use]
    pub const fn new(name: &'static str, json: &'static str) -> Self {
        Self { name, json }
    }
}

#[async_trait]
impl SeedSource for EmbeddedSource {
    async fn fetch(&self, _size: usize) -> Result<Vec<Row>, SeedError> {
        Ok(serde_json::from_str(self.json)?)
    }

    fn describe(&self) -> String {
        format!("bundled {}", self.name)
    }
}

/// randomuser.me name lookup
#[derive(Debug, Clone)]
pub struct NameServiceSource {
    client: reqwest::Client,
    base_url: String,
}

impl NameServiceSource {
    /// Source against the public service
    ///
    /// # Errors
    /// If the HTTP client cannot be built
    pub fn new() -> Result<Self, SeedError> {
        Self::with_base_url(NAME_SERVICE_URL)
    }

    /// Source against another endpoint with the same response shape
    ///
    /// # Errors
    /// If the HTTP client cannot be built
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, SeedError> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(concat!("tables-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Request URL for `size` names
    ///
    /// # Errors
    /// If the base URL does not parse
    pub fn request_url(&self, size: usize) -> Result<url::Url, SeedError> {
        let mut url = url::Url::parse(&self.base_url)?;
        url.query_pairs_mut()
            .append_pair("results", &size.to_string());
        Ok(url)
    }
}

#[async_trait]
impl SeedSource for NameServiceSource {
    async fn fetch(&self, size: usize) -> Result<Vec<Row>, SeedError> {
        let url = self.request_url(size)?;
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        rows_from_name_service(&body)
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// Rows already in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: Vec<Row>,
}

impl MemorySource {
    /// Source returning a copy of `rows` on every fetch
    #[must_use]
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl SeedSource for MemorySource {
    async fn fetch(&self, _size: usize) -> Result<Vec<Row>, SeedError> {
        Ok(self.rows.clone())
    }

    fn describe(&self) -> String {
        format!("memory ({} rows)", self.rows.len())
    }
}

#[derive(Debug, Deserialize)]
struct NameServiceResponse {
    results: Vec<Person>,
}

#[derive(Debug, Deserialize)]
struct Person {
    name: PersonName,
}

#[derive(Debug, Deserialize)]
struct PersonName {
    first: String,
    last: String,
}

/// Turn a name-service response into rows with `id == value == position`
///
/// # Errors
/// `SeedError::Parse` if the body lacks `results[].name.first/last`
pub fn rows_from_name_service(body: &str) -> Result<Vec<Row>, SeedError> {
    let response: NameServiceResponse = serde_json::from_str(body)?;
    Ok(response
        .results
        .into_iter()
        .zip(0u32..)
        .map(|(person, id)| {
            Row::new(
                id,
                i64::from(id),
                format!("{} {}", person.name.first, person.name.last),
            )
        })
        .collect())
}

/// Pick the source for a table of `size` rows
///
/// Sizes 100 and 1000 read `data_dir` when given, the compiled-in datasets
/// otherwise.
///
/// # Errors
/// If the name-service client cannot be built
pub fn source_for(size: usize, data_dir: Option<&Path>) -> Result<Box<dyn SeedSource>, SeedError> {
    let bundled = match size {
        100 => Some((DATA_FILE_100, BUNDLED_100)),
        1000 => Some((DATA_FILE_1K, BUNDLED_1K)),
        _ => None,
    };

    Ok(match (bundled, data_dir) {
        (Some((file, _)), Some(dir)) => Box::new(FileSource::new(dir.join(file))),
        (Some((file, json)), None) => Box::new(EmbeddedSource::new(file, json)),
        (None, _) => Box::new(NameServiceSource::new()?),
    })
}

/// Fetch and validate exactly `size` rows
///
/// # Errors
/// Any fetch error, `SeedError::SizeMismatch` for a wrong row count, and
/// `SeedError::Store` if the ids are not exactly `0..size`
pub async fn seed<S>(source: &S, size: usize) -> Result<RowStore, SeedError>
where
    S: SeedSource + ?Sized,
{
    tracing::info!("Seeding {} rows from {}", size, source.describe());

    let rows = match source.fetch(size).await {
        Ok(rows) => rows,
        Err(err) => {
            tracing::error!("Seed fetch from {} failed: {}", source.describe(), err);
            return Err(err);
        }
    };

    if rows.len() != size {
        tracing::error!("Seed returned {} rows, expected {}", rows.len(), size);
        return Err(SeedError::SizeMismatch {
            expected: size,
            actual: rows.len(),
        });
    }

    let store = RowStore::from_rows(rows).inspect_err(|err| {
        tracing::error!("Seed rows rejected: {}", err);
    })?;
    tracing::info!("Seeded {} rows", store.len());
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVICE_BODY: &str = r#"{
        "results": [
            {"name": {"title": "Ms", "first": "Ada", "last": "Lovelace"}},
            {"name": {"title": "Mr", "first": "Alan", "last": "Turing"}},
            {"name": {"title": "Ms", "first": "Grace", "last": "Hopper"}}
        ],
        "info": {"seed": "abc", "results": 3, "page": 1, "version": "1.4"}
    }"#;

    #[test]
    fn service_rows_use_position_for_id_and_value() {
        let rows = rows_from_name_service(SERVICE_BODY).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], Row::new(0u32, 0, "Ada Lovelace"));
        assert_eq!(rows[2], Row::new(2u32, 2, "Grace Hopper"));
    }

    #[test]
    fn service_body_without_names_is_a_parse_error() {
        let err = rows_from_name_service(r#"{"results": [{"email": "x@y"}]}"#).unwrap_err();
        assert!(matches!(err, SeedError::Parse(_)));

        let err = rows_from_name_service("<html>").unwrap_err();
        assert!(matches!(err, SeedError::Parse(_)));
    }

    #[test]
    fn request_url_carries_the_size() {
        let source = NameServiceSource::new().unwrap();
        let url = source.request_url(250).unwrap();
        assert_eq!(url.host_str(), Some("randomuser.me"));
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("inc".into(), "name".into())));
        assert!(pairs.contains(&("results".into(), "250".into())));
    }

    #[test]
    fn bundled_sizes_use_embedded_data_by_default() {
        assert_eq!(source_for(100, None).unwrap().describe(), "bundled data100.json");
        assert_eq!(source_for(1000, None).unwrap().describe(), "bundled data1k.json");
        assert_eq!(source_for(42, None).unwrap().describe(), NAME_SERVICE_URL);
    }

    #[test]
    fn data_dir_overrides_embedded_data() {
        let dir = Path::new("data");
        assert_eq!(
            source_for(100, Some(dir)).unwrap().describe(),
            dir.join(DATA_FILE_100).display().to_string()
        );
        assert_eq!(
            source_for(1000, Some(dir)).unwrap().describe(),
            dir.join(DATA_FILE_1K).display().to_string()
        );
        assert_eq!(source_for(42, Some(dir)).unwrap().describe(), NAME_SERVICE_URL);
    }
}
