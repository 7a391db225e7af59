use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use tables_client::seed::{
    seed, source_for, BUNDLED_100, BUNDLED_1K, DATA_FILE_100, DATA_FILE_1K,
};
use tables_client::{FileSource, MemorySource, SeedError};
use tables_core::{Row, RowId, StoreError};
use tables_test_utils::sequential_rows;

fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[tokio::test]
async fn test_bundled_files_seed_exact_tables() {
    for (size, file) in [(100, DATA_FILE_100), (1000, DATA_FILE_1K)] {
        let store = seed(&FileSource::new(data_dir().join(file)), size)
            .await
            .unwrap();
        assert_eq!(store.len(), size);

        let mut ids = store.ids();
        ids.sort();
        let expected: Vec<RowId> = (0..u32::try_from(size).unwrap()).map(RowId).collect();
        assert_eq!(ids, expected);
        assert!(store.rows().iter().all(|row| !row.name.is_empty()));
    }
}

#[tokio::test]
async fn test_source_for_bundled_sizes_reads_data_dir() {
    let source = source_for(100, Some(&data_dir())).unwrap();
    let store = seed(&source, 100).await.unwrap();
    assert_eq!(store.len(), 100);
}

#[tokio::test]
async fn test_embedded_datasets_seed_without_any_files() {
    let cwd_independent = [(100, source_for(100, None)), (1000, source_for(1000, None))];
    for (size, source) in cwd_independent {
        let store = seed(&source.unwrap(), size).await.unwrap();
        assert_eq!(store.len(), size);
    }
}

#[tokio::test]
async fn test_embedded_copies_match_files_on_disk() {
    for (file, bundled) in [(DATA_FILE_100, BUNDLED_100), (DATA_FILE_1K, BUNDLED_1K)] {
        let on_disk = std::fs::read_to_string(data_dir().join(file)).unwrap();
        assert_eq!(on_disk, bundled, "{file}");
    }
}

#[tokio::test]
async fn test_wrong_row_count_is_rejected() {
    let source = MemorySource::new(sequential_rows(10));
    let err = seed(&source, 12).await.unwrap_err();
    assert!(matches!(
        err,
        SeedError::SizeMismatch {
            expected: 12,
            actual: 10
        }
    ));
}

#[tokio::test]
async fn test_bad_id_sets_are_rejected() {
    let duplicate = vec![
        Row::new(0u32, 1, "A A"),
        Row::new(1u32, 2, "B B"),
        Row::new(1u32, 3, "C C"),
    ];
    let err = seed(&MemorySource::new(duplicate), 3).await.unwrap_err();
    assert!(matches!(
        err,
        SeedError::Store(StoreError::DuplicateId(RowId(1)))
    ));

    let gap = vec![Row::new(0u32, 1, "A A"), Row::new(5u32, 2, "B B")];
    let err = seed(&MemorySource::new(gap), 2).await.unwrap_err();
    assert!(matches!(err, SeedError::Store(_)));
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DATA_FILE_100);
    let err = seed(&FileSource::new(&path), 100).await.unwrap_err();
    assert!(matches!(err, SeedError::Io { path: p, .. } if p == path));
}

#[tokio::test]
async fn test_malformed_file_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rows.json");
    std::fs::write(&path, r#"[{"id": 0, "value": "high"}]"#).unwrap();

    let err = seed(&FileSource::new(&path), 1).await.unwrap_err();
    assert!(matches!(err, SeedError::Parse(_)));
}

#[tokio::test]
async fn test_file_rows_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rows.json");
    let rows = sequential_rows(5);
    std::fs::write(&path, serde_json::to_vec(&rows).unwrap()).unwrap();

    let store = seed(&FileSource::new(&path), 5).await.unwrap();
    let loaded: Vec<Row> = store.rows().iter().map(|row| (**row).clone()).collect();
    assert_eq!(loaded, rows);
}
