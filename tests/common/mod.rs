use std::path::PathBuf;

/// Path of a fixture tree under `tests/data`.
pub fn test_dir(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join(name)
}
