use std::fs;

use camino::Utf8Path;
use serde_json::Value;

use crate::error::StagehandError;

/// Conventional manifest file name, read by [`register`](crate::register).
pub const DEFAULT_MANIFEST: &str = "package.json";

/// Reads the project manifest as structured data.
///
/// The contents are embedded verbatim into the configuration tree under the
/// reserved manifest key and never interpreted by this crate.
pub fn read(path: impl AsRef<Utf8Path>) -> Result<Value, StagehandError> {
    let path = path.as_ref();
    tracing::debug!(%path, "reading project manifest");

    let text = fs::read_to_string(path)?;
    let value = serde_json::from_str(&text)?;

    Ok(value)
}

#[cfg(test)]
mod test {
    use camino::Utf8PathBuf;

    use super::*;

    #[test]
    fn test_read_manifest() {
        let dir = std::env::temp_dir().join("stagehand-manifest-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("package.json");
        fs::write(&path, r#"{"name": "demo", "version": "1.2.3"}"#).unwrap();

        let path = Utf8PathBuf::from_path_buf(path).unwrap();
        let value = read(&path).unwrap();
        assert_eq!(value["name"], "demo");
        assert_eq!(value["version"], "1.2.3");
    }

    #[test]
    fn test_read_missing_manifest() {
        let err = read("does-not-exist/package.json").unwrap_err();
        assert!(matches!(err, StagehandError::ManifestRead(_)));
    }

    #[test]
    fn test_read_malformed_manifest() {
        let dir = std::env::temp_dir().join("stagehand-manifest-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let path = Utf8PathBuf::from_path_buf(path).unwrap();
        let err = read(&path).unwrap_err();
        assert!(matches!(err, StagehandError::ManifestParse(_)));
    }
}
