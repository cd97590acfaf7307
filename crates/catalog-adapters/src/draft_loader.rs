//! File-based draft loader.
//!
//! Reads raw product drafts from JSON and TOML files, or from every such
//! file under a directory.
//!
//! # Accepted shapes
//!
//! ```text
//! lamp.json      { "name": "...", "price": 12.5, ... }
//! batch.json     [ { ... }, { ... } ]
//! lamp.toml      name = "..."  price = 12.5  [[colors]] ...
//! batch.toml     [[drafts]] name = "..."  [[drafts]] name = "..."
//! ```
//!
//! Fields are not checked here; any object is a draft. Validation happens
//! in the core.

use std::{
    fs,
    path::{Path, PathBuf},
};

use catalog_core::{
    application::{
        ApplicationError,
        ports::{DraftSource, LoadedDraft},
    },
    domain::ProductDraftInput,
    error::CatalogResult,
};
use serde_json::Value;
use tracing::{debug, instrument};
use walkdir::WalkDir;

/// Recognised draft file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftFormat {
    Json,
    Toml,
}

impl DraftFormat {
    /// Detect the format from a file extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Loads drafts from files and directories.
///
/// Directory entries are visited in file-name order so batch runs are
/// reproducible. Files with other extensions are ignored inside directories
/// but rejected when named directly.
#[derive(Debug, Clone, Default)]
pub struct DraftLoader {
    max_depth: Option<usize>,
}

impl DraftLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit how deep directories are searched (1 = direct children only).
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Load drafts from each path in turn, keeping their order.
    pub fn load_all<P: AsRef<Path>>(&self, paths: &[P]) -> CatalogResult<Vec<LoadedDraft>> {
        let mut drafts = Vec::new();
        for path in paths {
            drafts.extend(self.load(path.as_ref())?);
        }
        Ok(drafts)
    }

    #[instrument(skip(self), fields(dir = %dir.display()))]
    fn load_dir(&self, dir: &Path) -> CatalogResult<Vec<LoadedDraft>> {
        let mut walker = WalkDir::new(dir).min_depth(1).sort_by_file_name();
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut drafts = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| ApplicationError::DraftLoad {
                path: dir.to_path_buf(),
                reason: format!("directory walk error: {e}"),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(format) = DraftFormat::from_path(entry.path()) else {
                continue;
            };
            drafts.extend(self.load_file(entry.path(), format)?);
        }

        debug!(count = drafts.len(), "finished loading drafts");
        Ok(drafts)
    }

    fn load_file(&self, path: &Path, format: DraftFormat) -> CatalogResult<Vec<LoadedDraft>> {
        let raw = fs::read_to_string(path).map_err(|e| ApplicationError::DraftLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let parse_error = |reason: String| ApplicationError::DraftParse {
            path: path.to_path_buf(),
            reason,
        };

        let (value, list_key) = match format {
            DraftFormat::Json => (
                serde_json::from_str::<Value>(&raw).map_err(|e| parse_error(e.to_string()))?,
                None,
            ),
            DraftFormat::Toml => (
                toml::from_str::<Value>(&raw).map_err(|e| parse_error(e.to_string()))?,
                Some("drafts"),
            ),
        };

        let records = split_records(value, list_key).map_err(parse_error)?;
        let single = records.len() == 1 && !records[0].1;
        let origin_base = path.display().to_string();

        let drafts = records
            .into_iter()
            .enumerate()
            .map(|(i, (record, _))| {
                let input: ProductDraftInput = serde_json::from_value(Value::Object(record))
                    .map_err(|e| parse_error(format!("draft #{}: {e}", i + 1)))?;
                let origin = if single {
                    origin_base.clone()
                } else {
                    format!("{origin_base}#{}", i + 1)
                };
                Ok(LoadedDraft { origin, input })
            })
            .collect::<Result<Vec<_>, ApplicationError>>()?;

        debug!(path = %path.display(), count = drafts.len(), "loaded draft file");
        Ok(drafts)
    }
}

impl DraftSource for DraftLoader {
    fn load(&self, path: &Path) -> CatalogResult<Vec<LoadedDraft>> {
        if path.is_dir() {
            return self.load_dir(path);
        }
        if !path.exists() {
            return Err(ApplicationError::DraftLoad {
                path: path.to_path_buf(),
                reason: "no such file or directory".into(),
            }
            .into());
        }
        match DraftFormat::from_path(path) {
            Some(format) => self.load_file(path, format),
            None => Err(ApplicationError::UnsupportedFormat {
                path: PathBuf::from(path),
            }
            .into()),
        }
    }
}

type Record = serde_json::Map<String, Value>;

/// Split a parsed document into draft records. The flag marks records that
/// came from a list, so a one-element list still gets an indexed origin.
fn split_records(value: Value, list_key: Option<&str>) -> Result<Vec<(Record, bool)>, String> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match list_key.and_then(|key| map.remove(key)) {
            Some(Value::Array(items)) => items,
            Some(_) => return Err("`drafts` must be an array of tables".into()),
            None => return Ok(vec![(map, false)]),
        },
        _ => return Err("expected a draft object or a list of drafts".into()),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(map) => Ok((map, true)),
            _ => Err(format!("draft #{} is not an object", i + 1)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;

    use catalog_core::error::CatalogError;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        File::create(&path)
            .unwrap()
            .write_all(content.as_bytes())
            .unwrap();
        path
    }

    #[test]
    fn single_json_object() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "lamp.json", r#"{ "name": "Desk Lamp", "price": "12" }"#);

        let drafts = DraftLoader::new().load(&path).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].origin, path.display().to_string());
        assert_eq!(drafts[0].input.price, Some(json!("12")));
    }

    #[test]
    fn json_array_gets_indexed_origins() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "batch.json", r#"[{ "name": "A" }, { "name": "B" }]"#);

        let drafts = DraftLoader::new().load(&path).unwrap();
        let origins: Vec<_> = drafts.iter().map(|d| d.origin.clone()).collect();
        assert_eq!(
            origins,
            [
                format!("{}#1", path.display()),
                format!("{}#2", path.display())
            ]
        );
    }

    #[test]
    fn toml_single_table_with_colors() {
        let temp = TempDir::new().unwrap();
        let path = write(
            temp.path(),
            "lamp.toml",
            r#"
name = "Desk Lamp"
price = 12.5
imageURL = "lamp.png"

[[colors]]
color = "Red"
quantity = 3
"#,
        );

        let drafts = DraftLoader::new().load(&path).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].input.image_url, Some(json!("lamp.png")));
        assert_eq!(drafts[0].input.color_count(), 1);
    }

    #[test]
    fn toml_drafts_array() {
        let temp = TempDir::new().unwrap();
        let path = write(
            temp.path(),
            "batch.toml",
            r#"
[[drafts]]
name = "First Product"

[[drafts]]
name = "Second Product"
"#,
        );

        let drafts = DraftLoader::new().load(&path).unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[1].input.name, Some(json!("Second Product")));
    }

    #[test]
    fn directory_is_walked_in_name_order_skipping_other_files() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "b.json", r#"{ "name": "B" }"#);
        write(temp.path(), "a.toml", r#"name = "A""#);
        write(temp.path(), "notes.txt", "not a draft");
        write(temp.path(), "nested/c.JSON", r#"{ "name": "C" }"#);

        let drafts = DraftLoader::new().load(temp.path()).unwrap();
        let names: Vec<_> = drafts.iter().map(|d| d.input.name.clone()).collect();
        assert_eq!(names, [Some(json!("A")), Some(json!("B")), Some(json!("C"))]);

        let shallow = DraftLoader::new().max_depth(1).load(temp.path()).unwrap();
        assert_eq!(shallow.len(), 2);
    }

    #[test]
    fn missing_path_is_load_error() {
        let err = DraftLoader::new()
            .load(Path::new("/absolutely/does/not/exist.json"))
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Application(ApplicationError::DraftLoad { .. })
        ));
    }

    #[test]
    fn unsupported_extension_named_directly() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "lamp.yaml", "name: x");
        let err = DraftLoader::new().load(&path).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Application(ApplicationError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn malformed_and_non_object_drafts_are_parse_errors() {
        let temp = TempDir::new().unwrap();
        let broken = write(temp.path(), "broken.json", "{ name: ");
        let scalar = write(temp.path(), "scalar.json", r#"[{ "name": "ok" }, 42]"#);

        for path in [broken, scalar] {
            let err = DraftLoader::new().load(&path).unwrap_err();
            assert!(matches!(
                err,
                CatalogError::Application(ApplicationError::DraftParse { .. })
            ));
        }
    }

    #[test]
    fn load_all_keeps_argument_order() {
        let temp = TempDir::new().unwrap();
        let second = write(temp.path(), "z.json", r#"{ "name": "Z" }"#);
        let first = write(temp.path(), "a.json", r#"{ "name": "A" }"#);

        let drafts = DraftLoader::new().load_all(&[second, first]).unwrap();
        assert_eq!(drafts[0].input.name, Some(json!("Z")));
    }
}
