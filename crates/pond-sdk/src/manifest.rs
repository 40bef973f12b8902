//! The deployed-object manifest.
//!
//! Deployment writes a JSON map from logical names (`"package"`,
//! `"pond::Pond"`, `"duck::DuckManager"`) to object IDs. Scripts load
//! that map and look up the objects they touch by name. A missing name
//! is always a hard error; silently substituting an ID would build a
//! transaction against the wrong object.

use crate::error::{SdkError, SdkResult};
use pond_sdk_types::ObjectId;
use std::collections::BTreeMap;
use std::path::Path;

/// Environment variable overriding the manifest path.
pub const MANIFEST_PATH_ENV: &str = "POND_MANIFEST";

/// Default manifest file name, relative to the working directory.
pub const DEFAULT_MANIFEST_PATH: &str = "objects.json";

/// A name-to-ID map of deployed objects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: BTreeMap<String, ObjectId>,
}

impl Manifest {
    /// Loads a manifest from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SdkError::Manifest(format!("{}: {e}", path.display())))?;
        let raw: BTreeMap<String, String> = serde_json::from_str(&contents)
            .map_err(|e| SdkError::Manifest(format!("{}: {e}", path.display())))?;
        Self::from_raw(raw)
    }

    /// Loads from the path in `POND_MANIFEST`, or `objects.json`.
    pub fn from_env() -> SdkResult<Self> {
        let path = std::env::var(MANIFEST_PATH_ENV)
            .unwrap_or_else(|_| DEFAULT_MANIFEST_PATH.to_string());
        Self::load(path)
    }

    /// Builds a manifest from name/ID pairs.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, ObjectId)>,
    ) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    fn from_raw(raw: BTreeMap<String, String>) -> SdkResult<Self> {
        let mut entries = BTreeMap::new();
        for (name, id) in raw {
            let id = ObjectId::from_hex(&id)
                .map_err(|e| SdkError::Manifest(format!("entry {name:?}: {e}")))?;
            entries.insert(name, id);
        }
        Ok(Self { entries })
    }

    /// Looks up an object by its logical name. Unknown names fail.
    pub fn resolve(&self, name: &str) -> SdkResult<ObjectId> {
        self.entries.get(name).copied().ok_or_else(|| {
            SdkError::Manifest(format!(
                "no object named {name:?} in manifest (known: {})",
                self.entries
                    .keys()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })
    }

    /// Number of entries in the manifest.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the manifest has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
