//! ManifestInspector - マップ済みファイルを型付きモジュールとして解釈する
//!
//! 共有ライブラリ自体には型情報がないため、隣に置いた manifest
//! （`<file>.types.json`）を読みます。manifest がなければネイティブ扱い。
//!
//! ```json
//! { "module": "Acme.Billing", "types": ["Acme.Billing.OrderPlaced"] }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::domain::TypeDescriptor;
use crate::ports::TypedModule;

pub const DEFAULT_MANIFEST_SUFFIX: &str = ".types.json";

/// ファイルを型付きモジュールとして解釈できなかった理由
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("{} has no type manifest", .path.display())]
    NotTyped { path: PathBuf },

    #[error("failed to read manifest {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest {}: {source}", .path.display())]
    InvalidManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// ModuleInspector はファイルパスから TypedModule を得る
pub trait ModuleInspector: Send + Sync {
    fn inspect(&self, path: &Path) -> Result<Arc<dyn TypedModule>, InspectError>;
}

/// manifest ファイルの中身
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeManifest {
    pub module: String,
    #[serde(default)]
    pub types: BTreeSet<String>,
}

/// manifest から作られたモジュール
#[derive(Debug)]
pub struct ManifestModule {
    manifest: TypeManifest,
}

impl TypedModule for ManifestModule {
    fn name(&self) -> &str {
        &self.manifest.module
    }

    fn get_type(&self, full_name: &str) -> Option<TypeDescriptor> {
        self.manifest
            .types
            .contains(full_name)
            .then(|| TypeDescriptor::new(full_name, self.manifest.module.as_str()))
    }
}

#[derive(Debug, Clone)]
pub struct ManifestInspector {
    suffix: String,
}

impl ManifestInspector {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    pub fn manifest_path(&self, path: &Path) -> PathBuf {
        let mut manifest = OsString::from(path.as_os_str());
        manifest.push(&self.suffix);
        PathBuf::from(manifest)
    }
}

impl Default for ManifestInspector {
    fn default() -> Self {
        Self::new(DEFAULT_MANIFEST_SUFFIX)
    }
}

impl ModuleInspector for ManifestInspector {
    fn inspect(&self, path: &Path) -> Result<Arc<dyn TypedModule>, InspectError> {
        let manifest_path = self.manifest_path(path);
        let bytes = match std::fs::read(&manifest_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(InspectError::NotTyped {
                    path: path.to_path_buf(),
                });
            }
            Err(source) => {
                return Err(InspectError::Io {
                    path: manifest_path,
                    source,
                });
            }
        };
        let manifest: TypeManifest =
            serde_json::from_slice(&bytes).map_err(|source| InspectError::InvalidManifest {
                path: manifest_path,
                source,
            })?;
        Ok(Arc::new(ManifestModule { manifest }))
    }
}
