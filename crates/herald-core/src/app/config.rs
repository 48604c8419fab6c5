//! CodecConfig - codec の構成
//!
//! 列挙戦略やプロセススキャンのパスを JSON から読めるようにします。
//! 省略したフィールドはデフォルト値になります。

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::impls::ScanStrategy;
use crate::impls::manifest::DEFAULT_MANIFEST_SUFFIX;
use crate::impls::process_scan::DEFAULT_MAPS_PATH;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// fallback 解決で使うモジュール列挙の戦略
    pub scan: ScanStrategy,

    /// `scan = "process"` のときに読むメモリマップ
    pub maps_path: PathBuf,

    /// 型 manifest のファイル名サフィックス
    pub manifest_suffix: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            scan: ScanStrategy::default(),
            maps_path: PathBuf::from(DEFAULT_MAPS_PATH),
            manifest_suffix: DEFAULT_MANIFEST_SUFFIX.to_string(),
        }
    }
}

impl CodecConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = CodecConfig::from_json_str("{}").unwrap();
        assert_eq!(config, CodecConfig::default());
        assert_eq!(config.scan, ScanStrategy::Registry);
        assert_eq!(config.maps_path, PathBuf::from("/proc/self/maps"));
    }

    #[test]
    fn overrides_are_applied() {
        let config = CodecConfig::from_json_str(
            r#"{ "scan": "process", "maps_path": "/tmp/maps", "manifest_suffix": ".meta" }"#,
        )
        .unwrap();
        assert_eq!(config.scan, ScanStrategy::Process);
        assert_eq!(config.maps_path, PathBuf::from("/tmp/maps"));
        assert_eq!(config.manifest_suffix, ".meta");
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        assert!(CodecConfig::from_json_str(r#"{ "scan": "gac" }"#).is_err());
    }
}
