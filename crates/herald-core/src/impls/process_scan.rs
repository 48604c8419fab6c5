//! ProcessModuleScan - 実行中プロセスのマップ済みモジュールを列挙
//!
//! # 実装詳細
//! 1. `/proc/self/maps` を読み、ファイルに裏付けられたマッピングのパスを集める
//! 2. 重複を除く（1 ファイルが複数セグメントにマップされる）
//! 3. 各パスを `ModuleInspector` で解釈する。manifest のないものは `LoadedModule::Native`、
//!    manifest が読めない/壊れているものは `warn!` を出して一覧から外す
//!
//! マップファイルが読めないホスト（Linux 以外など）では空の一覧を返します。

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::manifest::{InspectError, ManifestInspector, ModuleInspector};
use crate::ports::{LoadedModule, ModuleCatalog};

pub const DEFAULT_MAPS_PATH: &str = "/proc/self/maps";

pub struct ProcessModuleScan {
    maps_path: PathBuf,
    inspector: Box<dyn ModuleInspector>,
}

impl ProcessModuleScan {
    pub fn new(maps_path: impl Into<PathBuf>, inspector: impl ModuleInspector + 'static) -> Self {
        Self {
            maps_path: maps_path.into(),
            inspector: Box::new(inspector),
        }
    }

    pub fn maps_path(&self) -> &Path {
        &self.maps_path
    }

    fn mapped_paths(&self) -> Vec<PathBuf> {
        match std::fs::read_to_string(&self.maps_path) {
            Ok(content) => parse_mapped_paths(&content),
            Err(e) => {
                tracing::warn!(
                    maps_path = %self.maps_path.display(),
                    error = %e,
                    "cannot read process memory map; module scan is empty"
                );
                Vec::new()
            }
        }
    }
}

impl Default for ProcessModuleScan {
    fn default() -> Self {
        Self::new(DEFAULT_MAPS_PATH, ManifestInspector::default())
    }
}

impl ModuleCatalog for ProcessModuleScan {
    fn loaded_modules(&self) -> Vec<LoadedModule> {
        self.mapped_paths()
            .into_iter()
            .filter_map(|path| match self.inspector.inspect(&path) {
                Ok(module) => Some(LoadedModule::Typed(module)),
                Err(e @ InspectError::NotTyped { .. }) => {
                    tracing::debug!(path = %path.display(), reason = %e, "skipping native module");
                    Some(LoadedModule::Native {
                        path,
                        reason: e.to_string(),
                    })
                }
                // manifest はあるが読めない/壊れている。ネイティブではなく障害
                Err(e @ (InspectError::Io { .. } | InspectError::InvalidManifest { .. })) => {
                    tracing::warn!(
                        module_path = %path.display(),
                        error = %e,
                        "type manifest is unusable; module excluded from scan"
                    );
                    None
                }
            })
            .collect()
    }
}

/// maps の各行から pathname 列を取り出す
///
/// 行の形式: `address perms offset dev inode pathname`。
/// pathname は空白を含みうるので、先頭 5 列を読み飛ばした残り全体を使う。
/// `[heap]` などの疑似エントリと匿名マッピングは除外。
pub fn parse_mapped_paths(content: &str) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    content
        .lines()
        .filter_map(pathname_column)
        .filter(|path| path.starts_with('/'))
        .map(|path| path.strip_suffix(" (deleted)").unwrap_or(path))
        .filter(|path| seen.insert(path.to_string()))
        .map(PathBuf::from)
        .collect()
}

fn pathname_column(line: &str) -> Option<&str> {
    let mut rest = line;
    for _ in 0..5 {
        rest = rest.trim_start();
        let end = rest.find(char::is_whitespace)?;
        rest = &rest[end..];
    }
    let path = rest.trim();
    (!path.is_empty()).then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::find_module;
    use std::io::Write;

    const MAPS: &str = "\
55d0c0a00000-55d0c0a02000 r--p 00000000 fd:01 1048602                    /usr/bin/herald
55d0c0a02000-55d0c0a06000 r-xp 00002000 fd:01 1048602                    /usr/bin/herald
55d0c1e1e000-55d0c1e3f000 rw-p 00000000 00:00 0                          [heap]
7f2a3c000000-7f2a3c021000 rw-p 00000000 00:00 0
7f2a3d200000-7f2a3d228000 r--p 00000000 fd:01 1050218                    /usr/lib/x86_64-linux-gnu/libc.so.6
7f2a3d400000-7f2a3d401000 r--p 00000000 fd:01 1050300                    /opt/my plugins/libacme.so
7f2a3d500000-7f2a3d501000 r--p 00000000 fd:01 1050301                    /tmp/libold.so (deleted)
7ffd1b5f0000-7ffd1b611000 rw-p 00000000 00:00 0                          [stack]
";

    #[test]
    fn parses_distinct_file_backed_paths() {
        let paths = parse_mapped_paths(MAPS);
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/usr/bin/herald"),
                PathBuf::from("/usr/lib/x86_64-linux-gnu/libc.so.6"),
                PathBuf::from("/opt/my plugins/libacme.so"),
                PathBuf::from("/tmp/libold.so"),
            ]
        );
    }

    #[test]
    fn scan_marks_modules_without_manifest_as_native() {
        let dir = tempfile::tempdir().unwrap();
        let typed = dir.path().join("libbilling.so");
        let native = dir.path().join("libz.so.1");
        std::fs::write(
            dir.path().join("libbilling.so.types.json"),
            r#"{ "module": "Acme.Billing", "types": ["Acme.Billing.OrderPlaced"] }"#,
        )
        .unwrap();

        let maps_path = dir.path().join("maps");
        let mut maps = std::fs::File::create(&maps_path).unwrap();
        for path in [&typed, &native] {
            writeln!(
                maps,
                "7f2a3d400000-7f2a3d401000 r--p 00000000 fd:01 1050300 {}",
                path.display()
            )
            .unwrap();
        }

        let scan = ProcessModuleScan::new(&maps_path, ManifestInspector::default());
        let modules = scan.loaded_modules();
        assert_eq!(modules.len(), 2);
        assert!(modules[0].is_inspectable());
        assert!(!modules[1].is_inspectable());

        let billing = find_module(&modules, "Acme.Billing").unwrap();
        assert!(billing.get_type("Acme.Billing.OrderPlaced").is_some());
    }

    #[test]
    fn corrupt_manifest_is_excluded_from_scan() {
        let dir = tempfile::tempdir().unwrap();
        let plugin = dir.path().join("libplugin.so");
        let native = dir.path().join("libz.so.1");
        // 途中で切れた JSON
        std::fs::write(
            dir.path().join("libplugin.so.types.json"),
            r#"{ "module": "Plugin", "types": ["Plugin.Event"] "#,
        )
        .unwrap();

        let maps_path = dir.path().join("maps");
        let mut maps = std::fs::File::create(&maps_path).unwrap();
        for path in [&plugin, &native] {
            writeln!(
                maps,
                "7f2a3d400000-7f2a3d401000 r--p 00000000 fd:01 1050300 {}",
                path.display()
            )
            .unwrap();
        }

        let scan = ProcessModuleScan::new(&maps_path, ManifestInspector::default());
        assert_eq!(scan.maps_path(), maps_path.as_path());

        let modules = scan.loaded_modules();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].display_name(), native.display().to_string());
        assert!(!modules[0].is_inspectable());
        assert!(find_module(&modules, "Plugin").is_none());
    }

    #[test]
    fn unreadable_map_yields_empty_scan() {
        let dir = tempfile::tempdir().unwrap();
        let scan = ProcessModuleScan::new(dir.path().join("missing"), ManifestInspector::default());
        assert!(scan.loaded_modules().is_empty());
    }
}
