//! Impls - ports の具象実装
//!
//! # 実装一覧
//! - DashMapStore: codec のデフォルトキャッシュ
//! - ModuleRegistry: アプリケーション全体のモジュールレジストリ（TypeResolver + ModuleCatalog）
//! - ProcessModuleScan: `/proc/self/maps` ベースの列挙
//! - ManifestInspector: マップ済みファイルの型 manifest を読む
//! - ModuleScan: 上記 2 つの列挙戦略を切り替える

pub mod dashmap_store;
pub mod manifest;
pub mod module_registry;
pub mod module_scan;
pub mod process_scan;

pub use self::dashmap_store::DashMapStore;
pub use self::manifest::{InspectError, ManifestInspector, ModuleInspector, TypeManifest};
pub use self::module_registry::{LoadContext, ModuleRegistry, RegisteredModule};
pub use self::module_scan::{ModuleScan, ScanStrategy};
pub use self::process_scan::ProcessModuleScan;
