//! Ports - ホストランタイムとキャッシュの抽象化
//!
//! codec のロジックを実際のロード済みモジュールから切り離し、
//! fake レジストリでテストできるようにします。
//!
//! # ポート
//! - **TypeResolver**: 修飾名による直接解決（fast path）
//! - **ModuleCatalog**: ロード済みモジュールの列挙（fallback path）
//! - **MemoStore**: codec が所有する並行キャッシュ

pub mod memo_store;
pub mod module_catalog;
pub mod type_resolver;

#[cfg(test)]
pub(crate) mod fakes;

pub use self::memo_store::MemoStore;
pub use self::module_catalog::{LoadedModule, ModuleCatalog, TypedModule, find_module};
pub use self::type_resolver::TypeResolver;
