//! TypeResolver port - 修飾名による型解決（fast path）
//!
//! ホストの型システムが提供する「型名 + モジュール名 → 型」の直接 lookup。
//! デフォルトのロードコンテキストで単純名解決できるモジュールだけが対象です。

use std::sync::Arc;

use crate::domain::TypeDescriptor;

/// TypeResolver はモジュール名で修飾された型名を直接解決する
///
/// # 契約
/// - 見つからなければ `None`（エラーではない）
/// - 型名・モジュール名とも大文字小文字を区別する
///
/// # Thread Safety
/// - codec は複数スレッドから呼ばれるため `Send + Sync` を要求
pub trait TypeResolver: Send + Sync {
    fn resolve(&self, full_name: &str, module: &str) -> Option<TypeDescriptor>;
}

impl<T: TypeResolver + ?Sized> TypeResolver for Arc<T> {
    fn resolve(&self, full_name: &str, module: &str) -> Option<TypeDescriptor> {
        (**self).resolve(full_name, module)
    }
}
