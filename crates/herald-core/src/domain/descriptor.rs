//! TypeDescriptor - ホストランタイム上の型ハンドル
//!
//! # 学習ポイント
//! - `Arc<str>` による安価な clone（キャッシュのキー/値として頻繁に複製される）
//! - derive(Hash, Eq) で HashMap/DashMap のキーにする

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// TypeDescriptor は (完全修飾名, 定義モジュールの短縮名) で識別される型ハンドル
///
/// ホストランタイム（`ModuleRegistry` や `TypedModule` 実装）が所有します。
/// codec はこれを生成せず、lookup の結果として受け取るだけです。
///
/// # 例
/// ```ignore
/// let ty = TypeDescriptor::new("Acme.Billing.OrderPlaced", "Acme.Billing");
/// assert_eq!(ty.full_name(), "Acme.Billing.OrderPlaced");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDescriptor {
    full_name: Arc<str>,
    module: Arc<str>,
}

impl TypeDescriptor {
    pub fn new(full_name: impl Into<Arc<str>>, module: impl Into<Arc<str>>) -> Self {
        Self {
            full_name: full_name.into(),
            module: module.into(),
        }
    }

    /// 名前空間付きの型名（`.` 区切り）
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// 定義モジュールの短縮名
    pub fn module(&self) -> &str {
        &self.module
    }

    /// 名前空間を除いた型名（例: `Acme.Billing.OrderPlaced` → `OrderPlaced`）
    pub fn name(&self) -> &str {
        self.full_name
            .rsplit_once('.')
            .map_or(&self.full_name, |(_, name)| name)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.full_name, self.module)
    }
}
