//! Message trait - Rust の型とワイヤ上の型識別子を対応付ける
//!
//! # 学習ポイント
//! - Associated Constants (`const FULL_NAME`, `const MODULE`)
//! - provided method で descriptor を組み立てる

use crate::domain::TypeDescriptor;

/// Message はバスに流す payload 型
///
/// # 使用例
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct OrderPlaced {
///     order_id: u64,
/// }
///
/// impl Message for OrderPlaced {
///     const FULL_NAME: &'static str = "Acme.Billing.OrderPlaced";
///     const MODULE: &'static str = "Acme.Billing";
/// }
/// ```
///
/// # 命名規約
/// - `FULL_NAME` は `.` 区切りの名前空間付き型名（Rust の `::` パスは使えない）
/// - `MODULE` は `:` を含まない
pub trait Message: Send + Sync + 'static {
    const FULL_NAME: &'static str;
    const MODULE: &'static str;

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new(Self::FULL_NAME, Self::MODULE)
    }
}

// テスト用の Message 型
#[cfg(test)]
pub(crate) struct OrderPlaced;

#[cfg(test)]
impl Message for OrderPlaced {
    const FULL_NAME: &'static str = "Acme.Billing.OrderPlaced";
    const MODULE: &'static str = "Acme.Billing";
}

#[cfg(test)]
pub(crate) struct PluginEvent;

#[cfg(test)]
impl Message for PluginEvent {
    const FULL_NAME: &'static str = "Plugin.Events.Started";
    const MODULE: &'static str = "Plugin";
}
