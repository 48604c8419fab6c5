//! Codec - 型 descriptor とワイヤ上のトークンの相互変換
//!
//! # 二方向
//! - **encode**: descriptor → token（publish 側）
//! - **decode**: token → descriptor（consume 側）。fast path + fallback scan
//!
//! 二方向はキャッシュを共有しません。共通なのはトークン形式
//! `<FullName>:<ModuleShortName>` だけです。
//!
//! # 学習ポイント
//! - グローバルなシングルトンを持たず、キャッシュをインスタンスに注入
//! - get → ロック外で計算 → insert-if-absent（重複計算は許すが結果は壊れない）

mod decode;
mod encode;

use crate::domain::{CodecError, TypeDescriptor, TypeToken};
use crate::impls::DashMapStore;
use crate::observability::{CodecCounters, CodecCounts};
use crate::ports::{MemoStore, ModuleCatalog, TypeResolver};

/// TypeNameSerializer は publish/consume 経路が使う codec の表面
pub trait TypeNameSerializer: Send + Sync {
    /// descriptor をトークンに変換する。結果はキャッシュされる
    fn serialize(&self, ty: &TypeDescriptor) -> Result<TypeToken, CodecError>;

    /// トークンを descriptor に解決する。成功だけがキャッシュされる
    fn deserialize(&self, token: &str) -> Result<TypeDescriptor, CodecError>;
}

/// TypeNameCodec は TypeNameSerializer のデフォルト実装
///
/// # 使用例
/// ```ignore
/// let registry = Arc::new(ModuleRegistry::new());
/// let codec = TypeNameCodec::new(registry.clone(), ModuleScan::Registry(registry));
///
/// let token = codec.serialize(&ty)?;
/// assert_eq!(codec.deserialize(token.as_str())?, ty);
/// ```
pub struct TypeNameCodec {
    resolver: Box<dyn TypeResolver>,
    catalog: Box<dyn ModuleCatalog>,
    encoded: Box<dyn MemoStore<TypeDescriptor, TypeToken>>,
    decoded: Box<dyn MemoStore<String, TypeDescriptor>>,
    counters: CodecCounters,
}

impl TypeNameCodec {
    /// DashMap キャッシュで codec を作成
    pub fn new(
        resolver: impl TypeResolver + 'static,
        catalog: impl ModuleCatalog + 'static,
    ) -> Self {
        Self::with_stores(
            Box::new(resolver),
            Box::new(catalog),
            Box::new(DashMapStore::new()),
            Box::new(DashMapStore::new()),
        )
    }

    pub(crate) fn with_stores(
        resolver: Box<dyn TypeResolver>,
        catalog: Box<dyn ModuleCatalog>,
        encoded: Box<dyn MemoStore<TypeDescriptor, TypeToken>>,
        decoded: Box<dyn MemoStore<String, TypeDescriptor>>,
    ) -> Self {
        Self {
            resolver,
            catalog,
            encoded,
            decoded,
            counters: CodecCounters::default(),
        }
    }

    pub fn counts(&self) -> CodecCounts {
        self.counters.snapshot()
    }

    /// キャッシュ済みの (型 → トークン) の数
    pub fn encoded_len(&self) -> usize {
        self.encoded.len()
    }

    /// キャッシュ済みの (トークン → 型) の数
    pub fn decoded_len(&self) -> usize {
        self.decoded.len()
    }
}

impl TypeNameSerializer for TypeNameCodec {
    fn serialize(&self, ty: &TypeDescriptor) -> Result<TypeToken, CodecError> {
        self.encode(ty)
    }

    fn deserialize(&self, token: &str) -> Result<TypeDescriptor, CodecError> {
        self.decode(token)
    }
}
