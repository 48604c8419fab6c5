//! CodecBuilder - codec の構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - 設定からの戦略選択（ModuleScan の 2 つの実装）

use std::sync::Arc;

use super::config::CodecConfig;
use crate::codec::TypeNameCodec;
use crate::domain::{TypeDescriptor, TypeToken};
use crate::impls::{
    DashMapStore, ManifestInspector, ModuleRegistry, ModuleScan, ProcessModuleScan, ScanStrategy,
};
use crate::ports::{MemoStore, ModuleCatalog, TypeResolver};

/// CodecBuilder は TypeNameCodec を構築
///
/// # 使用例
/// ```ignore
/// let codec = CodecBuilder::new()
///     .resolver(registry.clone())
///     .catalog(ModuleScan::Registry(registry))
///     .build()?;
/// ```
///
/// # Fail-fast 設計
/// - resolver と catalog は必須。欠けていれば build() が BuildError を返す
/// - キャッシュは省略すると DashMapStore
#[derive(Default)]
pub struct CodecBuilder {
    resolver: Option<Box<dyn TypeResolver>>,
    catalog: Option<Box<dyn ModuleCatalog>>,
    encoded: Option<Box<dyn MemoStore<TypeDescriptor, TypeToken>>>,
    decoded: Option<Box<dyn MemoStore<String, TypeDescriptor>>>,
}

/// BuildError は codec 構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no TypeResolver configured. Call CodecBuilder::resolver() before build().")]
    MissingResolver,

    #[error("no ModuleCatalog configured. Call CodecBuilder::catalog() before build().")]
    MissingCatalog,
}

impl CodecBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// レジストリと設定から resolver/catalog を決める
    pub fn from_config(config: &CodecConfig, registry: Arc<ModuleRegistry>) -> Self {
        let catalog = match config.scan {
            ScanStrategy::Registry => ModuleScan::Registry(registry.clone()),
            ScanStrategy::Process => ModuleScan::Process(ProcessModuleScan::new(
                config.maps_path.clone(),
                ManifestInspector::new(config.manifest_suffix.clone()),
            )),
        };
        tracing::debug!(scan = ?catalog.strategy(), "module scan strategy selected");
        Self::new().resolver(registry).catalog(catalog)
    }

    pub fn resolver(mut self, resolver: impl TypeResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    pub fn catalog(mut self, catalog: impl ModuleCatalog + 'static) -> Self {
        self.catalog = Some(Box::new(catalog));
        self
    }

    /// 型 → トークンのキャッシュを差し替える
    pub fn encode_cache(
        mut self,
        store: impl MemoStore<TypeDescriptor, TypeToken> + 'static,
    ) -> Self {
        self.encoded = Some(Box::new(store));
        self
    }

    /// トークン → 型のキャッシュを差し替える
    pub fn decode_cache(mut self, store: impl MemoStore<String, TypeDescriptor> + 'static) -> Self {
        self.decoded = Some(Box::new(store));
        self
    }

    pub fn build(self) -> Result<TypeNameCodec, BuildError> {
        let resolver = self.resolver.ok_or(BuildError::MissingResolver)?;
        let catalog = self.catalog.ok_or(BuildError::MissingCatalog)?;
        Ok(TypeNameCodec::with_stores(
            resolver,
            catalog,
            self.encoded
                .unwrap_or_else(|| Box::new(DashMapStore::new())),
            self.decoded
                .unwrap_or_else(|| Box::new(DashMapStore::new())),
        ))
    }
}
