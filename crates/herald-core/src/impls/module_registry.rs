//! ModuleRegistry - アプリケーション全体のモジュールレジストリ
//!
//! # 学習ポイント
//! - `parking_lot::RwLock` による読み取り優位の共有状態
//! - スナップショット（`Vec<Arc<_>>` の clone）で列挙中の変更に耐える
//! - 1 つの構造体が 2 つの port（TypeResolver, ModuleCatalog）を実装
//!
//! # ロードコンテキスト
//! - `Default`: 単純名で解決できる。fast path の対象
//! - `Isolated(name)`: プラグインなど別コンテキストでロードされたもの。
//!   fast path からは見えず、fallback の列挙でのみ見つかる

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::domain::TypeDescriptor;
use crate::ports::{LoadedModule, ModuleCatalog, TypeResolver, TypedModule};
use crate::typed::Message;

/// モジュールがロードされたコンテキスト
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadContext {
    #[default]
    Default,
    Isolated(String),
}

impl fmt::Display for LoadContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Isolated(name) => write!(f, "isolated:{name}"),
        }
    }
}

/// レジストリに載っている 1 モジュール
///
/// 型は後から追加できる（遅延ロードの表現）。
#[derive(Debug)]
pub struct RegisteredModule {
    name: Arc<str>,
    context: LoadContext,
    types: RwLock<BTreeSet<Arc<str>>>,
}

impl RegisteredModule {
    fn new(name: &str, context: LoadContext) -> Self {
        Self {
            name: name.into(),
            context,
            types: RwLock::new(BTreeSet::new()),
        }
    }

    pub fn context(&self) -> &LoadContext {
        &self.context
    }

    /// このモジュールに型を追加し、その descriptor を返す
    pub fn add_type(&self, full_name: &str) -> TypeDescriptor {
        self.types.write().insert(full_name.into());
        TypeDescriptor::new(full_name, self.name.clone())
    }

    pub fn type_names(&self) -> Vec<String> {
        self.types.read().iter().map(|t| t.to_string()).collect()
    }
}

impl TypedModule for RegisteredModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_type(&self, full_name: &str) -> Option<TypeDescriptor> {
        self.types
            .read()
            .get(full_name)
            .map(|t| TypeDescriptor::new(t.clone(), self.name.clone()))
    }
}

/// ModuleRegistry はロード済みモジュールの正本
///
/// # 使用例
/// ```ignore
/// let registry = Arc::new(ModuleRegistry::new());
/// let ty = registry.define_type("Acme.Billing.OrderPlaced", "Acme.Billing", LoadContext::Default);
/// assert_eq!(registry.resolve("Acme.Billing.OrderPlaced", "Acme.Billing"), Some(ty));
/// ```
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: RwLock<Vec<Arc<RegisteredModule>>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// モジュールをロードする。同じ (name, context) が既にあればそれを返す
    pub fn load(&self, name: &str, context: LoadContext) -> Arc<RegisteredModule> {
        let mut modules = self.modules.write();
        if let Some(existing) = modules
            .iter()
            .find(|m| &*m.name == name && m.context == context)
        {
            return existing.clone();
        }
        let module = Arc::new(RegisteredModule::new(name, context));
        tracing::debug!(module = name, context = %module.context, "module loaded");
        modules.push(module.clone());
        module
    }

    /// 必要ならモジュールをロードして型を定義する
    pub fn define_type(&self, full_name: &str, module: &str, context: LoadContext) -> TypeDescriptor {
        self.load(module, context).add_type(full_name)
    }

    /// Message 型の定義モジュールと型を登録する
    pub fn define<M: Message>(&self, context: LoadContext) -> TypeDescriptor {
        self.define_type(M::FULL_NAME, M::MODULE, context)
    }

    /// 現時点のモジュール一覧（ロード順）
    pub fn snapshot(&self) -> Vec<Arc<RegisteredModule>> {
        self.modules.read().clone()
    }
}

impl TypeResolver for ModuleRegistry {
    fn resolve(&self, full_name: &str, module: &str) -> Option<TypeDescriptor> {
        let modules = self.modules.read();
        modules
            .iter()
            .filter(|m| m.context == LoadContext::Default)
            .find(|m| &*m.name == module)
            .and_then(|m| m.get_type(full_name))
    }
}

impl ModuleCatalog for ModuleRegistry {
    fn loaded_modules(&self) -> Vec<LoadedModule> {
        self.snapshot()
            .into_iter()
            .map(|m| LoadedModule::Typed(m as Arc<dyn TypedModule>))
            .collect()
    }
}
