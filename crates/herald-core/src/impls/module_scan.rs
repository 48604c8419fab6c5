//! ModuleScan - モジュール列挙の戦略を構築時に選ぶ
//!
//! コンパイル時の分岐ではなく、1 つの `ModuleCatalog` に 2 つの実装を持たせます。

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::module_registry::ModuleRegistry;
use super::process_scan::ProcessModuleScan;
use crate::ports::{LoadedModule, ModuleCatalog};

/// 設定で指定する列挙戦略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStrategy {
    /// アプリケーション全体のレジストリを列挙
    #[default]
    Registry,
    /// プロセスのマップ済みモジュールを列挙
    Process,
}

pub enum ModuleScan {
    Registry(Arc<ModuleRegistry>),
    Process(ProcessModuleScan),
}

impl ModuleScan {
    pub fn strategy(&self) -> ScanStrategy {
        match self {
            Self::Registry(_) => ScanStrategy::Registry,
            Self::Process(_) => ScanStrategy::Process,
        }
    }
}

impl ModuleCatalog for ModuleScan {
    fn loaded_modules(&self) -> Vec<LoadedModule> {
        match self {
            Self::Registry(registry) => registry.loaded_modules(),
            Self::Process(scan) => scan.loaded_modules(),
        }
    }
}
