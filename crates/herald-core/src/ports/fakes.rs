//! テスト用の fake 実装（呼び出し回数を数える）

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;

use super::{LoadedModule, ModuleCatalog, TypeResolver, TypedModule};
use crate::domain::TypeDescriptor;

#[derive(Debug)]
pub struct FakeModule {
    name: String,
    types: HashSet<String>,
    pub lookups: AtomicUsize,
}

impl FakeModule {
    pub fn new(name: &str, types: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            types: types.iter().map(|t| t.to_string()).collect(),
            lookups: AtomicUsize::new(0),
        }
    }
}

impl TypedModule for FakeModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_type(&self, full_name: &str) -> Option<TypeDescriptor> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.types
            .contains(full_name)
            .then(|| TypeDescriptor::new(full_name, self.name.as_str()))
    }
}

/// 固定の型集合を知っている resolver
#[derive(Default)]
pub struct CountingResolver {
    known: HashSet<(String, String)>,
    pub calls: AtomicUsize,
}

impl CountingResolver {
    pub fn knowing(types: &[(&str, &str)]) -> Self {
        Self {
            known: types
                .iter()
                .map(|(t, m)| (t.to_string(), m.to_string()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TypeResolver for CountingResolver {
    fn resolve(&self, full_name: &str, module: &str) -> Option<TypeDescriptor> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.known
            .contains(&(full_name.to_string(), module.to_string()))
            .then(|| TypeDescriptor::new(full_name, module))
    }
}

/// 中身を後から差し替えられる catalog
#[derive(Default)]
pub struct FakeCatalog {
    modules: RwLock<Vec<LoadedModule>>,
    pub scans: AtomicUsize,
}

impl FakeCatalog {
    pub fn with(modules: Vec<LoadedModule>) -> Self {
        Self {
            modules: RwLock::new(modules),
            scans: AtomicUsize::new(0),
        }
    }

    pub fn push(&self, module: LoadedModule) {
        self.modules.write().push(module);
    }

    pub fn push_native(&self, path: &str) {
        self.push(LoadedModule::Native {
            path: PathBuf::from(path),
            reason: "not a typed module".into(),
        });
    }

    pub fn scans(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }
}

impl ModuleCatalog for FakeCatalog {
    fn loaded_modules(&self) -> Vec<LoadedModule> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        self.modules.read().clone()
    }
}
