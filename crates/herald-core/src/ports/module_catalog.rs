//! ModuleCatalog port - ロード済みモジュールの列挙（fallback path）
//!
//! # 学習ポイント
//! - enum による「候補/非候補」の明示（例外を握りつぶす代わりに述語でフィルタ）
//! - `Arc<dyn TypedModule>` で列挙結果を安価に共有

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::TypeDescriptor;

/// TypedModule は型情報を問い合わせられるモジュール
pub trait TypedModule: Send + Sync + fmt::Debug {
    /// モジュールの短縮名（トークンの右側と比較される）
    fn name(&self) -> &str;

    /// 完全一致（大文字小文字を区別）で型を探す。見つからなければ `None`
    fn get_type(&self, full_name: &str) -> Option<TypeDescriptor>;
}

/// 列挙で見つかったモジュール 1 件
#[derive(Debug, Clone)]
pub enum LoadedModule {
    /// 型情報を持つモジュール（解決候補）
    Typed(Arc<dyn TypedModule>),

    /// 型情報として解釈できなかったもの（ネイティブライブラリなど）
    Native { path: PathBuf, reason: String },
}

impl LoadedModule {
    pub fn typed(module: impl TypedModule + 'static) -> Self {
        Self::Typed(Arc::new(module))
    }

    /// 型を問い合わせられるモジュールか
    ///
    /// fallback 解決はこの述語を満たすものだけを候補にします。
    pub fn is_inspectable(&self) -> bool {
        self.as_typed().is_some()
    }

    /// 候補なら TypedModule を返す。`is_inspectable` と同じ判定
    pub fn as_typed(&self) -> Option<&Arc<dyn TypedModule>> {
        match self {
            Self::Typed(module) => Some(module),
            Self::Native { .. } => None,
        }
    }

    /// 表示用の名前（Native はファイルパス）
    pub fn display_name(&self) -> String {
        match self {
            Self::Typed(module) => module.name().to_string(),
            Self::Native { path, .. } => path.display().to_string(),
        }
    }
}

/// ModuleCatalog は現在ロードされているモジュールを列挙する
///
/// # 契約
/// - 呼び出しごとにその時点のスナップショットを返す（キャッシュしない）
/// - 列挙中に別スレッドがモジュールをロードしても壊れない
///
/// # 実装
/// - **RegistryScan**: アプリケーション全体のレジストリを列挙
/// - **ProcessModuleScan**: 実行中プロセスのマップ済みモジュールを列挙
pub trait ModuleCatalog: Send + Sync {
    fn loaded_modules(&self) -> Vec<LoadedModule>;
}

impl<T: ModuleCatalog + ?Sized> ModuleCatalog for Arc<T> {
    fn loaded_modules(&self) -> Vec<LoadedModule> {
        (**self).loaded_modules()
    }
}

/// 名前が一致する最初の候補モジュールを探す
pub fn find_module(modules: &[LoadedModule], name: &str) -> Option<Arc<dyn TypedModule>> {
    modules
        .iter()
        .filter_map(LoadedModule::as_typed)
        .find(|m| m.name() == name)
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::fakes::FakeModule;

    #[test]
    fn native_modules_are_not_inspectable() {
        let native = LoadedModule::Native {
            path: PathBuf::from("/usr/lib/libc.so.6"),
            reason: "no type manifest".into(),
        };
        assert!(!native.is_inspectable());
        assert!(native.as_typed().is_none());
        assert_eq!(native.display_name(), "/usr/lib/libc.so.6");

        let typed = LoadedModule::typed(FakeModule::new("Acme", &["Acme.Foo"]));
        assert!(typed.is_inspectable());
        assert_eq!(typed.display_name(), "Acme");
    }

    #[test]
    fn find_module_skips_natives_and_matches_exact_name() {
        let modules = vec![
            LoadedModule::Native {
                path: PathBuf::from("Acme"),
                reason: "native".into(),
            },
            LoadedModule::typed(FakeModule::new("acme", &["acme.Foo"])),
            LoadedModule::typed(FakeModule::new("Acme", &["Acme.Foo"])),
        ];

        let found = find_module(&modules, "Acme").unwrap();
        assert_eq!(found.name(), "Acme");
        assert!(found.get_type("Acme.Foo").is_some());

        assert!(find_module(&modules, "Missing").is_none());
    }
}
