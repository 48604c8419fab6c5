//! App - codec の構築層
//!
//! # 主要コンポーネント
//! - **CodecBuilder**: resolver / catalog / キャッシュのワイヤリング
//! - **CodecConfig**: 列挙戦略などの設定（JSON）

pub mod builder;
pub mod config;

pub use self::builder::{BuildError, CodecBuilder};
pub use self::config::CodecConfig;
