//! herald-core
//!
//! Type-identifier codec for message buses: turns a type descriptor into a
//! portable `FullName:Module` token and resolves such tokens back on the
//! receiving side.
//!
//! # モジュール構成
//! - **domain**: 値型（TypeDescriptor, TypeToken, CodecError）
//! - **ports**: ホストランタイムの抽象化（TypeResolver, ModuleCatalog, MemoStore）
//! - **codec**: TypeNameSerializer と TypeNameCodec（encode / decode）
//! - **impls**: 実装（DashMapStore, ModuleRegistry, ProcessModuleScan, ...）
//! - **typed**: Message trait ベースの API
//! - **app**: CodecBuilder と CodecConfig
//! - **observability**: カウンタのスナップショット

pub mod app;
pub mod codec;
pub mod domain;
pub mod impls;
pub mod observability;
pub mod ports;
pub mod typed;

pub use app::{BuildError, CodecBuilder, CodecConfig};
pub use codec::{TypeNameCodec, TypeNameSerializer};
pub use domain::{CodecError, TypeDescriptor, TypeToken};
pub use typed::{Message, TypedCodecExt};
