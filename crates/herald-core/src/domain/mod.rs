//! Domain model (descriptor, token, errors).
//!
//! codec の入出力となる値型だけを置きます。ホストランタイムへの依存は ports へ。

pub mod descriptor;
pub mod errors;
pub mod token;

pub use self::descriptor::TypeDescriptor;
pub use self::errors::CodecError;
pub use self::token::{MAX_TOKEN_LEN, SEPARATOR, TokenParts, TypeToken};
