//! Typed - Message 型ベースの API
//!
//! 型名の typo を定数で排除し、codec とレジストリを Message 型から直接使えるようにします。

pub mod ext;
pub mod message;

pub use self::ext::TypedCodecExt;
pub use self::message::Message;
