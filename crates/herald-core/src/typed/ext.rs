//! TypedCodecExt - Message 型を直接扱う拡張メソッド

use super::message::Message;
use crate::codec::TypeNameSerializer;
use crate::domain::{CodecError, TypeToken};

/// TypeNameSerializer に Message 単位の API を足す
pub trait TypedCodecExt: TypeNameSerializer {
    /// `M` のトークン
    fn token_for<M: Message>(&self) -> Result<TypeToken, CodecError> {
        self.serialize(&M::descriptor())
    }

    /// 受信したトークンが `M` を指しているか
    ///
    /// 解決できないトークンはエラーとして返す（`false` にはしない）。
    fn is_token_of<M: Message>(&self, token: &str) -> Result<bool, CodecError> {
        Ok(self.deserialize(token)? == M::descriptor())
    }
}

impl<S: TypeNameSerializer + ?Sized> TypedCodecExt for S {}
