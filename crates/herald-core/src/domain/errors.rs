//! Errors - codec のエラー分類
//!
//! # 分類
//! - InvalidArgument: 呼び出し側のバグ（空の入力など）。リトライ無意味
//! - EncodingTooLong: トークンがワイヤ上限を超える。スキーマ設計の問題
//! - MalformedToken: `Type:Module` 形式でない。プロトコル/バージョン不一致
//! - TypeNotFound: どの経路でも型が見つからない。後でリトライ可能（キャッシュしない）

use thiserror::Error;

use super::token::MAX_TOKEN_LEN;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error(
        "the serialized name of type '{type_name}' is {len} bytes and exceeds the AMQP maximum short string length of {max} bytes",
        max = MAX_TOKEN_LEN
    )]
    EncodingTooLong { type_name: String, len: usize },

    #[error("type name '{token}' is not a valid type token. Expected Type:Module")]
    MalformedToken { token: String },

    #[error("cannot find type {token}")]
    TypeNotFound { token: String },
}

impl CodecError {
    pub(crate) fn blank(name: &'static str) -> Self {
        Self::InvalidArgument {
            name,
            reason: "must not be blank".to_string(),
        }
    }

    /// 後でリトライすれば成功しうるか（モジュールの動的ロード後など）
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TypeNotFound { .. })
    }
}
