//! TypeToken - ワイヤ上を流れる型識別子
//!
//! # フォーマット
//! - `<FullTypeName>:<ModuleShortName>`
//! - 例: `Acme.Billing.OrderPlaced:Acme.Billing`
//! - 最大 255 bytes（AMQP short string は 8-bit 長プレフィックス）

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::descriptor::TypeDescriptor;
use super::errors::CodecError;

/// AMQP short string の最大長
pub const MAX_TOKEN_LEN: usize = 255;

/// 型名とモジュール名の区切り文字
pub const SEPARATOR: char = ':';

/// TypeToken は不変の型識別文字列
///
/// 生成は `TypeToken::compose` のみ。受信側ではただの `&str` として扱い、
/// `TokenParts::parse` で分解します。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeToken(Arc<str>);

impl TypeToken {
    /// descriptor からトークンを組み立てる
    ///
    /// # エラー
    /// - 型名/モジュール名が空、または `:` を含む → `InvalidArgument`
    /// - 255 bytes 超 → `EncodingTooLong`
    pub fn compose(ty: &TypeDescriptor) -> Result<Self, CodecError> {
        check_part("type.full_name", ty.full_name())?;
        check_part("type.module", ty.module())?;

        let token = format!("{}{SEPARATOR}{}", ty.full_name(), ty.module());
        if token.len() > MAX_TOKEN_LEN {
            return Err(CodecError::EncodingTooLong {
                type_name: ty.name().to_string(),
                len: token.len(),
            });
        }
        Ok(Self(token.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn check_part(name: &'static str, value: &str) -> Result<(), CodecError> {
    if value.trim().is_empty() {
        return Err(CodecError::blank(name));
    }
    if value.contains(SEPARATOR) {
        return Err(CodecError::InvalidArgument {
            name,
            reason: format!("'{value}' must not contain '{SEPARATOR}'"),
        });
    }
    Ok(())
}

impl AsRef<str> for TypeToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 受信したトークンを分解した結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenParts<'a> {
    pub full_name: &'a str,
    pub module: &'a str,
}

impl<'a> TokenParts<'a> {
    /// `:` で分割し、ちょうど 2 つでなければ `MalformedToken`
    ///
    /// 各パートが空でもここではエラーにしない（解決に失敗して `TypeNotFound` になる）。
    pub fn parse(token: &'a str) -> Result<Self, CodecError> {
        let mut parts = token.split(SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(full_name), Some(module), None) => Ok(Self { full_name, module }),
            _ => Err(CodecError::MalformedToken {
                token: token.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn compose_joins_name_and_module() {
        let ty = TypeDescriptor::new("Acme.Billing.OrderPlaced", "Acme.Billing");
        let token = TypeToken::compose(&ty).unwrap();
        assert_eq!(token.as_str(), "Acme.Billing.OrderPlaced:Acme.Billing");
    }

    #[test]
    fn compose_accepts_exactly_max_len() {
        // "<name>:M" がちょうど 255 bytes
        let name = "N".repeat(MAX_TOKEN_LEN - 2);
        let token = TypeToken::compose(&TypeDescriptor::new(name, "M")).unwrap();
        assert_eq!(token.len(), MAX_TOKEN_LEN);
    }

    #[test]
    fn compose_rejects_one_past_max_len() {
        let name = "N".repeat(MAX_TOKEN_LEN - 1);
        let err = TypeToken::compose(&TypeDescriptor::new(name, "M")).unwrap_err();
        assert!(matches!(
            err,
            CodecError::EncodingTooLong { len, .. } if len == MAX_TOKEN_LEN + 1
        ));
    }

    #[rstest]
    #[case::blank_name("", "Acme")]
    #[case::whitespace_name("   ", "Acme")]
    #[case::blank_module("Acme.Foo", "")]
    #[case::colon_in_name("acme::Foo", "Acme")]
    #[case::colon_in_module("Acme.Foo", "Acme:1")]
    fn compose_rejects_invalid_parts(#[case] full_name: &str, #[case] module: &str) {
        let err = TypeToken::compose(&TypeDescriptor::new(full_name, module)).unwrap_err();
        assert!(matches!(err, CodecError::InvalidArgument { .. }));
    }

    #[rstest]
    #[case::no_colon("NoColonHere")]
    #[case::two_colons("A:B:C")]
    #[case::rust_path("acme::billing::Order:Acme")]
    fn parse_rejects_wrong_part_count(#[case] token: &str) {
        let err = TokenParts::parse(token).unwrap_err();
        assert_eq!(
            err,
            CodecError::MalformedToken {
                token: token.to_string()
            }
        );
    }

    #[test]
    fn parse_keeps_empty_parts() {
        let parts = TokenParts::parse("Acme.Foo:").unwrap();
        assert_eq!(parts.full_name, "Acme.Foo");
        assert_eq!(parts.module, "");
    }

    #[test]
    fn token_serializes_as_plain_string() {
        let token = TypeToken::compose(&TypeDescriptor::new("A.B", "A")).unwrap();
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"A.B:A\"");
    }
}
