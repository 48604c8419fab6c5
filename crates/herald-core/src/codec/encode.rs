use super::TypeNameCodec;
use crate::domain::{CodecError, TypeDescriptor, TypeToken};
use crate::observability::CodecCounters;

impl TypeNameCodec {
    pub(super) fn encode(&self, ty: &TypeDescriptor) -> Result<TypeToken, CodecError> {
        if let Some(token) = self.encoded.get(ty) {
            CodecCounters::bump(&self.counters.encode_hits);
            tracing::trace!(%token, "encode cache hit");
            return Ok(token);
        }

        // 失敗はキャッシュしない（同じ descriptor なら毎回同じエラーになる）
        let token = TypeToken::compose(ty)?;
        CodecCounters::bump(&self.counters.encode_computed);
        tracing::debug!(type_name = ty.full_name(), %token, "type token computed");

        Ok(self.encoded.get_or_insert(ty.clone(), token))
    }
}
