use super::TypeNameCodec;
use crate::domain::{CodecError, TokenParts, TypeDescriptor};
use crate::observability::CodecCounters;
use crate::ports::find_module;

impl TypeNameCodec {
    /// # 解決フロー
    /// 1. 空文字/空白のみ → `InvalidArgument`
    /// 2. キャッシュ hit → そのまま返す
    /// 3. `Type:Module` に分解（できなければ `MalformedToken`）
    /// 4. fast path: `TypeResolver::resolve`
    /// 5. fallback: ロード済みモジュールを列挙して名前一致を探す
    /// 6. どちらも失敗 → `TypeNotFound`（キャッシュしない）
    pub(super) fn decode(&self, token: &str) -> Result<TypeDescriptor, CodecError> {
        if token.trim().is_empty() {
            return Err(CodecError::blank("token"));
        }

        let key = token.to_string();
        if let Some(ty) = self.decoded.get(&key) {
            CodecCounters::bump(&self.counters.decode_hits);
            tracing::trace!(token, "decode cache hit");
            return Ok(ty);
        }

        let parts = TokenParts::parse(token)?;
        let (ty, path) = match self.resolver.resolve(parts.full_name, parts.module) {
            Some(ty) => {
                CodecCounters::bump(&self.counters.primary_hits);
                (ty, "primary")
            }
            None => match self.resolve_fallback(&parts) {
                Some(ty) => {
                    CodecCounters::bump(&self.counters.fallback_hits);
                    (ty, "fallback")
                }
                None => {
                    CodecCounters::bump(&self.counters.not_found);
                    tracing::debug!(token, "type not found");
                    return Err(CodecError::TypeNotFound { token: key });
                }
            },
        };

        tracing::debug!(token, path, "type resolved");
        Ok(self.decoded.get_or_insert(key, ty))
    }

    /// 列挙は毎回やり直す（ロード済みモジュールの集合は実行中に変わる）
    fn resolve_fallback(&self, parts: &TokenParts<'_>) -> Option<TypeDescriptor> {
        CodecCounters::bump(&self.counters.fallback_scans);
        let modules = self.catalog.loaded_modules();
        let module = find_module(&modules, parts.module)?;
        module.get_type(parts.full_name)
    }
}
