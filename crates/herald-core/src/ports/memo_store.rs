//! MemoStore port - codec が所有する並行 key-value ストア
//!
//! プロセス全体のグローバルキャッシュは持たず、codec インスタンスごとに
//! 注入されたストアを使います。

/// MemoStore は insert-if-absent のみを許す並行マップ
///
/// # 契約
/// - 値は一度入ったら置き換えない・削除しない（単調増加）
/// - `get` と `get_or_insert` は外部ロックなしで複数スレッドから呼べる
/// - `get_or_insert` は既存値があればそれを返す（呼び出し側の値は捨てる）
pub trait MemoStore<K, V>: Send + Sync {
    fn get(&self, key: &K) -> Option<V>;

    fn get_or_insert(&self, key: K, value: V) -> V;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
