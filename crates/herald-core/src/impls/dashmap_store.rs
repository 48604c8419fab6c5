//! DashMapStore - DashMap ベースの MemoStore
//!
//! # 学習ポイント
//! - シャード分割ロックによる並行 get-or-insert
//! - `entry().or_insert()` は先着の値を残す（後から来た値は捨てる）

use dashmap::DashMap;
use std::hash::Hash;

use crate::ports::MemoStore;

/// DashMapStore は codec のデフォルトキャッシュ
///
/// # 実装詳細
/// - 値の計算はこのストアの外で行う（シャードロック中に重い処理をしない）
/// - 削除 API は持たない（単調増加）
pub struct DashMapStore<K, V> {
    map: DashMap<K, V>,
}

impl<K: Eq + Hash, V> DashMapStore<K, V> {
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V> Default for DashMapStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MemoStore<K, V> for DashMapStore<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn get(&self, key: &K) -> Option<V> {
        self.map.get(key).map(|entry| entry.value().clone())
    }

    fn get_or_insert(&self, key: K, value: V) -> V {
        self.map.entry(key).or_insert(value).value().clone()
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn first_insert_wins() {
        let store = DashMapStore::new();
        assert!(store.is_empty());

        assert_eq!(store.get_or_insert("a".to_string(), 1), 1);
        assert_eq!(store.get_or_insert("a".to_string(), 2), 1);
        assert_eq!(store.get(&"a".to_string()), Some(1));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn concurrent_inserts_agree_on_one_value() {
        let store: Arc<DashMapStore<u32, usize>> = Arc::new(DashMapStore::new());

        let seen: Vec<usize> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let store = store.clone();
                    s.spawn(move || store.get_or_insert(7, i))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let winner = store.get(&7).unwrap();
        assert!(seen.iter().all(|v| *v == winner));
        assert_eq!(store.len(), 1);
    }
}
