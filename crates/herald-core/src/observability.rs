use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// codec の動作カウンタのスナップショット
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecCounts {
    pub encode_hits: u64,
    pub encode_computed: u64,
    pub decode_hits: u64,
    pub primary_hits: u64,
    pub fallback_scans: u64,
    pub fallback_hits: u64,
    pub not_found: u64,
}

#[derive(Debug, Default)]
pub(crate) struct CodecCounters {
    pub encode_hits: AtomicU64,
    pub encode_computed: AtomicU64,
    pub decode_hits: AtomicU64,
    pub primary_hits: AtomicU64,
    pub fallback_scans: AtomicU64,
    pub fallback_hits: AtomicU64,
    pub not_found: AtomicU64,
}

impl CodecCounters {
    pub fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CodecCounts {
        let read = |c: &AtomicU64| c.load(Ordering::Relaxed);
        CodecCounts {
            encode_hits: read(&self.encode_hits),
            encode_computed: read(&self.encode_computed),
            decode_hits: read(&self.decode_hits),
            primary_hits: read(&self.primary_hits),
            fallback_scans: read(&self.fallback_scans),
            fallback_hits: read(&self.fallback_hits),
            not_found: read(&self.not_found),
        }
    }
}
