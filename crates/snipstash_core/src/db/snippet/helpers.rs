//! Helper functions shared by snippet storage operations.

use crate::models::snippet::Snippet;
use chrono::{DateTime, Utc};

/// Index key that sorts newest first under redb's ascending iteration.
pub(crate) fn reverse_timestamp_key(created_at: DateTime<Utc>) -> u64 {
    // Pre-epoch values clamp to the oldest slot; out-of-range future values
    // clamp to the newest.
    let nanos = created_at.timestamp_nanos_opt().unwrap_or(i64::MAX).max(0) as u64;
    u64::MAX - nanos
}

pub(crate) fn encode_snippet(snippet: &Snippet) -> Result<Vec<u8>, bincode::Error> {
    bincode::serialize(snippet)
}

pub(crate) fn decode_snippet(bytes: &[u8]) -> Result<Snippet, bincode::Error> {
    bincode::deserialize(bytes)
}

#[cfg(test)]
mod tests {
    use super::{decode_snippet, encode_snippet, reverse_timestamp_key};
    use crate::models::snippet::Snippet;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn reverse_timestamp_key_clamps_pre_epoch_values() {
        let pre_epoch = Utc
            .with_ymd_and_hms(1960, 1, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        assert_eq!(reverse_timestamp_key(pre_epoch), u64::MAX);
    }

    #[test]
    fn newer_timestamps_get_smaller_keys() {
        let older = Utc::now();
        let newer = older + Duration::nanoseconds(1);
        assert!(reverse_timestamp_key(newer) < reverse_timestamp_key(older));
    }

    #[test]
    fn bincode_rows_keep_sub_second_precision() {
        let snippet = Snippet {
            id: "row".to_string(),
            title: "t".to_string(),
            language: "rust".to_string(),
            code: "x".to_string(),
            created_at: Utc
                .timestamp_opt(1_700_000_000, 123_456_789)
                .single()
                .expect("timestamp"),
        };
        let decoded = decode_snippet(&encode_snippet(&snippet).expect("encode")).expect("decode");
        assert_eq!(decoded, snippet);
    }
}
