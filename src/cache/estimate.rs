//! Memory Estimation Module
//!
//! Approximates the in-memory footprint of a contact snapshot so the store
//! can enforce its memory ceiling. The estimate models strings as UTF-16
//! code units (2 bytes each) plus a fixed per-contact overhead for
//! container bookkeeping. It does not need to match real allocator usage,
//! only be monotonic in snapshot size and cheap to recompute.

use crate::cache::ContactsSnapshot;

// == Constants ==
/// Fixed bookkeeping overhead charged per (name, phone-list) pair.
pub const PAIR_OVERHEAD_BYTES: usize = 200;

/// Bytes per megabyte.
const BYTES_PER_MB: f64 = 1_048_576.0;

// == Estimator ==
/// Estimated size of a snapshot in bytes.
pub fn snapshot_size_bytes(snapshot: &ContactsSnapshot) -> usize {
    snapshot
        .iter()
        .map(|(name, phones)| {
            let name_bytes = name.encode_utf16().count() * 2;
            let phone_bytes: usize = phones.iter().map(|p| p.encode_utf16().count() * 2).sum();
            name_bytes + phone_bytes + PAIR_OVERHEAD_BYTES
        })
        .sum()
}

/// Estimated size of a snapshot in megabytes.
pub fn snapshot_size_mb(snapshot: &ContactsSnapshot) -> f64 {
    snapshot_size_bytes(snapshot) as f64 / BYTES_PER_MB
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(pairs: &[(&str, &[&str])]) -> ContactsSnapshot {
        pairs
            .iter()
            .map(|(name, phones)| {
                (
                    name.to_string(),
                    phones.iter().map(|p| p.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_snapshot_is_free() {
        assert_eq!(snapshot_size_bytes(&ContactsSnapshot::new()), 0);
        assert_eq!(snapshot_size_mb(&ContactsSnapshot::new()), 0.0);
    }

    #[test]
    fn test_single_pair_size() {
        // "Alice" = 5 code units, "123" = 3 code units: (5 + 3) * 2 + 200.
        let snap = snapshot(&[("Alice", &["123"])]);
        assert_eq!(snapshot_size_bytes(&snap), 216);
    }

    #[test]
    fn test_growth_is_monotonic() {
        let smaller = snapshot(&[("Alice", &["555-0001", "555-0002"])]);
        let mut larger = smaller.clone();
        larger.insert("Bob".to_string(), vec!["555-9999".to_string()]);

        assert!(snapshot_size_mb(&larger) > snapshot_size_mb(&smaller));
    }

    #[test]
    fn test_counts_utf16_units_not_bytes() {
        // "é" is 2 bytes in UTF-8 but a single UTF-16 code unit.
        let ascii = snapshot(&[("Renee", &[])]);
        let accented = snapshot(&[("Renée", &[])]);

        assert_eq!(
            snapshot_size_bytes(&ascii),
            snapshot_size_bytes(&accented)
        );
    }

    #[test]
    fn test_mb_conversion() {
        let snap = snapshot(&[("Alice", &["123"])]);
        let mb = snapshot_size_mb(&snap);
        assert!((mb - 216.0 / 1_048_576.0).abs() < f64::EPSILON);
    }
}
