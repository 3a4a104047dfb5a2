//! Proximity clustering of bounding rectangles
//!
//! Sprite sheets often split one logical icon into several connected
//! components (an icon with a detached shadow, dotted outlines, ...).
//! Clustering merges components whose bounding rects start close to each
//! other back into a single region.

use greybox_core::{Rect, envelope};

/// Merge rects whose top-left corners lie within `threshold` pixels of
/// each other, chaining through intermediate members.
///
/// The first unclustered rect seeds a cluster; the remaining rects are
/// scanned once in order, and a rect joins if it is near *any* member
/// added so far. A chain of near rects therefore merges even when its two
/// ends are far apart. Each finished cluster is emitted as the union
/// envelope of its members, in seed order.
///
/// The input partitions completely: every rect ends up in exactly one
/// cluster, so the output is never longer than the input. Envelopes of
/// different clusters may still overlap; callers must not assume disjoint
/// regions.
pub fn merge_nearby(rects: Vec<Rect>, threshold: u32) -> Vec<Rect> {
    let mut pending = rects;
    let mut merged = Vec::new();

    while !pending.is_empty() {
        let seed = pending.remove(0);
        let mut members = vec![seed];
        let mut rest = Vec::with_capacity(pending.len());

        for rect in pending {
            if members.iter().any(|m| m.near(&rect, threshold)) {
                members.push(rect);
            } else {
                rest.push(rect);
            }
        }
        pending = rest;

        if let Some(env) = envelope(&members) {
            merged.push(env);
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(merge_nearby(Vec::new(), 10).is_empty());
    }

    #[test]
    fn test_far_rects_stay_separate() {
        let rects = vec![Rect::new(0, 0, 4, 4), Rect::new(50, 50, 4, 4)];
        let merged = merge_nearby(rects.clone(), 10);
        assert_eq!(merged, rects);
    }

    #[test]
    fn test_near_rects_merge_to_envelope() {
        let rects = vec![Rect::new(2, 2, 4, 4), Rect::new(5, 5, 4, 4)];
        let merged = merge_nearby(rects, 10);
        assert_eq!(merged, vec![Rect::new(2, 2, 7, 7)]);
    }

    #[test]
    fn test_chained_merge_is_transitive() {
        // a-b and b-c are near, a-c is not; the chain still merges
        let a = Rect::new(0, 0, 2, 2);
        let b = Rect::new(8, 0, 2, 2);
        let c = Rect::new(16, 0, 2, 2);
        assert!(a.near(&b, 10));
        assert!(b.near(&c, 10));
        assert!(!a.near(&c, 10));

        let merged = merge_nearby(vec![a, b, c], 10);
        assert_eq!(merged, vec![Rect::new(0, 0, 18, 2)]);
    }

    #[test]
    fn test_partition_is_complete() {
        let rects = vec![
            Rect::new(0, 0, 2, 2),
            Rect::new(4, 4, 2, 2),
            Rect::new(40, 40, 2, 2),
            Rect::new(44, 44, 2, 2),
            Rect::new(90, 0, 2, 2),
        ];
        let merged = merge_nearby(rects, 5);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0], Rect::new(0, 0, 6, 6));
        assert_eq!(merged[1], Rect::new(40, 40, 6, 6));
        assert_eq!(merged[2], Rect::new(90, 0, 2, 2));
    }

    #[test]
    fn test_threshold_zero_merges_identical_corners_only() {
        let rects = vec![Rect::new(3, 3, 2, 2), Rect::new(3, 3, 6, 1), Rect::new(4, 3, 1, 1)];
        let merged = merge_nearby(rects, 0);
        assert_eq!(merged, vec![Rect::new(3, 3, 6, 2), Rect::new(4, 3, 1, 1)]);
    }
}
