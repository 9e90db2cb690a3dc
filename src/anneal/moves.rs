//! Move proposal and application.
//!
//! Proposal threads [`RngState`] functionally: the input state is never
//! touched and the returned [`Move`] carries the state after its draws.
//! Application is total: out-of-range indices are clamped and moves on
//! layouts too short for them are no-ops.

use super::config::AnnealConfig;
use super::types::{Move, MoveOp};
use crate::rng::RngState;

const BASE_MOVE_KINDS: usize = 3;

/// Proposes a random move for `layout`.
///
/// One draw picks the move kind uniformly among `nudge`, `swap`,
/// `reinsert` (and `blockShift` when enabled); the kind then draws its
/// own parameters.
pub fn propose(layout: &[i64], rng: RngState, config: &AnnealConfig) -> Move {
    let len = layout.len();
    let kinds = if config.enable_block_shift {
        BASE_MOVE_KINDS + 1
    } else {
        BASE_MOVE_KINDS
    };
    let (kind, rng) = rng.next_index(kinds);

    let (op, rng_after) = match kind {
        0 => {
            let (index, rng) = rng.next_index(len);
            let max_step = config.max_nudge_step.max(1) as usize;
            let (magnitude, rng) = rng.next_index(max_step);
            let (negative, rng) = rng.next_bool();
            let magnitude = magnitude as i64 + 1;
            let delta = if negative { -magnitude } else { magnitude };
            (MoveOp::Nudge { index, delta }, rng)
        }
        1 => {
            let (i, rng) = rng.next_index(len);
            if len > 1 {
                let (k, rng) = rng.next_index(len - 1);
                let j = if k >= i { k + 1 } else { k };
                (MoveOp::Swap { i, j }, rng)
            } else {
                let (j, rng) = rng.next_index(len);
                (MoveOp::Swap { i, j }, rng)
            }
        }
        2 => {
            let (from, rng) = rng.next_index(len);
            let (to, rng) = rng.next_index(len);
            (MoveOp::Reinsert { from, to }, rng)
        }
        _ => {
            let (a, rng) = rng.next_index(len);
            let (b, rng) = rng.next_index(len);
            let (s, rng) = rng.next_index(3);
            let op = MoveOp::BlockShift {
                start: a.min(b),
                end: a.max(b),
                shift: s as i64 - 1,
            };
            (op, rng)
        }
    };

    Move { op, rng_after }
}

/// Returns a new layout with `op` applied.
pub fn apply_op(layout: &[i64], op: &MoveOp) -> Vec<i64> {
    let mut next = layout.to_vec();
    let len = next.len();
    if len == 0 {
        return next;
    }

    match *op {
        MoveOp::Nudge { index, delta } => {
            let idx = index.min(len - 1);
            next[idx] = next[idx].saturating_add(delta);
        }
        MoveOp::Swap { i, j } => {
            if len >= 2 {
                next.swap(i.min(len - 1), j.min(len - 1));
            }
        }
        MoveOp::Reinsert { from, to } => {
            let value = next.remove(from.min(len - 1));
            let dest = to.min(next.len());
            next.insert(dest, value);
        }
        MoveOp::BlockShift { start, end, shift } => {
            if shift == 0 {
                return next;
            }
            let start = start.min(len - 1);
            let end = end.clamp(start, len - 1);
            let block: Vec<i64> = next.drain(start..=end).collect();
            let remaining = next.len() as i64;
            let dest = (start as i64 + shift).clamp(0, remaining) as usize;
            next.splice(dest..dest, block);
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nudge() {
        let out = apply_op(&[4, 2, 7, 1], &MoveOp::Nudge { index: 2, delta: -3 });
        assert_eq!(out, vec![4, 2, 4, 1]);
        assert!(apply_op(&[], &MoveOp::Nudge { index: 0, delta: 1 }).is_empty());
    }

    #[test]
    fn test_swap_single_element_is_noop() {
        assert_eq!(apply_op(&[5], &MoveOp::Swap { i: 0, j: 0 }), vec![5]);
        assert_eq!(apply_op(&[5], &MoveOp::Swap { i: 0, j: 3 }), vec![5]);
        assert_eq!(apply_op(&[1, 2, 3], &MoveOp::Swap { i: 0, j: 2 }), vec![3, 2, 1]);
    }

    #[test]
    fn test_reinsert_clamps_destination() {
        assert_eq!(
            apply_op(&[1, 2, 3, 4], &MoveOp::Reinsert { from: 0, to: 9 }),
            vec![2, 3, 4, 1]
        );
        assert_eq!(
            apply_op(&[1, 2, 3, 4], &MoveOp::Reinsert { from: 3, to: 1 }),
            vec![1, 4, 2, 3]
        );
        assert_eq!(
            apply_op(&[1, 2, 3], &MoveOp::Reinsert { from: 1, to: 1 }),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_block_shift() {
        let base = [1, 2, 3, 4, 5];
        assert_eq!(
            apply_op(&base, &MoveOp::BlockShift { start: 1, end: 2, shift: 1 }),
            vec![1, 4, 2, 3, 5]
        );
        assert_eq!(
            apply_op(&base, &MoveOp::BlockShift { start: 1, end: 2, shift: -1 }),
            vec![2, 3, 1, 4, 5]
        );
        assert_eq!(
            apply_op(&base, &MoveOp::BlockShift { start: 0, end: 1, shift: -1 }),
            vec![1, 2, 3, 4, 5]
        );
        assert_eq!(
            apply_op(&base, &MoveOp::BlockShift { start: 3, end: 1, shift: 1 }),
            vec![1, 2, 3, 5, 4]
        );
        assert_eq!(
            apply_op(&base, &MoveOp::BlockShift { start: 1, end: 3, shift: 0 }),
            base.to_vec()
        );
    }

    #[test]
    fn test_propose_does_not_touch_input_state() {
        let rng = RngState::from_seed(11);
        let config = AnnealConfig::default();
        let a = propose(&[1, 2, 3], rng, &config);
        let b = propose(&[1, 2, 3], rng, &config);
        assert_eq!(a, b);
        assert_ne!(a.rng_after, rng);
    }

    #[test]
    fn test_swap_indices_distinct() {
        let config = AnnealConfig::default();
        let mut rng = RngState::from_seed(3);
        let mut swaps = 0;
        for _ in 0..500 {
            let mv = propose(&[1, 2], rng, &config);
            if let MoveOp::Swap { i, j } = mv.op {
                assert_ne!(i, j);
                swaps += 1;
            }
            rng = mv.rng_after;
        }
        assert!(swaps > 0);
    }

    #[test]
    fn test_nudge_magnitude_bounded() {
        let config = AnnealConfig::default().with_max_nudge_step(3);
        let mut rng = RngState::from_seed(5);
        for _ in 0..500 {
            let mv = propose(&[0, 0, 0], rng, &config);
            if let MoveOp::Nudge { delta, .. } = mv.op {
                assert!((1..=3).contains(&delta.abs()));
            }
            rng = mv.rng_after;
        }
    }

    #[test]
    fn test_block_shift_only_when_enabled() {
        let mut rng = RngState::from_seed(17);
        let disabled = AnnealConfig::default();
        let enabled = AnnealConfig::default().with_block_shift(true);
        let mut seen = false;
        for _ in 0..200 {
            let off = propose(&[1, 2, 3, 4], rng, &disabled);
            assert!(!matches!(off.op, MoveOp::BlockShift { .. }));
            let on = propose(&[1, 2, 3, 4], rng, &enabled);
            if let MoveOp::BlockShift { start, end, shift } = on.op {
                assert!(start <= end);
                assert!((-1..=1).contains(&shift));
                seen = true;
            }
            rng = on.rng_after;
        }
        assert!(seen);
    }
}
