//! Group formation
//!
//! Partitions the participants of a round into groups, optionally after a
//! uniform shuffle drawn from the injected random source.

use crate::random::RandomSource;

/// Split `participants` into groups of `players_per_group`
///
/// - `None` (or a size at least the participant count) gives one group
/// - a trailing remainder forms a smaller final group
/// - `randomly` shuffles before chunking
pub fn form_groups<R>(
    participants: &[u32],
    players_per_group: Option<usize>,
    randomly: bool,
    rng: &mut R,
) -> Vec<Vec<u32>>
where
    R: RandomSource + ?Sized,
{
    if participants.is_empty() {
        return Vec::new();
    }

    let mut order = participants.to_vec();
    if randomly {
        shuffle(&mut order, rng);
    }

    let size = players_per_group
        .filter(|n| *n > 0)
        .unwrap_or(order.len());

    order.chunks(size).map(<[u32]>::to_vec).collect()
}

/// In-place Fisher–Yates shuffle
pub fn shuffle<T, R>(items: &mut [T], rng: &mut R)
where
    R: RandomSource + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = rng.next_range(i as u64 + 1) as usize;
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRng;
    use std::collections::HashMap;

    #[test]
    fn test_single_group_when_unsized() {
        let mut rng = SeededRng::from_u64(1);
        let groups = form_groups(&[1, 2, 3, 4, 5], None, false, &mut rng);
        assert_eq!(groups, vec![vec![1, 2, 3, 4, 5]]);
    }

    #[test]
    fn test_fixed_size_in_order() {
        let mut rng = SeededRng::from_u64(1);
        let groups = form_groups(&[1, 2, 3, 4, 5, 6], Some(2), false, &mut rng);
        assert_eq!(groups, vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
    }

    #[test]
    fn test_remainder_group() {
        let mut rng = SeededRng::from_u64(1);
        let groups = form_groups(&[1, 2, 3, 4, 5], Some(2), false, &mut rng);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[2], vec![5]);
    }

    #[test]
    fn test_empty_participants() {
        let mut rng = SeededRng::from_u64(1);
        assert!(form_groups(&[], Some(2), true, &mut rng).is_empty());
    }

    #[test]
    fn test_random_grouping_is_a_partition() {
        let participants: Vec<u32> = (1..=12).collect();
        let mut rng = SeededRng::from_u64(42);
        let groups = form_groups(&participants, Some(3), true, &mut rng);

        assert_eq!(groups.len(), 4);
        let mut all: Vec<u32> = groups.concat();
        all.sort_unstable();
        assert_eq!(all, participants);
    }

    #[test]
    fn test_random_grouping_determinism() {
        let participants: Vec<u32> = (1..=10).collect();
        let mut a = SeededRng::from_u64(8);
        let mut b = SeededRng::from_u64(8);
        assert_eq!(
            form_groups(&participants, Some(2), true, &mut a),
            form_groups(&participants, Some(2), true, &mut b)
        );
    }

    #[test]
    fn test_shuffle_positions_uniform() {
        // Each of 3 items should land first about a third of the time
        let mut rng = SeededRng::from_u64(13);
        let mut firsts: HashMap<u32, u32> = HashMap::new();
        let trials = 30_000;
        for _ in 0..trials {
            let mut items = [1u32, 2, 3];
            shuffle(&mut items, &mut rng);
            *firsts.entry(items[0]).or_insert(0) += 1;
        }
        for item in 1..=3 {
            let share = firsts[&item] as f64 / trials as f64;
            assert!((share - 1.0 / 3.0).abs() < 0.02, "item {} first with freq {:.3}", item, share);
        }
    }
}
