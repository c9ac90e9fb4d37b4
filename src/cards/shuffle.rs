//! Shuffler: Fisher-Yates over any card sequence, driven by `GameRng`.

use crate::core::GameRng;

/// Return `items` in a uniformly random order.
///
/// Length and multiset are preserved; O(n).
///
/// ```
/// use par_game::cards::shuffle;
/// use par_game::core::GameRng;
///
/// let mut rng = GameRng::new(42);
/// let mut shuffled = shuffle((1..=10).collect::<Vec<_>>(), &mut rng);
/// shuffled.sort();
/// assert_eq!(shuffled, (1..=10).collect::<Vec<_>>());
/// ```
#[must_use]
pub fn shuffle<T>(mut items: Vec<T>, rng: &mut GameRng) -> Vec<T> {
    rng.shuffle(&mut items);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::catalog::build_catalog;

    #[test]
    fn test_shuffle_preserves_cards() {
        let deck = build_catalog().unwrap();
        let mut rng = GameRng::new(7);
        let shuffled = shuffle(deck.clone(), &mut rng);

        assert_eq!(shuffled.len(), deck.len());
        assert_ne!(shuffled, deck);

        let mut remaining = deck;
        for card in &shuffled {
            let pos = remaining.iter().position(|c| c == card).unwrap();
            remaining.swap_remove(pos);
        }
        assert!(remaining.is_empty());
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let a = shuffle((0..50).collect::<Vec<_>>(), &mut GameRng::new(3));
        let b = shuffle((0..50).collect::<Vec<_>>(), &mut GameRng::new(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_small_inputs() {
        let mut rng = GameRng::new(1);
        assert!(shuffle(Vec::<u8>::new(), &mut rng).is_empty());
        assert_eq!(shuffle(vec![9], &mut rng), vec![9]);
    }

    #[test]
    fn test_every_position_reachable() {
        let mut rng = GameRng::new(11);
        let mut seen_first = [false; 4];
        for _ in 0..200 {
            let order = shuffle(vec![0usize, 1, 2, 3], &mut rng);
            seen_first[order[0]] = true;
        }
        assert!(seen_first.iter().all(|&s| s));
    }
}
