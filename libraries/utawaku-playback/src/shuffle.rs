//! Next/previous index selection
//!
//! Sequential navigation wraps around the playlist in both directions.
//! Shuffle picks uniformly among the other segments, never repeating the
//! current one unless it is the only segment.

use crate::types::Direction;
use rand::Rng;

/// Pick the index to play after `current`
///
/// Returns `None` for an empty playlist. With nothing selected, sequential
/// navigation starts at 0 (next) or the last index (previous). A stale
/// `current` past the end is treated as nothing selected.
pub fn next_index<R: Rng + ?Sized>(
    current: Option<usize>,
    len: usize,
    direction: Direction,
    shuffle: bool,
    rng: &mut R,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let current = current.filter(|&i| i < len);

    if shuffle {
        return Some(random_other(current, len, rng));
    }

    Some(match (current, direction) {
        (None, Direction::Next) => 0,
        (None, Direction::Previous) => len - 1,
        (Some(i), Direction::Next) => (i + 1) % len,
        (Some(i), Direction::Previous) => (i + len - 1) % len,
    })
}

/// Uniform pick from `0..len`, excluding `current` when possible
fn random_other<R: Rng + ?Sized>(current: Option<usize>, len: usize, rng: &mut R) -> usize {
    match current {
        Some(_) if len == 1 => 0,
        Some(current) => {
            let pick = rng.gen_range(0..len - 1);
            if pick >= current {
                pick + 1
            } else {
                pick
            }
        }
        None => rng.gen_range(0..len),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn sequential_wraps_both_ways() {
        let mut rng = rng();
        assert_eq!(next_index(Some(3), 4, Direction::Next, false, &mut rng), Some(0));
        assert_eq!(next_index(Some(0), 4, Direction::Previous, false, &mut rng), Some(3));
        assert_eq!(next_index(Some(1), 4, Direction::Next, false, &mut rng), Some(2));
        assert_eq!(next_index(Some(1), 4, Direction::Previous, false, &mut rng), Some(0));
    }

    #[test]
    fn nothing_selected_starts_at_ends() {
        let mut rng = rng();
        assert_eq!(next_index(None, 4, Direction::Next, false, &mut rng), Some(0));
        assert_eq!(next_index(None, 4, Direction::Previous, false, &mut rng), Some(3));
        assert_eq!(next_index(Some(9), 4, Direction::Next, false, &mut rng), Some(0));
    }

    #[test]
    fn empty_playlist_has_no_next() {
        let mut rng = rng();
        assert_eq!(next_index(None, 0, Direction::Next, true, &mut rng), None);
        assert_eq!(next_index(Some(0), 0, Direction::Previous, false, &mut rng), None);
    }

    #[test]
    fn shuffle_single_segment_repeats() {
        let mut rng = rng();
        assert_eq!(next_index(Some(0), 1, Direction::Next, true, &mut rng), Some(0));
    }

    #[test]
    fn shuffle_reaches_every_other_index() {
        let mut rng = rng();
        let seen: HashSet<usize> = (0..500)
            .filter_map(|_| next_index(Some(2), 5, Direction::Next, true, &mut rng))
            .collect();
        assert_eq!(seen, HashSet::from([0, 1, 3, 4]));
    }
}
