//! Chebyshev-ring search for the nearest walkable tile.
//!
//! Starting at the target, rings of growing radius are scanned one perimeter
//! at a time, so the first hit is always at the minimal Chebyshev distance.
//! Within a ring cells are visited row-major (`dy` ascending, then `dx`).

use crate::config::TravelConfig;
use crate::env::WalkabilityOracle;
use crate::state::Position;

/// Result of a ring search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Where the traveler should land.
    pub position: Position,
    /// Ring the walkable tile was found on, or `None` when the search fell back.
    pub radius: Option<u32>,
    /// Number of oracle queries issued.
    pub probes: u32,
}

impl SearchOutcome {
    /// True when no walkable tile was found and `position` is the raw target.
    pub fn is_degraded(&self) -> bool {
        self.radius.is_none()
    }
}

/// Bounded expanding-square search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RingSearch {
    max_radius: u32,
}

impl RingSearch {
    pub const fn new(max_radius: u32) -> Self {
        Self { max_radius }
    }

    pub const fn max_radius(&self) -> u32 {
        self.max_radius
    }

    /// Nearest walkable position to `target` within `max_radius` rings.
    ///
    /// Falls back to `target` itself (degraded) when every probed tile is blocked.
    pub fn find_walkable<O>(&self, target: Position, oracle: &O) -> SearchOutcome
    where
        O: WalkabilityOracle + ?Sized,
    {
        let mut probes = 0u32;

        for radius in 0..=self.max_radius {
            for candidate in ring_perimeter(target, radius) {
                probes = probes.saturating_add(1);
                if oracle.is_walkable(candidate) {
                    return SearchOutcome {
                        position: candidate,
                        radius: Some(radius),
                        probes,
                    };
                }
            }
        }

        SearchOutcome {
            position: target,
            radius: None,
            probes,
        }
    }
}

impl Default for RingSearch {
    fn default() -> Self {
        Self::new(TravelConfig::DEFAULT_MAX_SEARCH_RADIUS)
    }
}

/// Convenience wrapper around [`RingSearch::find_walkable`].
pub fn find_walkable<O>(target: Position, oracle: &O, max_radius: u32) -> SearchOutcome
where
    O: WalkabilityOracle + ?Sized,
{
    RingSearch::new(max_radius).find_walkable(target, oracle)
}

/// Cells at exactly Chebyshev distance `radius` from `center`, row-major.
///
/// Radius 0 yields the center alone; radius `r > 0` yields `8r` cells.
pub fn ring_perimeter(center: Position, radius: u32) -> impl Iterator<Item = Position> {
    let r = i32::try_from(radius).unwrap_or(i32::MAX).min(i32::MAX / 2);

    (-r..=r).flat_map(move |dy| {
        // Top and bottom rows are full; rows in between only touch the two sides.
        let step = if dy.abs() == r { 1 } else { 2 * r };
        let step = usize::try_from(step).unwrap_or(1).max(1);
        (-r..=r)
            .step_by(step)
            .map(move |dx| center.offset(dx, dy))
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    struct Walkable(HashSet<Position>);

    impl WalkabilityOracle for Walkable {
        fn is_walkable(&self, position: Position) -> bool {
            self.0.contains(&position)
        }
    }

    /// Everything walkable except the listed walls.
    struct Walls(HashSet<Position>);

    impl WalkabilityOracle for Walls {
        fn is_walkable(&self, position: Position) -> bool {
            !self.0.contains(&position)
        }
    }

    fn walls_within(center: Position, radius: u32) -> HashSet<Position> {
        (0..=radius)
            .flat_map(|r| ring_perimeter(center, r))
            .collect()
    }

    #[test]
    fn ring_perimeter_has_expected_shape() {
        let center = Position::new(10, 10);
        assert_eq!(ring_perimeter(center, 0).collect::<Vec<_>>(), vec![center]);

        for radius in 1..=5u32 {
            let ring: Vec<_> = ring_perimeter(center, radius).collect();
            let unique: HashSet<_> = ring.iter().copied().collect();

            assert_eq!(ring.len(), (8 * radius) as usize);
            assert_eq!(unique.len(), ring.len());
            assert!(ring.iter().all(|p| p.chebyshev_distance(center) == radius));
        }
    }

    #[test]
    fn ring_perimeter_is_row_major() {
        let ring: Vec<_> = ring_perimeter(Position::ORIGIN, 1).collect();
        assert_eq!(
            ring,
            vec![
                Position::new(-1, -1),
                Position::new(0, -1),
                Position::new(1, -1),
                Position::new(-1, 0),
                Position::new(1, 0),
                Position::new(-1, 1),
                Position::new(0, 1),
                Position::new(1, 1),
            ]
        );
    }

    #[test]
    fn walkable_target_is_returned_for_any_radius() {
        let target = Position::new(10, 10);
        let oracle = Walls(HashSet::new());

        for radius in [0, 1, 9, 30] {
            let outcome = find_walkable(target, &oracle, radius);
            assert_eq!(outcome.position, target);
            assert_eq!(outcome.radius, Some(0));
            assert_eq!(outcome.probes, 1);
        }
    }

    #[test]
    fn blocked_target_lands_on_adjacent_tile() {
        let target = Position::new(10, 10);
        let mut walls = walls_within(target, 1);
        walls.remove(&Position::new(11, 10));

        let outcome = RingSearch::default().find_walkable(target, &Walls(walls));

        assert_eq!(outcome.position, Position::new(11, 10));
        assert_eq!(outcome.radius, Some(1));
        assert!(!outcome.is_degraded());
    }

    #[test]
    fn ties_are_broken_by_scan_order() {
        let target = Position::new(0, 0);
        let oracle = Walkable(HashSet::from([Position::new(1, 1), Position::new(-1, -1)]));

        let first = find_walkable(target, &oracle, 3);
        let second = find_walkable(target, &oracle, 3);

        assert_eq!(first.position, Position::new(-1, -1));
        assert_eq!(first, second);
    }

    #[test]
    fn exhausted_search_falls_back_to_target() {
        let target = Position::new(10, 10);
        let walls = walls_within(target, TravelConfig::DEFAULT_MAX_SEARCH_RADIUS);

        let outcome = RingSearch::default().find_walkable(target, &Walls(walls));

        assert_eq!(outcome.position, target);
        assert!(outcome.is_degraded());
        // 19x19 square fully probed.
        assert_eq!(outcome.probes, 361);
    }

    #[test]
    fn walkable_tile_just_outside_radius_is_ignored() {
        let target = Position::new(0, 0);
        let oracle = Walkable(HashSet::from([Position::new(4, 0)]));

        assert!(find_walkable(target, &oracle, 3).is_degraded());
        assert_eq!(find_walkable(target, &oracle, 4).radius, Some(4));
    }

    #[test]
    fn result_is_at_minimal_chebyshev_distance() {
        // Deterministic xorshift scatter of walkable tiles.
        let mut seed = 0x2545_f491_u32;
        let mut next = move || {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            seed
        };

        for _ in 0..50 {
            let target = Position::new((next() % 40) as i32 - 20, (next() % 40) as i32 - 20);
            let open: HashSet<_> = (0..6)
                .map(|_| Position::new((next() % 40) as i32 - 20, (next() % 40) as i32 - 20))
                .collect();
            let max_radius = next() % 12;

            let expected = open
                .iter()
                .map(|p| p.chebyshev_distance(target))
                .filter(|&d| d <= max_radius)
                .min();

            let outcome = find_walkable(target, &Walkable(open.clone()), max_radius);

            match expected {
                Some(distance) => {
                    assert_eq!(outcome.radius, Some(distance));
                    assert_eq!(outcome.position.chebyshev_distance(target), distance);
                    assert!(open.contains(&outcome.position));
                }
                None => {
                    assert!(outcome.is_degraded());
                    assert_eq!(outcome.position, target);
                }
            }
        }
    }
}
