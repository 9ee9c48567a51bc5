/// Orb for comparisons involving the Sun or the Moon
pub const ORB_LUMINARY: f64 = 6.0;

/// Orb for every other body or angle comparison
pub const ORB_OTHER: f64 = 4.0;

/// A named angular relationship between two longitudes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aspect {
    pub name: &'static str,
    pub angle: f64,
    pub weight: i32,
}

/// Aspect table, scanned in order. First match wins.
pub const ASPECTS: [Aspect; 5] = [
    Aspect { name: "conjunction", angle: 0.0, weight: 8 },
    Aspect { name: "sextile", angle: 60.0, weight: 6 },
    Aspect { name: "square", angle: 90.0, weight: -8 },
    Aspect { name: "trine", angle: 120.0, weight: 9 },
    Aspect { name: "opposition", angle: 180.0, weight: -7 },
];

/// Smallest angular separation between two longitudes, in `[0, 180]`
#[inline]
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 {
        360.0 - d
    } else {
        d
    }
}

/// Find the first aspect whose nominal angle lies within `orb` of `distance`
#[inline]
pub fn find_aspect(distance: f64, orb: f64) -> Option<&'static Aspect> {
    ASPECTS
        .iter()
        .find(|aspect| (distance - aspect.angle).abs() <= orb)
}

/// Signed weight of the aspect matching `distance`, or 0 when none matches
#[inline]
pub fn match_aspect(distance: f64, orb: f64) -> i32 {
    find_aspect(distance, orb).map_or(0, |aspect| aspect.weight)
}

/// Weight of the aspect formed between two longitudes
#[inline]
pub fn aspect_between(a: f64, b: f64, orb: f64) -> i32 {
    match_aspect(angular_distance(a, b), orb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angular_distance_wraps() {
        assert_eq!(angular_distance(10.0, 370.0), 0.0);
        assert_eq!(angular_distance(10.0, 10.0), 0.0);
        assert_eq!(angular_distance(350.0, 10.0), 20.0);
        assert_eq!(angular_distance(0.0, 180.0), 180.0);
        assert_eq!(angular_distance(0.0, 270.0), 90.0);
    }

    #[test]
    fn test_angular_distance_symmetric_and_bounded() {
        let samples = [0.0, 0.5, 29.9, 90.0, 179.99, 180.0, 211.3, 359.9, 725.0];
        for &a in &samples {
            for &b in &samples {
                let ab = angular_distance(a, b);
                assert_eq!(ab, angular_distance(b, a));
                assert!((0.0..=180.0).contains(&ab), "distance {} out of range", ab);
            }
        }
    }

    #[test]
    fn test_match_aspect_table() {
        assert_eq!(match_aspect(0.0, ORB_LUMINARY), 8);
        assert_eq!(match_aspect(62.0, ORB_OTHER), 6);
        assert_eq!(match_aspect(90.0, ORB_OTHER), -8);
        assert_eq!(match_aspect(116.0, ORB_OTHER), 9);
        assert_eq!(match_aspect(175.0, ORB_LUMINARY), -7);
        assert_eq!(match_aspect(45.0, ORB_OTHER), 0);
    }

    #[test]
    fn test_orb_boundary_is_inclusive() {
        assert_eq!(match_aspect(4.0, ORB_OTHER), 8);
        assert_eq!(match_aspect(4.01, ORB_OTHER), 0);
        assert_eq!(match_aspect(96.0, ORB_LUMINARY), -8);
    }

    #[test]
    fn test_first_match_wins_with_wide_orb() {
        // 30 degrees is equally close to conjunction and sextile
        let aspect = find_aspect(30.0, 30.0).unwrap();
        assert_eq!(aspect.name, "conjunction");
    }
}
