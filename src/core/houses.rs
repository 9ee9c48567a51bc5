use crate::models::{HouseBreakdown, Modality, SunModality};

/// Twelve house cusps in degrees, `None` where the cusp is unavailable
pub type Cusps = [Option<f64>; 12];

/// Bonus when a Sun falls in the other chart's houses (0-based indices)
///
/// Only the 1st/7th and 4th/10th bands carry weight.
pub const SUN_HOUSE_BONUS: [(&[usize], i32); 2] = [(&[0, 6], 4), (&[3, 9], 3)];

/// Bonus when a Moon falls in the other chart's houses (0-based indices)
pub const MOON_HOUSE_BONUS: [(&[usize], i32); 2] = [(&[0, 6], 3), (&[4, 10], 2)];

/// Bonus when both Suns sit in houses of the same modality in their own charts
pub const SUN_MODALITY_BONUS: i32 = 2;

/// Normalize a raw cusp list to exactly 12 entries
///
/// Returns `None` when fewer than 12 values are supplied. Extra values are
/// ignored. Null or non-finite entries become unavailable markers.
pub fn normalize_cusps(raw: &[Option<f64>]) -> Option<Cusps> {
    if raw.len() < 12 {
        return None;
    }

    let mut cusps = [None; 12];
    for (slot, value) in cusps.iter_mut().zip(raw.iter()) {
        *slot = value.filter(|v| v.is_finite());
    }
    Some(cusps)
}

/// Index of the next available cusp after `i`, wrapping around
fn next_valid(cusps: &Cusps, i: usize) -> Option<usize> {
    (1..=12)
        .map(|k| (i + k) % 12)
        .find(|&j| cusps[j].is_some())
}

/// Determine which house (0-11) a longitude falls in
///
/// Houses are the half-open arcs `[cusps[i], cusps[next])` between
/// consecutive available cusps. Returns `None` when no house can be
/// determined, e.g. all cusps unavailable or only one valid cusp.
pub fn house_index_of(cusps: &Cusps, longitude: f64) -> Option<usize> {
    if !longitude.is_finite() {
        return None;
    }
    let x = longitude.rem_euclid(360.0);

    for i in 0..12 {
        let Some(start) = cusps[i] else { continue };
        let Some(j) = next_valid(cusps, i).filter(|&j| j != i) else {
            continue;
        };
        let Some(end) = cusps[j] else { continue };

        let inside = if start <= end {
            x >= start && x < end
        } else {
            // arc crosses 0 degrees
            x >= start || x < end
        };
        if inside {
            return Some(i);
        }
    }

    None
}

/// Modality class of a house index
pub fn modality_of(house: usize) -> Option<Modality> {
    if house > 11 {
        return None;
    }
    match house % 3 {
        0 => Some(Modality::Angular),
        1 => Some(Modality::Succedent),
        _ => Some(Modality::Cadent),
    }
}

#[inline]
fn table_bonus(table: &[(&[usize], i32)], house: Option<usize>) -> i32 {
    house
        .and_then(|h| table.iter().find(|(houses, _)| houses.contains(&h)))
        .map_or(0, |(_, bonus)| *bonus)
}

pub fn sun_house_bonus(house: Option<usize>) -> i32 {
    table_bonus(&SUN_HOUSE_BONUS, house)
}

pub fn moon_house_bonus(house: Option<usize>) -> i32 {
    table_bonus(&MOON_HOUSE_BONUS, house)
}

/// Sun and Moon longitudes of one chart together with its house cusps
#[derive(Debug, Clone, Copy)]
pub struct HousedChart<'a> {
    pub sun: f64,
    pub moon: f64,
    pub cusps: &'a Cusps,
}

/// Cross-chart house overlay: each chart's luminaries placed in the other's houses
pub fn house_overlay(a: HousedChart<'_>, b: HousedChart<'_>) -> HouseBreakdown {
    let a_sun_in_b = house_index_of(b.cusps, a.sun);
    let a_moon_in_b = house_index_of(b.cusps, a.moon);
    let b_sun_in_a = house_index_of(a.cusps, b.sun);
    let b_moon_in_a = house_index_of(a.cusps, b.moon);

    let sun_bonus = sun_house_bonus(a_sun_in_b) + sun_house_bonus(b_sun_in_a);
    let moon_bonus = moon_house_bonus(a_moon_in_b) + moon_house_bonus(b_moon_in_a);

    let sun_mod_a = house_index_of(a.cusps, a.sun).and_then(modality_of);
    let sun_mod_b = house_index_of(b.cusps, b.sun).and_then(modality_of);
    let modality_bonus = match (sun_mod_a, sun_mod_b) {
        (Some(ma), Some(mb)) if ma == mb => SUN_MODALITY_BONUS,
        _ => 0,
    };

    let house_number = |h: Option<usize>| h.map(|i| i as u8 + 1);

    HouseBreakdown {
        a_sun_in_b: house_number(a_sun_in_b),
        a_moon_in_b: house_number(a_moon_in_b),
        b_sun_in_a: house_number(b_sun_in_a),
        b_moon_in_a: house_number(b_moon_in_a),
        sun_modality: SunModality {
            a: sun_mod_a,
            b: sun_mod_b,
            bonus: modality_bonus,
        },
        house_bonus_total: sun_bonus + moon_bonus + modality_bonus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equal_cusps(offset: f64) -> Cusps {
        let mut cusps = [None; 12];
        for (i, c) in cusps.iter_mut().enumerate() {
            *c = Some((offset + i as f64 * 30.0) % 360.0);
        }
        cusps
    }

    #[test]
    fn test_house_index_equal_houses() {
        let cusps = equal_cusps(0.0);
        assert_eq!(house_index_of(&cusps, 15.0), Some(0));
        assert_eq!(house_index_of(&cusps, 30.0), Some(1));
        assert_eq!(house_index_of(&cusps, 359.0), Some(11));
        assert_eq!(house_index_of(&cusps, 375.0), Some(0));
        assert_eq!(house_index_of(&cusps, -1.0), Some(11));
    }

    #[test]
    fn test_house_index_wraparound_arc() {
        // 1st house spans 350 -> 20
        let cusps = equal_cusps(350.0);
        assert_eq!(house_index_of(&cusps, 355.0), Some(0));
        assert_eq!(house_index_of(&cusps, 5.0), Some(0));
        assert_eq!(house_index_of(&cusps, 20.0), Some(1));
    }

    #[test]
    fn test_house_index_skips_missing_cusps() {
        let mut cusps = equal_cusps(0.0);
        cusps[1] = None;
        // House 1 now stretches from 0 to 60
        assert_eq!(house_index_of(&cusps, 45.0), Some(0));
        assert_eq!(house_index_of(&cusps, 65.0), Some(2));
    }

    #[test]
    fn test_house_index_degenerate_cusps() {
        let none: Cusps = [None; 12];
        assert_eq!(house_index_of(&none, 10.0), None);

        let mut single: Cusps = [None; 12];
        single[4] = Some(120.0);
        assert_eq!(house_index_of(&single, 10.0), None);
        assert_eq!(house_index_of(&single, 120.0), None);
    }

    #[test]
    fn test_normalize_cusps() {
        assert!(normalize_cusps(&[Some(0.0); 11]).is_none());

        let mut raw: Vec<Option<f64>> = (0..13).map(|i| Some(i as f64 * 30.0)).collect();
        raw[2] = None;
        raw[3] = Some(f64::NAN);
        let cusps = normalize_cusps(&raw).unwrap();
        assert_eq!(cusps.len(), 12);
        assert_eq!(cusps[0], Some(0.0));
        assert_eq!(cusps[2], None);
        assert_eq!(cusps[3], None);
        assert_eq!(cusps[11], Some(330.0));
    }

    #[test]
    fn test_modality_groups() {
        for h in [0, 3, 6, 9] {
            assert_eq!(modality_of(h), Some(Modality::Angular));
        }
        for h in [1, 4, 7, 10] {
            assert_eq!(modality_of(h), Some(Modality::Succedent));
        }
        for h in [2, 5, 8, 11] {
            assert_eq!(modality_of(h), Some(Modality::Cadent));
        }
        assert_eq!(modality_of(12), None);
    }

    #[test]
    fn test_bonus_tables() {
        assert_eq!(sun_house_bonus(Some(0)), 4);
        assert_eq!(sun_house_bonus(Some(6)), 4);
        assert_eq!(sun_house_bonus(Some(3)), 3);
        assert_eq!(sun_house_bonus(Some(9)), 3);
        assert_eq!(sun_house_bonus(Some(4)), 0);
        assert_eq!(sun_house_bonus(None), 0);

        assert_eq!(moon_house_bonus(Some(0)), 3);
        assert_eq!(moon_house_bonus(Some(10)), 2);
        assert_eq!(moon_house_bonus(Some(3)), 0);
        assert_eq!(moon_house_bonus(None), 0);
    }

    #[test]
    fn test_house_overlay() {
        let cusps = equal_cusps(0.0);
        let a = HousedChart { sun: 5.0, moon: 125.0, cusps: &cusps };
        let b = HousedChart { sun: 185.0, moon: 310.0, cusps: &cusps };

        let overlay = house_overlay(a, b);
        // A.Sun in house 1 (+4), A.Moon in house 5 (+2)
        assert_eq!(overlay.a_sun_in_b, Some(1));
        assert_eq!(overlay.a_moon_in_b, Some(5));
        // B.Sun in house 7 (+4), B.Moon in house 11 (+2)
        assert_eq!(overlay.b_sun_in_a, Some(7));
        assert_eq!(overlay.b_moon_in_a, Some(11));
        // Both Suns angular in their own charts (+2)
        assert_eq!(overlay.sun_modality.a, Some(Modality::Angular));
        assert_eq!(overlay.sun_modality.bonus, 2);
        assert_eq!(overlay.house_bonus_total, 4 + 2 + 4 + 2 + 2);
    }
}
