//! Seeded demo fleet used when no CSV data is configured.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::fleet::{FleetSnapshot, Reading, Site, YearMonth};

/// `(id, name, atoll, island, capacity_kw, meter_number, commissioned_date)`
type CatalogEntry = (u32, &'static str, &'static str, &'static str, f64, &'static str, &'static str);

/// A 24-site subset of the production register, spread over four atolls.
const CATALOG: &[CatalogEntry] = &[
    (1, "Dhiffushi Harbour Area Solar Project", "K", "Dhiffushi", 41.16, "87394", "1/26/2018"),
    (4, "Adh. Omadhoo new PH", "ADH", "Omadhoo", 38.94, "19100006525", "28/Aug/2021"),
    (5, "Male' Powerhouse Bus Station", "K", "Male'", 6.6, "Nil", "22-Oct-20"),
    (6, "Stelco Store Building", "K", "Male'", 39.6, "19010000001", "5-Nov-20"),
    (7, "Stelco Bottling Plant", "K", "Male'", 47.52, "216609159", "27-Jan-21"),
    (10, "Stelco Vaadhavehi", "K", "Male'", 38.28, "214670318", "4-Jun-21"),
    (12, "MAN Engine Room (Upper roof)", "K", "Male'", 59.4, "214670381", "26-Jun-21"),
    (14, "Hulhumale' Store Roof", "K", "Hulhumale'", 127.2, "214670324", "25-Oct-21"),
    (15, "V. Thinadhoo new PH", "V", "Thinadhoo", 29.92, "21010030871", "12/5/2021"),
    (17, "Adh. Kunburudhoo PH", "ADH", "Kunburudhoo", 21.76, "21010030868", "17-Jan-22"),
    (18, "Adh. Dhigurah PH", "ADH", "Dhigurah", 38.08, "21010030890", "16-Feb-22"),
    (19, "K. Maafushi PH", "K", "Maafushi", 33.48, "21010030891", "19-Feb-22"),
    (20, "K. Himmafushi PH", "K", "Himmafushi", 44.64, "21010030892", "27-Feb-22"),
    (21, "K. Gaafaru PH", "K", "Gaafaru", 71.04, "19100006931", "14-Mar-22"),
    (22, "V. Fulidhoo PH", "V", "Fulidhoo", 16.32, "21010030894", "10-Mar-22"),
    (23, "Adh. Fenfushi PH", "ADH", "Fenfushi", 27.9, "21010030872", "18-Mar-22"),
    (25, "Aa. Bodufulhodhoo PH", "AA", "Bodufulhodhoo", 33.6, "21010030893", "29-May-22"),
    (27, "Aa. Feridhoo PH", "AA", "Feridhoo", 48.0, "21010030895", "5-Jun-22"),
    (29, "Thoddoo RO plant", "AA", "Thoddoo", 26.04, "21010030870", "23-Aug-22"),
    (31, "Aa. Mathiveri PH", "AA", "Mathiveri", 35.2, "21010030952", "25-Sep-22"),
    (32, "Omadhoo Sewerage Plant", "ADH", "Omadhoo", 18.6, "21010030951", "16-Nov-22"),
    (37, "K. Gulhi Sewerage Plant Roof", "K", "Gulhi", 19.2, "214670361", "9-Jan-23"),
    (46, "K. Thilafushi PH", "K", "Thilafushi", 102.99, "HMT0133220000118", "27-May-23"),
    (53, "Felidhoo PH", "V", "Felidhoo", 40.14, "503200109531", "20-May-24"),
];

/// Share of sites placed in the good band for the latest month (rounded up).
pub const GOOD_SHARE: f64 = 0.7;

/// Share of sites placed in the medium band for the latest month (rounded down).
pub const MEDIUM_SHARE: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Good,
    Medium,
    Low,
}

impl Tier {
    /// Fraction of expected generation for the latest month.
    fn factor(self, rng: &mut StdRng) -> f64 {
        let r: f64 = rng.random();
        match self {
            Tier::Good => 0.7 + r * 0.4,
            Tier::Medium => 0.51 + r * 0.18,
            Tier::Low => 0.3 + r * 0.2,
        }
    }
}

/// The demo site register.
pub fn demo_sites() -> Vec<Site> {
    CATALOG
        .iter()
        .map(|&(id, name, atoll, island, capacity_kw, meter, commissioned)| {
            Site::new(id, name, atoll, island, capacity_kw).with_metadata(meter, commissioned, None)
        })
        .collect()
}

/// Generates a demo snapshot with `months` monthly readings per site ending
/// at `through`.
///
/// In the `through` month a shuffled 70 % of sites run at 70-110 % of
/// expectation, 20 % at 51-69 % and the rest at 30-50 %. Earlier months run
/// at 60-110 %. Values are rounded to whole kWh. The same seed always yields
/// the same snapshot.
pub fn demo_snapshot(seed: u64, through: YearMonth, months: usize) -> FleetSnapshot {
    let mut rng = StdRng::seed_from_u64(seed);
    let sites = demo_sites();

    let mut order: Vec<usize> = (0..sites.len()).collect();
    order.shuffle(&mut rng);
    let good_count = (sites.len() as f64 * GOOD_SHARE).ceil() as usize;
    let medium_count = (sites.len() as f64 * MEDIUM_SHARE).floor() as usize;
    let mut tiers = vec![Tier::Low; sites.len()];
    for (rank, &idx) in order.iter().enumerate() {
        tiers[idx] = if rank < good_count {
            Tier::Good
        } else if rank < good_count + medium_count {
            Tier::Medium
        } else {
            Tier::Low
        };
    }

    let window = through.trailing(months);
    let mut readings = Vec::with_capacity(sites.len() * window.len());
    for (site, &tier) in sites.iter().zip(&tiers) {
        for &month in &window {
            let factor = if month == through {
                tier.factor(&mut rng)
            } else {
                0.6 + rng.random::<f64>() * 0.5
            };
            let value = (site.expected_monthly_kwh() * factor).round();
            readings.push(Reading::new(site.id(), month.to_string(), value));
        }
    }

    tracing::debug!(
        seed,
        through = %through,
        sites = sites.len(),
        readings = readings.len(),
        "generated demo fleet"
    );
    FleetSnapshot::new(sites, readings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{compute_group_stats, readings_for_month, resolve_latest_month};

    fn through() -> YearMonth {
        "2024-06".parse().expect("valid month")
    }

    #[test]
    fn same_seed_same_snapshot() {
        let a = demo_snapshot(7, through(), 12);
        let b = demo_snapshot(7, through(), 12);
        assert_eq!(a.readings, b.readings);
        let c = demo_snapshot(8, through(), 12);
        assert_ne!(a.readings, c.readings);
    }

    #[test]
    fn one_reading_per_site_month() {
        let snap = demo_snapshot(1, through(), 12);
        assert_eq!(snap.readings.len(), CATALOG.len() * 12);
        assert!(snap.validate().is_empty(), "{:?}", snap.validate());
        assert_eq!(resolve_latest_month(&snap.readings), Some("2024-06"));
    }

    #[test]
    fn values_are_whole_kwh() {
        let snap = demo_snapshot(3, through(), 3);
        assert!(snap.readings.iter().all(|r| r.value_kwh.fract() == 0.0));
    }

    #[test]
    fn latest_month_has_low_performers() {
        let snap = demo_snapshot(42, through(), 12);
        let month = readings_for_month(&snap.readings, "2024-06");
        let stats = compute_group_stats(&snap.sites, month.iter().copied());
        let expected_low = CATALOG.len()
            - (CATALOG.len() as f64 * GOOD_SHARE).ceil() as usize
            - (CATALOG.len() as f64 * MEDIUM_SHARE).floor() as usize;
        // rounding can lift a value sitting just under half of expectation
        assert!(
            (expected_low.saturating_sub(1)..=expected_low).contains(&stats.low_performing_count),
            "{} low performers, expected {expected_low}",
            stats.low_performing_count
        );
    }

    #[test]
    fn catalog_ids_are_unique() {
        let sites = demo_sites();
        let snap = FleetSnapshot::new(sites, Vec::new());
        assert!(snap.validate().is_empty());
    }
}
