//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use solar_fleet::engine::{Role, User, Viewer};
use solar_fleet::fleet::{FleetSnapshot, Reading, Site};

/// Two atolls: `K` (Male' and Dhiffushi) and `ADH` (Omadhoo), 40 kW each,
/// so every site expects 5400 kWh per month.
pub fn two_atoll_sites() -> Vec<Site> {
    vec![
        Site::new(1, "Male' A", "K", "Male'", 40.0),
        Site::new(2, "Male' B", "K", "Male'", 40.0),
        Site::new(3, "Dhiffushi", "K", "Dhiffushi", 40.0),
        Site::new(4, "Omadhoo", "ADH", "Omadhoo", 40.0),
    ]
}

/// March 2024 readings at 50 %, 100 %, 75 % and 45 % of expectation, plus
/// older February readings that must be ignored.
pub fn march_readings() -> Vec<Reading> {
    vec![
        Reading::new(1, "2024-02", 100.0),
        Reading::new(2, "2024-02", 100.0),
        Reading::new(1, "2024-03", 2700.0),
        Reading::new(2, "2024-03", 5400.0),
        Reading::new(3, "2024-03", 4050.0),
        Reading::new(4, "2024-03", 2430.0),
    ]
}

pub fn snapshot() -> FleetSnapshot {
    FleetSnapshot::new(two_atoll_sites(), march_readings())
}

pub fn admin(sites: &[Site]) -> Viewer {
    Viewer::new(User::admin_for("Administrator", sites), None)
}

/// Operator with access to every site in `sites`, scoped to `location`.
pub fn operator(sites: &[Site], location: &str) -> Viewer {
    Viewer::new(
        User {
            id: "operator".to_string(),
            name: "Operator".to_string(),
            role: Role::User,
            accessible_sites: sites.iter().map(Site::id).collect(),
        },
        Some(location.to_string()),
    )
}
