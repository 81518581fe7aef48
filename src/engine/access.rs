//! Viewer roles and location scoping.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fleet::Site;

/// Location selector meaning "no restriction".
pub const ALL_LOCATIONS: &str = "all";

/// Viewer role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Sees every atoll.
    Admin,
    /// Operator scoped to one assigned location.
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role \"{0}\", expected ADMIN or USER")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "USER" => Ok(Role::User),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::User => write!(f, "USER"),
        }
    }
}

/// A signed-in viewer and the sites they may see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
    /// Ids of the sites this user may see.
    pub accessible_sites: Vec<u32>,
}

impl User {
    /// An administrator with access to every site in `sites`.
    pub fn admin_for(name: impl Into<String>, sites: &[Site]) -> Self {
        Self {
            id: "admin".to_string(),
            name: name.into(),
            role: Role::Admin,
            accessible_sites: sites.iter().map(Site::id).collect(),
        }
    }
}

/// A parsed `"<atoll>. <island>"` selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location<'a> {
    pub atoll: &'a str,
    /// Empty when the selector carries no `.` separator.
    pub island: &'a str,
}

impl<'a> Location<'a> {
    /// Splits at the first `.`; the island part is trimmed of the leading space.
    pub fn parse(label: &'a str) -> Self {
        match label.split_once('.') {
            Some((atoll, island)) => Self {
                atoll,
                island: island.trim_start(),
            },
            None => Self {
                atoll: label,
                island: "",
            },
        }
    }
}

fn is_unrestricted(selected_location: Option<&str>) -> bool {
    match selected_location {
        None | Some(ALL_LOCATIONS) => true,
        Some(label) => label.trim().is_empty(),
    }
}

/// Restricts which atoll groups a viewer may see.
///
/// Admins, and viewers with no location, a blank one, or `"all"`, see
/// every atoll. Any
/// other viewer sees only the atoll named before the first `.` of the
/// selected location. The result is sorted ascending.
///
/// # Examples
///
/// ```
/// use solar_fleet::engine::{Role, filter_visible_atolls};
///
/// let all = ["K", "ADH", "AA"];
/// assert_eq!(filter_visible_atolls(&all, Role::User, Some("K. Male'")), vec!["K"]);
/// assert_eq!(filter_visible_atolls(&all, Role::Admin, Some("K. Male'")), vec!["AA", "ADH", "K"]);
/// ```
pub fn filter_visible_atolls<S: AsRef<str>>(
    all_atoll_names: &[S],
    role: Role,
    selected_location: Option<&str>,
) -> Vec<String> {
    let mut names: Vec<String> = all_atoll_names
        .iter()
        .map(|n| n.as_ref().to_string())
        .collect();
    names.sort();

    if role == Role::Admin || is_unrestricted(selected_location) {
        return names;
    }

    let selected = selected_location.map(Location::parse);
    names.retain(|n| selected.as_ref().is_some_and(|loc| loc.atoll == n.as_str()));
    names
}

/// Sites whose id is in the user's access list.
pub fn accessible_sites<'a>(user: &User, sites: &'a [Site]) -> Vec<&'a Site> {
    sites
        .iter()
        .filter(|s| user.accessible_sites.contains(&s.id()))
        .collect()
}

/// Accessible sites narrowed to the exact selected `"<atoll>. <island>"`.
///
/// `None`, a blank label, or `"all"` keeps every accessible site.
pub fn scope_sites<'a>(
    user: &User,
    sites: &'a [Site],
    selected_location: Option<&str>,
) -> Vec<&'a Site> {
    let accessible = accessible_sites(user, sites);
    match selected_location {
        Some(label) if !is_unrestricted(selected_location) => accessible
            .into_iter()
            .filter(|s| s.location_label() == label)
            .collect(),
        _ => accessible,
    }
}

/// Sorted, de-duplicated `"<atoll>. <island>"` labels for location selection.
pub fn location_options(sites: &[Site]) -> Vec<String> {
    sites
        .iter()
        .map(Site::location_label)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
