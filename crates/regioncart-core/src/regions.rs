//! Region configuration and the two-region pairing the crawl runs over.

use std::fmt;
use std::str::FromStr;

use crate::products::MerchantId;
use crate::ConfigError;

/// A region as configured: numeric API identifier plus short name
/// (e.g. `1` / `"msc"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSpec {
    pub id: u32,
    pub name: String,
}

/// A region after bootstrap, bound to the merchant the API serves it from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub id: u32,
    pub name: String,
    pub merchant_id: MerchantId,
}

/// Which side of the comparison a region is on. The primary region's
/// catalog drives page counts and result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionRole {
    Primary,
    Secondary,
}

impl RegionRole {
    pub const ALL: [RegionRole; 2] = [RegionRole::Primary, RegionRole::Secondary];
}

/// One value per region role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerRegion<T> {
    pub primary: T,
    pub secondary: T,
}

impl<T> PerRegion<T> {
    pub fn new(primary: T, secondary: T) -> Self {
        Self { primary, secondary }
    }

    pub fn get(&self, role: RegionRole) -> &T {
        match role {
            RegionRole::Primary => &self.primary,
            RegionRole::Secondary => &self.secondary,
        }
    }

    pub fn get_mut(&mut self, role: RegionRole) -> &mut T {
        match role {
            RegionRole::Primary => &mut self.primary,
            RegionRole::Secondary => &mut self.secondary,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> PerRegion<U> {
        PerRegion {
            primary: f(self.primary),
            secondary: f(self.secondary),
        }
    }

    /// Iterates `(role, value)` with the primary region first.
    pub fn iter(&self) -> impl Iterator<Item = (RegionRole, &T)> {
        RegionRole::ALL.into_iter().map(move |role| (role, self.get(role)))
    }
}

/// The ordered pair of regions to compare, parsed from `"1=msc,2=spb"`.
pub type RegionPair = PerRegion<RegionSpec>;

impl FromStr for PerRegion<RegionSpec> {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let specs = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_region_spec)
            .collect::<Result<Vec<_>, _>>()?;

        let [primary, secondary]: [RegionSpec; 2] = specs.try_into().map_err(|v: Vec<_>| {
            ConfigError::InvalidRegions(format!("expected exactly 2 regions, got {}", v.len()))
        })?;

        if primary.id == secondary.id || primary.name == secondary.name {
            return Err(ConfigError::InvalidRegions(format!(
                "regions must be distinct, got {primary} and {secondary}"
            )));
        }

        Ok(Self { primary, secondary })
    }
}

fn parse_region_spec(entry: &str) -> Result<RegionSpec, ConfigError> {
    let (id, name) = entry
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidRegions(format!("'{entry}' is not of the form id=name")))?;
    let id = id
        .trim()
        .parse::<u32>()
        .map_err(|e| ConfigError::InvalidRegions(format!("bad region id in '{entry}': {e}")))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(ConfigError::InvalidRegions(format!(
            "region {id} has an empty name"
        )));
    }
    Ok(RegionSpec {
        id,
        name: name.to_owned(),
    })
}

impl fmt::Display for RegionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.id, self.name)
    }
}
