use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::LaunchRecord;

/// Dropdown value meaning "every launch site".
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Site selector
// ---------------------------------------------------------------------------

/// Value of the site dropdown: the `ALL` sentinel or one site name.
///
/// Serialized as a bare string, so `"ALL"` round-trips to [`SiteSelector::All`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SiteSelector {
    #[default]
    All,
    Site(String),
}

impl From<String> for SiteSelector {
    fn from(value: String) -> Self {
        if value == ALL_SITES {
            SiteSelector::All
        } else {
            SiteSelector::Site(value)
        }
    }
}

impl From<&str> for SiteSelector {
    fn from(value: &str) -> Self {
        SiteSelector::from(value.to_string())
    }
}

impl From<SiteSelector> for String {
    fn from(value: SiteSelector) -> Self {
        match value {
            SiteSelector::All => ALL_SITES.to_string(),
            SiteSelector::Site(name) => name,
        }
    }
}

impl fmt::Display for SiteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelector::All => f.write_str(ALL_SITES),
            SiteSelector::Site(name) => f.write_str(name),
        }
    }
}

// ---------------------------------------------------------------------------
// Payload range
// ---------------------------------------------------------------------------

/// Inclusive payload window `[low, high]` in kilograms.
///
/// `low <= high` is not enforced; an inverted window matches nothing.
/// Serialized as a two-element array, the shape the range slider emits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Both bounds inclusive.
    pub fn contains(&self, payload_kg: f64) -> bool {
        self.low <= payload_kg && payload_kg <= self.high
    }
}

impl From<[f64; 2]> for PayloadRange {
    fn from([low, high]: [f64; 2]) -> Self {
        Self { low, high }
    }
}

impl From<PayloadRange> for [f64; 2] {
    fn from(range: PayloadRange) -> Self {
        [range.low, range.high]
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Keep the launches of the selected site, or everything for [`SiteSelector::All`].
///
/// An unknown site name is not an error: it simply matches no record.
pub fn by_site<'a, I>(records: I, site: &SiteSelector) -> Vec<&'a LaunchRecord>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    match site {
        SiteSelector::All => records.into_iter().collect(),
        SiteSelector::Site(name) => records
            .into_iter()
            .filter(|rec| rec.launch_site == *name)
            .collect(),
    }
}

/// Keep the launches whose payload mass falls inside `range`.
pub fn by_payload<'a, I>(records: I, range: &PayloadRange) -> Vec<&'a LaunchRecord>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    records
        .into_iter()
        .filter(|rec| range.contains(rec.payload_mass_kg))
        .collect()
}
