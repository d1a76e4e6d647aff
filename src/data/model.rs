use std::fmt;

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome as recorded in the `class` column (1 = success, 0 = failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Interpret a numeric class value. Only exact 0 and 1 are accepted.
    pub fn from_class(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(Outcome::Failure)
        } else if value == 1.0 {
            Some(Outcome::Success)
        } else {
            None
        }
    }

    /// Numeric class value, used as the scatter y coordinate.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// `Flight Number`, when the file carries it.
    pub flight_number: Option<u32>,
    /// `Launch Site`.
    pub launch_site: String,
    /// `Payload Mass (kg)`, never negative.
    pub payload_mass_kg: f64,
    /// `class`.
    pub outcome: Outcome,
    /// `Booster Version`.
    pub booster_version: String,
    /// `Booster Version Category`, when the file carries it.
    pub booster_category: Option<String>,
}

impl LaunchRecord {
    /// Hover text shown next to a scatter point.
    pub fn describe(&self) -> String {
        let mut text = match self.flight_number {
            Some(n) => format!("Flight {n} · {} · {}", self.launch_site, self.booster_version),
            None => format!("{} · {}", self.launch_site, self.booster_version),
        };
        if let Some(category) = &self.booster_category {
            text.push_str(&format!(" ({category})"));
        }
        text
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed category indices.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct LaunchDataset {
    /// All launches, in file order.
    pub records: Vec<LaunchRecord>,
    /// Distinct launch sites in order of first appearance.
    pub sites: Vec<String>,
    /// Distinct booster versions in order of first appearance.
    pub booster_versions: Vec<String>,
    /// Smallest and largest payload mass, `None` for an empty table.
    pub payload_bounds: Option<(f64, f64)>,
}

impl LaunchDataset {
    /// Build category indices from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: Vec<String> = Vec::new();
        let mut booster_versions: Vec<String> = Vec::new();
        let mut payload_bounds: Option<(f64, f64)> = None;

        for rec in &records {
            if !sites.contains(&rec.launch_site) {
                sites.push(rec.launch_site.clone());
            }
            if !booster_versions.contains(&rec.booster_version) {
                booster_versions.push(rec.booster_version.clone());
            }
            let m = rec.payload_mass_kg;
            payload_bounds = Some(match payload_bounds {
                Some((lo, hi)) => (lo.min(m), hi.max(m)),
                None => (m, m),
            });
        }

        LaunchDataset {
            records,
            sites,
            booster_versions,
            payload_bounds,
        }
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
