use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Column names and fixed selector values
// ---------------------------------------------------------------------------

pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";
pub const COL_BOOSTER_VERSION: &str = "Booster Version";
pub const COL_CLASS: &str = "class";

/// Columns the loader refuses to start without.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    COL_LAUNCH_SITE,
    COL_PAYLOAD_MASS,
    COL_BOOSTER_CATEGORY,
    COL_BOOSTER_VERSION,
    COL_CLASS,
];

/// Dropdown value meaning "no site restriction".
pub const ALL_SITES: &str = "ALL";

/// Launch sites offered by the dropdown, in display order.
pub const KNOWN_SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

pub const SLIDER_MIN: f64 = 0.0;
pub const SLIDER_MAX: f64 = 10_000.0;
pub const SLIDER_STEP: f64 = 1_000.0;

// ---------------------------------------------------------------------------
// OutcomeClass – the binary `class` column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OutcomeClass {
    Failure = 0,
    Success = 1,
}

impl OutcomeClass {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(OutcomeClass::Failure),
            1 => Some(OutcomeClass::Success),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_success(self) -> bool {
        self == OutcomeClass::Success
    }
}

impl fmt::Display for OutcomeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the CSV
// ---------------------------------------------------------------------------

/// A single launch. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    pub launch_site: String,
    pub payload_mass_kg: f64,
    /// Coarse booster family, used for colour grouping.
    pub booster_version_category: String,
    /// Exact booster identifier, display only.
    pub booster_version: String,
    pub outcome_class: OutcomeClass,
}

// ---------------------------------------------------------------------------
// SiteSelector
// ---------------------------------------------------------------------------

/// Current dropdown value: either every site or one named site.
///
/// Any string other than `"ALL"` becomes `Site(..)`, including names that
/// match no record. Those simply filter down to nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelector {
    #[default]
    All,
    Site(String),
}

impl SiteSelector {
    pub fn site(name: impl Into<String>) -> Self {
        SiteSelector::Site(name.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, SiteSelector::All)
    }

    /// Whether a record at `launch_site` passes this selector.
    pub fn matches(&self, launch_site: &str) -> bool {
        match self {
            SiteSelector::All => true,
            SiteSelector::Site(s) => s == launch_site,
        }
    }
}

impl FromStr for SiteSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == ALL_SITES {
            SiteSelector::All
        } else {
            SiteSelector::Site(s.to_string())
        })
    }
}

impl fmt::Display for SiteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelector::All => write!(f, "{ALL_SITES}"),
            SiteSelector::Site(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// PayloadRange
// ---------------------------------------------------------------------------

/// Inclusive payload interval in kilograms.
///
/// `low > high` is allowed and contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// The slider's full extent, `[0, 10000]`.
    pub fn full() -> Self {
        Self::new(SLIDER_MIN, SLIDER_MAX)
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }
}

impl Default for PayloadRange {
    fn default() -> Self {
        Self::full()
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed summaries.
#[derive(Debug, Clone, Default)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    sites: BTreeSet<String>,
    payload_bounds: Option<(f64, f64)>,
}

impl LaunchDataset {
    /// Build summaries from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let sites: BTreeSet<String> = records.iter().map(|r| r.launch_site.clone()).collect();

        let payload_bounds = records.iter().map(|r| r.payload_mass_kg).fold(None, |acc, p| {
            Some(match acc {
                None => (p, p),
                Some((lo, hi)) => (f64::min(lo, p), f64::max(hi, p)),
            })
        });

        LaunchDataset {
            records,
            sites,
            payload_bounds,
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Distinct launch sites present, sorted.
    pub fn sites(&self) -> &BTreeSet<String> {
        &self.sites
    }

    /// Observed `(min, max)` payload, `None` for an empty dataset.
    pub fn payload_bounds(&self) -> Option<(f64, f64)> {
        self.payload_bounds
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
