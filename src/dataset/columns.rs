//! Dashboard column catalogue
//!
//! The outcome and indicator columns a user may select. Each variant's
//! column name doubles as its display label.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// State abbreviation column, the geographic key for the map
pub const STATE_COLUMN: &str = "State";

/// Full location name column, used as the map hover title
pub const LOCATION_COLUMN: &str = "Location";

/// A selection value outside the enumerated options
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} column: {value}")]
pub struct UnknownColumn {
    pub kind: &'static str,
    pub value: String,
}

/// Measured dental-health statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "Treated Untreated Decay")]
    TreatedUntreatedDecay,
    #[serde(rename = "Untreated Decay")]
    UntreatedDecay,
    #[default]
    #[serde(rename = "Sealants")]
    Sealants,
}

impl Outcome {
    pub const ALL: [Outcome; 3] = [
        Outcome::TreatedUntreatedDecay,
        Outcome::UntreatedDecay,
        Outcome::Sealants,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            Outcome::TreatedUntreatedDecay => "Treated Untreated Decay",
            Outcome::UntreatedDecay => "Untreated Decay",
            Outcome::Sealants => "Sealants",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Outcome {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Outcome::ALL
            .into_iter()
            .find(|o| o.column() == s)
            .ok_or_else(|| UnknownColumn {
                kind: "outcome",
                value: s.to_string(),
            })
    }
}

/// Explanatory statistic correlated against an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Indicator {
    #[default]
    #[serde(rename = "Avg Fluoride Concentration 2020")]
    AvgFluorideConcentration2020,
    #[serde(rename = "Fluoridated Total 2020")]
    FluoridatedTotal2020,
    #[serde(rename = "Fluoridated Adjusted 2020")]
    FluoridatedAdjusted2020,
    #[serde(rename = "Fluoridated Consecutive 2020")]
    FluoridatedConsecutive2020,
    #[serde(rename = "Fluoridated Natural 2020")]
    FluoridatedNatural2020,
    #[serde(rename = "Non Fluoridated 2020")]
    NonFluoridated2020,
    #[serde(rename = "Percent of Need Met")]
    PercentOfNeedMet,
    #[serde(rename = "Practitioners Needed to Remove HPSA Designation")]
    PractitionersNeeded,
}

impl Indicator {
    pub const ALL: [Indicator; 8] = [
        Indicator::AvgFluorideConcentration2020,
        Indicator::FluoridatedTotal2020,
        Indicator::FluoridatedAdjusted2020,
        Indicator::FluoridatedConsecutive2020,
        Indicator::FluoridatedNatural2020,
        Indicator::NonFluoridated2020,
        Indicator::PercentOfNeedMet,
        Indicator::PractitionersNeeded,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            Indicator::AvgFluorideConcentration2020 => "Avg Fluoride Concentration 2020",
            Indicator::FluoridatedTotal2020 => "Fluoridated Total 2020",
            Indicator::FluoridatedAdjusted2020 => "Fluoridated Adjusted 2020",
            Indicator::FluoridatedConsecutive2020 => "Fluoridated Consecutive 2020",
            Indicator::FluoridatedNatural2020 => "Fluoridated Natural 2020",
            Indicator::NonFluoridated2020 => "Non Fluoridated 2020",
            Indicator::PercentOfNeedMet => "Percent of Need Met",
            Indicator::PractitionersNeeded => "Practitioners Needed to Remove HPSA Designation",
        }
    }

    /// Decimal places the indicator is rounded to before charting, if any
    pub fn rounding(&self) -> Option<u32> {
        match self {
            Indicator::AvgFluorideConcentration2020 => Some(2),
            _ => None,
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Indicator {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Indicator::ALL
            .into_iter()
            .find(|i| i.column() == s)
            .ok_or_else(|| UnknownColumn {
                kind: "indicator",
                value: s.to_string(),
            })
    }
}

/// The pair of columns currently chosen in the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Selection {
    pub outcome: Outcome,
    pub indicator: Indicator,
}

impl Selection {
    pub fn new(outcome: Outcome, indicator: Indicator) -> Self {
        Self { outcome, indicator }
    }

    /// Parse a selection from raw column names
    pub fn parse(outcome: &str, indicator: &str) -> Result<Self, UnknownColumn> {
        Ok(Self {
            outcome: outcome.parse()?,
            indicator: indicator.parse()?,
        })
    }

    /// Every selectable pair, outcomes first
    pub fn all() -> impl Iterator<Item = Selection> {
        Outcome::ALL.into_iter().flat_map(|outcome| {
            Indicator::ALL
                .into_iter()
                .map(move |indicator| Selection::new(outcome, indicator))
        })
    }
}
