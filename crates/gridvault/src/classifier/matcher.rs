use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Time-bucket classification of a telemetry artifact. Determines both the
/// content-store partition and the catalog record set an artifact belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Hourly,
    Daily,
    Weekly,
}

impl Granularity {
    pub const ALL: [Granularity; 3] = [
        Granularity::Hourly,
        Granularity::Daily,
        Granularity::Weekly,
    ];

    /// The literal token that prefixes filenames of this granularity. Also
    /// names the content-store partition directory.
    pub fn token(&self) -> &'static str {
        match self {
            Granularity::Hourly => "hourly",
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
        }
    }

    /// The catalog table holding entries of this granularity. Total on the
    /// enum, so every recognized artifact has exactly one record set.
    pub fn table_name(&self) -> &'static str {
        match self {
            Granularity::Hourly => "hourly_data",
            Granularity::Daily => "daily_data",
            Granularity::Weekly => "weekly_data",
        }
    }

    /// Parses an untrusted granularity token, e.g. from a query parameter.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "hourly" => Some(Granularity::Hourly),
            "daily" => Some(Granularity::Daily),
            "weekly" => Some(Granularity::Weekly),
            _ => None,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Kind of generation data carried by a telemetry file. Validated during
/// classification but not persisted in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyKind {
    Solar,
    Wind,
}

impl EnergyKind {
    pub fn token(&self) -> &'static str {
        match self {
            EnergyKind::Solar => "solar",
            EnergyKind::Wind => "wind",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "solar" => Some(EnergyKind::Solar),
            "wind" => Some(EnergyKind::Wind),
            _ => None,
        }
    }
}

impl fmt::Display for EnergyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Outcome of applying the naming grammar to a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The filename matched a granularity grammar.
    Recognized {
        granularity: Granularity,
        energy_kind: EnergyKind,
    },
    /// No grammar matched. The artifact is still stored, under the fallback
    /// partition, but never cataloged. Not an error: malformed and foreign
    /// filenames are valid input.
    Unrecognized,
}

impl Classification {
    pub fn is_recognized(&self) -> bool {
        matches!(self, Classification::Recognized { .. })
    }

    pub fn granularity(&self) -> Option<Granularity> {
        match self {
            Classification::Recognized { granularity, .. } => Some(*granularity),
            Classification::Unrecognized => None,
        }
    }
}

/// Classifies upload filenames against the telemetry naming grammar.
///
/// One grammar per granularity, all pre-compiled at construction:
///
/// `{granularity}_{solar|wind}_data_{YYYY}_{MM}_{DD}T{HH}_{MM}_{SS}_{mmm}Z.json`
///
/// The grammars are mutually exclusive (the granularity token is a fixed
/// literal prefix of each), so evaluation order cannot change the outcome.
/// Classification is filename-only; content and declared media type are
/// never consulted.
pub struct FilenameClassifier {
    grammars: Vec<(Granularity, Regex)>,
}

impl FilenameClassifier {
    pub fn new() -> Self {
        let grammars = Granularity::ALL
            .iter()
            .map(|&granularity| {
                let pattern = format!(
                    r"^{}_(solar|wind)_data_\d{{4}}_\d{{2}}_\d{{2}}T\d{{2}}_\d{{2}}_\d{{2}}_\d{{3}}Z\.json$",
                    granularity.token()
                );
                let grammar = Regex::new(&pattern).expect("grammar pattern is valid");
                (granularity, grammar)
            })
            .collect();

        Self { grammars }
    }

    /// Pure filename classification. Same input always yields the same
    /// output; no I/O.
    pub fn classify(&self, filename: &str) -> Classification {
        for (granularity, grammar) in &self.grammars {
            if let Some(captures) = grammar.captures(filename) {
                if let Some(energy_kind) =
                    captures.get(1).and_then(|m| EnergyKind::parse(m.as_str()))
                {
                    return Classification::Recognized {
                        granularity: *granularity,
                        energy_kind,
                    };
                }
            }
        }

        Classification::Unrecognized
    }
}

impl Default for FilenameClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Loose granularity inference for the convenience lookup path: substring
/// presence, not the full grammar. Never used to route writes.
pub fn infer_granularity(filename: &str) -> Option<Granularity> {
    Granularity::ALL
        .iter()
        .copied()
        .find(|g| filename.contains(g.token()))
}
