//! Session format presets.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A scoring layout: which positions exist and how the session is labelled
/// in exports and in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// A single bout.
    Individual,
    /// Eight independent bouts side by side.
    Bank,
    /// Senpo, Chuken, Taisho.
    ThreeMan,
    /// Senpo, Jiho, Chuken, Fukusho, Taisho.
    #[default]
    FiveMan,
}

impl Format {
    pub const ALL: [Format; 4] = [
        Format::Individual,
        Format::Bank,
        Format::ThreeMan,
        Format::FiveMan,
    ];

    /// Default position labels, in bout order.
    pub fn positions(self) -> &'static [&'static str] {
        match self {
            Format::Individual => &["Shiai"],
            Format::Bank => &["1", "2", "3", "4", "5", "6", "7", "8"],
            Format::ThreeMan => &["Senpo", "Chuken", "Taisho"],
            Format::FiveMan => &["Senpo", "Jiho", "Chuken", "Fukusho", "Taisho"],
        }
    }

    /// `Match Type` column of the CSV report.
    pub fn match_type(self) -> &'static str {
        match self {
            Format::Individual | Format::Bank => "Individual",
            Format::ThreeMan => "3-Man Team",
            Format::FiveMan => "Team",
        }
    }

    pub fn export_prefix(self) -> &'static str {
        match self {
            Format::Individual | Format::Bank => "kendo-individual",
            Format::ThreeMan => "kendo-3man-match",
            Format::FiveMan => "kendo-match",
        }
    }

    /// Key the session record is persisted under unless configured otherwise.
    pub fn storage_key(self) -> &'static str {
        match self {
            Format::Individual => "kendo-individual",
            Format::Bank => "kendo-bank",
            Format::ThreeMan => "kendo-team-3",
            Format::FiveMan => "kendo-team",
        }
    }

    /// Whether a daihyosha (representative bout) may be fought.
    pub fn allows_representative(self) -> bool {
        matches!(self, Format::ThreeMan | Format::FiveMan)
    }

    pub fn name(self) -> &'static str {
        match self {
            Format::Individual => "individual",
            Format::Bank => "bank",
            Format::ThreeMan => "three-man",
            Format::FiveMan => "five-man",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unknown format name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown format '{0}' (expected individual, bank, three-man or five-man)")]
pub struct ParseFormatError(pub String);

impl FromStr for Format {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "individual" | "single" => Ok(Format::Individual),
            "bank" => Ok(Format::Bank),
            "three-man" | "3-man" | "3" => Ok(Format::ThreeMan),
            "five-man" | "5-man" | "5" | "team" => Ok(Format::FiveMan),
            _ => Err(ParseFormatError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(Format::FiveMan.positions().len(), 5);
        assert_eq!(Format::ThreeMan.positions(), &["Senpo", "Chuken", "Taisho"]);
        assert_eq!(Format::Bank.positions().len(), 8);
        assert!(!Format::Individual.allows_representative());
        assert!(Format::ThreeMan.allows_representative());
        assert_eq!(Format::ThreeMan.export_prefix(), "kendo-3man-match");
    }

    #[test]
    fn test_parse_round_trips_name() {
        for format in Format::ALL {
            assert_eq!(format.name().parse::<Format>(), Ok(format));
        }
        assert!("relay".parse::<Format>().is_err());
    }
}
