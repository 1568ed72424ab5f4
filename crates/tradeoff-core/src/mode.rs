//! Matching topologies.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Cardinality shape of an explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MatchMode {
    /// Every Con is offset by its own Pro; each Pro is used at most once.
    OneToOne,
    /// A leader Pro offsets a set of Cons.
    OneToMany,
    /// A set of Pros offsets a single Con, using the fewest pairs.
    ManyToOne,
    /// Each Con is either absorbed by a Pro set or delegated to a leader.
    #[default]
    Combined,
}

impl MatchMode {
    pub const ALL: [MatchMode; 4] = [
        MatchMode::OneToOne,
        MatchMode::OneToMany,
        MatchMode::ManyToOne,
        MatchMode::Combined,
    ];

    /// Short label, as used in explanation headers and file names.
    pub fn label(&self) -> &'static str {
        match self {
            MatchMode::OneToOne => "1-1",
            MatchMode::OneToMany => "1-m",
            MatchMode::ManyToOne => "m-1",
            MatchMode::Combined => "combined",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::OneToOne => write!(f, "OneToOne"),
            MatchMode::OneToMany => write!(f, "OneToMany"),
            MatchMode::ManyToOne => write!(f, "ManyToOne"),
            MatchMode::Combined => write!(f, "Combined"),
        }
    }
}

/// Error returned when parsing an unknown mode name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown match mode '{0}' (expected one of: 1-1, 1-m, m-1, combined)")]
pub struct ParseModeError(pub String);

impl FromStr for MatchMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "1-1" | "one-to-one" | "onetoone" => Ok(MatchMode::OneToOne),
            "1-m" | "one-to-many" | "onetomany" => Ok(MatchMode::OneToMany),
            "m-1" | "many-to-one" | "manytoone" => Ok(MatchMode::ManyToOne),
            "combined" | "mixed" => Ok(MatchMode::Combined),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("1-1".parse::<MatchMode>().unwrap(), MatchMode::OneToOne);
        assert_eq!("one_to_many".parse::<MatchMode>().unwrap(), MatchMode::OneToMany);
        assert_eq!("ManyToOne".parse::<MatchMode>().unwrap(), MatchMode::ManyToOne);
        assert_eq!(" Combined ".parse::<MatchMode>().unwrap(), MatchMode::Combined);
        assert!("2-2".parse::<MatchMode>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for mode in MatchMode::ALL {
            assert_eq!(mode.to_string().parse::<MatchMode>().unwrap(), mode);
            assert_eq!(mode.label().parse::<MatchMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_default_is_combined() {
        assert_eq!(MatchMode::default(), MatchMode::Combined);
    }
}
