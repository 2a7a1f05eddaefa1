//! Workflow domain types for the data-entry wizard.

use std::fmt;

use serde::{Deserialize, Serialize};

use quoin_shared::types::{PropertyId, UnitId};

/// Signal carried by a unit-step submission.
///
/// Consumed only by the sequencer; it never changes what gets written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSignal {
    /// Stay in the rent roll and enter another unit.
    Continue,
    /// Rent roll is complete, go to the quote list.
    Finish,
    /// Move on to editing the next unit in the roll.
    Advance,
}

impl UnitSignal {
    /// Returns the string representation of the signal.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Continue => "continue",
            Self::Finish => "finish",
            Self::Advance => "advance",
        }
    }

    /// Parses a signal from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "continue" => Some(Self::Continue),
            "finish" => Some(Self::Finish),
            "advance" => Some(Self::Advance),
            _ => None,
        }
    }
}

impl fmt::Display for UnitSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The next step a client should present after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum WizardStep {
    /// Enter (or revise) the property's expense schedule.
    EnterExpenses {
        /// The property being quoted.
        property_id: PropertyId,
    },
    /// Enter (or revise) the property's cap rate.
    EnterCapRate {
        /// The property being quoted.
        property_id: PropertyId,
    },
    /// Add a new unit to the rent roll.
    CreateUnit {
        /// The property being quoted.
        property_id: PropertyId,
    },
    /// Edit an existing unit in the rent roll.
    EditUnit {
        /// The property being quoted.
        property_id: PropertyId,
        /// The unit to edit.
        unit_id: UnitId,
    },
    /// Entry is complete, show the quote list.
    QuoteList,
}

/// A unit's identity within the rent roll, as the sequencer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRef {
    /// The unit's ID.
    pub id: UnitId,
    /// The unit's number within the property.
    pub unit_number: String,
}

#[cfg(test)]
mod signal_tests {
    use super::*;

    #[test]
    fn test_signal_as_str() {
        assert_eq!(UnitSignal::Continue.as_str(), "continue");
        assert_eq!(UnitSignal::Finish.as_str(), "finish");
        assert_eq!(UnitSignal::Advance.as_str(), "advance");
    }

    #[test]
    fn test_signal_parse() {
        assert_eq!(UnitSignal::parse("continue"), Some(UnitSignal::Continue));
        assert_eq!(UnitSignal::parse("FINISH"), Some(UnitSignal::Finish));
        assert_eq!(UnitSignal::parse("Advance"), Some(UnitSignal::Advance));
        assert_eq!(UnitSignal::parse("delete"), None);
        assert_eq!(UnitSignal::parse(""), None);
    }

    #[test]
    fn test_signal_display() {
        assert_eq!(format!("{}", UnitSignal::Continue), "continue");
        assert_eq!(format!("{}", UnitSignal::Advance), "advance");
    }
}
