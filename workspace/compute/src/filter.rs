//! Scenario resolution.
//!
//! Every record carries a scenario tag (`ALL` or an upper-case code such as
//! `A`) and an include toggle. A scenario filter selects which records take
//! part in a computation: records tagged `ALL` belong to every scenario, and
//! the `ALL` filter accepts every record. Excluded records never match,
//! whatever their tag.

use model::entities::asset::IncludeToggle;
use model::entities::{asset, bill, expense, income, liability};

use crate::error::{ComputeError, Result};

/// The reserved tag that places a record in every scenario.
pub const ALL_TAG: &str = "ALL";

/// A scenario filter selected by the caller, either `ALL` or a single code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioFilter {
    /// Accept every included record regardless of its tag.
    All,
    /// Accept included records tagged with this code or with `ALL`.
    Code(String),
}

impl ScenarioFilter {
    /// Parses a filter string, validating the code shape.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed == ALL_TAG {
            return Ok(ScenarioFilter::All);
        }
        if is_valid_code(trimmed) {
            return Ok(ScenarioFilter::Code(trimmed.to_string()));
        }
        Err(ComputeError::InvalidScenarioTag(raw.to_string()))
    }

    /// Returns true when a record tagged `tag` belongs to this filter.
    pub fn matches(&self, tag: &str) -> bool {
        if tag == ALL_TAG {
            return true;
        }
        match self {
            ScenarioFilter::All => true,
            ScenarioFilter::Code(code) => code == tag,
        }
    }

    /// The wire representation of this filter.
    pub fn as_str(&self) -> &str {
        match self {
            ScenarioFilter::All => ALL_TAG,
            ScenarioFilter::Code(code) => code,
        }
    }
}

impl std::fmt::Display for ScenarioFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returns true for a well-formed scenario code: non-empty, upper-case
/// alphanumeric, and not the reserved `ALL` tag.
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty()
        && code != ALL_TAG
        && code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

/// Returns true for a valid record tag: `ALL` or a scenario code.
pub fn is_valid_tag(tag: &str) -> bool {
    tag == ALL_TAG || is_valid_code(tag)
}

/// Validates a record tag, for use on the write path.
pub fn validate_tag(tag: &str) -> Result<()> {
    if is_valid_tag(tag) {
        Ok(())
    } else {
        Err(ComputeError::InvalidScenarioTag(tag.to_string()))
    }
}

/// Validates a scenario code (never `ALL`), for use on the write path.
pub fn validate_code(code: &str) -> Result<()> {
    if is_valid_code(code) {
        Ok(())
    } else {
        Err(ComputeError::InvalidScenarioCode(code.to_string()))
    }
}

/// Anything that carries a scenario tag and an include toggle.
pub trait ScenarioScoped {
    fn scenario_tag(&self) -> &str;
    fn include_toggle(&self) -> IncludeToggle;

    fn is_included(&self) -> bool {
        self.include_toggle() == IncludeToggle::On
    }
}

macro_rules! impl_scenario_scoped {
    ($($entity:ident),+ $(,)?) => {
        $(
            impl ScenarioScoped for $entity::Model {
                fn scenario_tag(&self) -> &str {
                    &self.scenario
                }

                fn include_toggle(&self) -> IncludeToggle {
                    self.include_toggle
                }
            }
        )+
    };
}

impl_scenario_scoped!(asset, liability, income, expense, bill);

/// The resolver: a record takes part in a computation when its include
/// toggle is on and its tag belongs to the filter.
pub fn applies<R: ScenarioScoped>(record: &R, filter: &ScenarioFilter) -> bool {
    record.is_included() && filter.matches(record.scenario_tag())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        tag: &'static str,
        toggle: IncludeToggle,
    }

    impl ScenarioScoped for Row {
        fn scenario_tag(&self) -> &str {
            self.tag
        }

        fn include_toggle(&self) -> IncludeToggle {
            self.toggle
        }
    }

    fn on(tag: &'static str) -> Row {
        Row {
            tag,
            toggle: IncludeToggle::On,
        }
    }

    fn off(tag: &'static str) -> Row {
        Row {
            tag,
            toggle: IncludeToggle::Off,
        }
    }

    #[test]
    fn all_tagged_records_match_every_filter() {
        let record = on("ALL");
        assert!(applies(&record, &ScenarioFilter::All));
        assert!(applies(&record, &ScenarioFilter::Code("A".to_string())));
        assert!(applies(&record, &ScenarioFilter::Code("B".to_string())));
    }

    #[test]
    fn all_filter_accepts_every_included_record() {
        assert!(applies(&on("A"), &ScenarioFilter::All));
        assert!(applies(&on("B"), &ScenarioFilter::All));
        assert!(applies(&on("ALL"), &ScenarioFilter::All));
    }

    #[test]
    fn code_filter_excludes_other_codes() {
        let filter = ScenarioFilter::Code("B".to_string());
        assert!(!applies(&on("A"), &filter));
        assert!(applies(&on("B"), &filter));
    }

    #[test]
    fn excluded_records_never_match() {
        assert!(!applies(&off("ALL"), &ScenarioFilter::All));
        assert!(!applies(&off("A"), &ScenarioFilter::Code("A".to_string())));
    }

    #[test]
    fn parse_accepts_all_and_codes() {
        assert_eq!(ScenarioFilter::parse("ALL").unwrap(), ScenarioFilter::All);
        assert_eq!(
            ScenarioFilter::parse("B2").unwrap(),
            ScenarioFilter::Code("B2".to_string())
        );
        assert!(ScenarioFilter::parse("b").is_err());
        assert!(ScenarioFilter::parse("").is_err());
        assert!(ScenarioFilter::parse("A-1").is_err());
    }

    #[test]
    fn code_validation_rejects_the_reserved_tag() {
        assert!(validate_tag("ALL").is_ok());
        assert!(validate_code("ALL").is_err());
        assert!(validate_code("C").is_ok());
    }
}
