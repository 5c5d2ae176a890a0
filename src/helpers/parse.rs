//! Parsing and query helpers shared by the record handlers.

use compute::{ScenarioFilter, ALL_TAG};
use model::entities::asset::IncludeToggle;
use sea_orm::{ColumnTrait, Condition};
use std::str::FromStr;

/// Parses an optional include toggle string, defaulting to `on`.
pub fn parse_include_toggle(raw: Option<String>) -> Result<IncludeToggle, String> {
    match raw {
        Some(value) => IncludeToggle::from_str(&value),
        None => Ok(IncludeToggle::On),
    }
}

/// Validates an optional scenario tag, defaulting to `ALL`.
pub fn parse_scenario_tag(raw: Option<String>) -> Result<String, String> {
    let tag = raw.unwrap_or_else(|| ALL_TAG.to_string());
    compute::filter::validate_tag(&tag).map_err(|e| e.to_string())?;
    Ok(tag)
}

/// Builds the SQL condition a list read adds for a scenario filter.
///
/// Records tagged `ALL` belong to every scenario, so a code filter keeps
/// both the code and the `ALL` tag; the `ALL` filter adds no condition.
pub fn scenario_condition<C: ColumnTrait>(column: C, filter: &ScenarioFilter) -> Option<Condition> {
    match filter {
        ScenarioFilter::All => None,
        ScenarioFilter::Code(code) => Some(
            Condition::any()
                .add(column.eq(code.as_str()))
                .add(column.eq(ALL_TAG)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_defaults_to_on() {
        assert_eq!(parse_include_toggle(None).unwrap(), IncludeToggle::On);
        assert_eq!(
            parse_include_toggle(Some("off".to_string())).unwrap(),
            IncludeToggle::Off
        );
        assert!(parse_include_toggle(Some("maybe".to_string())).is_err());
    }

    #[test]
    fn tag_defaults_to_all() {
        assert_eq!(parse_scenario_tag(None).unwrap(), "ALL");
        assert_eq!(parse_scenario_tag(Some("A".to_string())).unwrap(), "A");
        assert!(parse_scenario_tag(Some("a".to_string())).is_err());
    }
}
