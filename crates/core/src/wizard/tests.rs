//! Unit tests for wizard routing.

use quoin_shared::types::{PropertyId, UnitId};

use super::sequencer::{
    after_cap_rate_saved, after_expenses_saved, after_property_saved, after_quote_deleted,
    after_unit_deleted, after_unit_saved,
};
use super::types::{UnitRef, UnitSignal, WizardStep};

fn unit(number: &str) -> UnitRef {
    UnitRef {
        id: UnitId::new(),
        unit_number: number.to_string(),
    }
}

#[test]
fn test_address_routes_to_expenses() {
    let property_id = PropertyId::new();
    assert_eq!(
        after_property_saved(property_id),
        WizardStep::EnterExpenses { property_id }
    );
}

#[test]
fn test_expenses_route_to_cap_rate() {
    let property_id = PropertyId::new();
    assert_eq!(
        after_expenses_saved(property_id),
        WizardStep::EnterCapRate { property_id }
    );
}

#[test]
fn test_cap_rate_routes_to_create_when_roll_empty() {
    let property_id = PropertyId::new();
    assert_eq!(
        after_cap_rate_saved(property_id, &[]),
        WizardStep::CreateUnit { property_id }
    );
}

#[test]
fn test_cap_rate_routes_to_first_unit() {
    let property_id = PropertyId::new();
    let units = vec![unit("3B"), unit("1A"), unit("2C")];
    assert_eq!(
        after_cap_rate_saved(property_id, &units),
        WizardStep::EditUnit {
            property_id,
            unit_id: units[1].id,
        }
    );
}

#[test]
fn test_continue_routes_to_another_create() {
    let property_id = PropertyId::new();
    let units = vec![unit("1A")];
    assert_eq!(
        after_unit_saved(property_id, "1A", &units, UnitSignal::Continue),
        WizardStep::CreateUnit { property_id }
    );
}

#[test]
fn test_finish_routes_to_quote_list() {
    let property_id = PropertyId::new();
    let units = vec![unit("1A"), unit("2A")];
    assert_eq!(
        after_unit_saved(property_id, "1A", &units, UnitSignal::Finish),
        WizardStep::QuoteList
    );
}

#[test]
fn test_advance_routes_to_next_unit_by_number() {
    let property_id = PropertyId::new();
    let units = vec![unit("1A"), unit("3C"), unit("2B")];
    // From 1A the next unit is 2B, not 3C.
    assert_eq!(
        after_unit_saved(property_id, "1A", &units, UnitSignal::Advance),
        WizardStep::EditUnit {
            property_id,
            unit_id: units[2].id,
        }
    );
}

#[test]
fn test_advance_past_highest_routes_to_quote_list() {
    let property_id = PropertyId::new();
    let units = vec![unit("1A"), unit("2B")];
    assert_eq!(
        after_unit_saved(property_id, "2B", &units, UnitSignal::Advance),
        WizardStep::QuoteList
    );
}

#[test]
fn test_delete_routes_to_next_higher_unit() {
    let property_id = PropertyId::new();
    let remaining = vec![unit("1A"), unit("4D")];
    assert_eq!(
        after_unit_deleted(property_id, "2B", &remaining),
        WizardStep::EditUnit {
            property_id,
            unit_id: remaining[1].id,
        }
    );
}

#[test]
fn test_delete_last_remaining_unit_routes_to_create() {
    // Deleting the only unit must re-open unit entry, not finish the
    // wizard.
    let property_id = PropertyId::new();
    assert_eq!(
        after_unit_deleted(property_id, "1A", &[]),
        WizardStep::CreateUnit { property_id }
    );
}

#[test]
fn test_delete_highest_unit_routes_to_create() {
    let property_id = PropertyId::new();
    let remaining = vec![unit("1A")];
    assert_eq!(
        after_unit_deleted(property_id, "2B", &remaining),
        WizardStep::CreateUnit { property_id }
    );
}

#[test]
fn test_quote_delete_routes_to_quote_list() {
    assert_eq!(after_quote_deleted(), WizardStep::QuoteList);
}
