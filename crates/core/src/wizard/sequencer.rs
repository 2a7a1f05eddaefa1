//! Next-step decisions for the data-entry wizard.
//!
//! Units are ordered by `unit_number`: "first" means the lowest unit
//! number and "next" means the lowest unit number strictly greater than
//! the one just handled.

use quoin_shared::types::PropertyId;

use super::types::{UnitRef, UnitSignal, WizardStep};

/// After the property address is saved, enter its expenses.
#[must_use]
pub fn after_property_saved(property_id: PropertyId) -> WizardStep {
    WizardStep::EnterExpenses { property_id }
}

/// After the expense schedule is saved, enter the cap rate.
#[must_use]
pub fn after_expenses_saved(property_id: PropertyId) -> WizardStep {
    WizardStep::EnterCapRate { property_id }
}

/// After the cap rate is saved, enter the rent roll: edit the first
/// existing unit, or create one if the roll is still empty.
#[must_use]
pub fn after_cap_rate_saved(property_id: PropertyId, units: &[UnitRef]) -> WizardStep {
    match first_unit(units) {
        Some(unit) => WizardStep::EditUnit {
            property_id,
            unit_id: unit.id,
        },
        None => WizardStep::CreateUnit { property_id },
    }
}

/// After a unit is saved, route on the submitted signal.
#[must_use]
pub fn after_unit_saved(
    property_id: PropertyId,
    saved_unit_number: &str,
    units: &[UnitRef],
    signal: UnitSignal,
) -> WizardStep {
    match signal {
        UnitSignal::Continue => WizardStep::CreateUnit { property_id },
        UnitSignal::Finish => WizardStep::QuoteList,
        UnitSignal::Advance => match unit_after(units, saved_unit_number) {
            Some(next) => WizardStep::EditUnit {
                property_id,
                unit_id: next.id,
            },
            None => WizardStep::QuoteList,
        },
    }
}

/// After a unit is deleted, edit the next-higher unit, or create a new
/// one if none follows.
#[must_use]
pub fn after_unit_deleted(
    property_id: PropertyId,
    deleted_unit_number: &str,
    remaining: &[UnitRef],
) -> WizardStep {
    match unit_after(remaining, deleted_unit_number) {
        Some(next) => WizardStep::EditUnit {
            property_id,
            unit_id: next.id,
        },
        None => WizardStep::CreateUnit { property_id },
    }
}

/// After a quote is deleted (cascading its property), show the list.
#[must_use]
pub fn after_quote_deleted() -> WizardStep {
    WizardStep::QuoteList
}

fn first_unit(units: &[UnitRef]) -> Option<&UnitRef> {
    units.iter().min_by(|a, b| a.unit_number.cmp(&b.unit_number))
}

fn unit_after<'a>(units: &'a [UnitRef], unit_number: &str) -> Option<&'a UnitRef> {
    units
        .iter()
        .filter(|u| u.unit_number.as_str() > unit_number)
        .min_by(|a, b| a.unit_number.cmp(&b.unit_number))
}
