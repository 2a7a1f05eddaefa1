//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Writes to quote inputs (expenses, cap rate, units) run
//! inside a transaction that locks the property row and refreshes the
//! derived quote before committing.

pub mod cap_rate;
pub mod expenses;
pub mod property;
pub mod quote;
pub mod unit;

pub use cap_rate::{CapRateError, CapRateInput, CapRateRepository};
pub use expenses::{ExpenseScheduleInput, ExpensesError, ExpensesRepository};
pub use property::{
    CreatePropertyInput, PropertyError, PropertyRepository, UpdatePropertyInput,
};
pub use quote::{QuoteDetail, QuoteError, QuoteRepository, QuoteWithProperty, RefreshError};
pub use unit::{CreateUnitInput, UnitError, UnitRepository, UpdateUnitInput};
