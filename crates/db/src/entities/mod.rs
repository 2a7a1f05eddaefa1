//! `SeaORM` entity definitions.
//!
//! One module per table: a property, its rent-roll units, its expense
//! schedule, its cap rate, and the derived quote.

pub mod cap_rates;
pub mod expenses;
pub mod properties;
pub mod quotes;
pub mod units;
