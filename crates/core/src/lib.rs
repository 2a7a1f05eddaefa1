//! Core business logic for Quoin.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, derivation rules, and calculations live here.
//!
//! # Modules
//!
//! - `underwriting` - DSCR quote derivation from rents, expenses, and cap rate
//! - `wizard` - Routing rules for the linear data-entry workflow

pub mod underwriting;
pub mod wizard;
