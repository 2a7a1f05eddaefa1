//! Initial database migration.
//!
//! Creates the five core tables: properties, units, expenses, cap_rates,
//! and quotes, with the uniqueness constraints, range checks, and cascade
//! deletes the domain requires.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(PROPERTIES_SQL).await?;
        db.execute_unprepared(UNITS_SQL).await?;
        db.execute_unprepared(EXPENSES_SQL).await?;
        db.execute_unprepared(CAP_RATES_SQL).await?;
        db.execute_unprepared(QUOTES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const PROPERTIES_SQL: &str = r"
-- A commercial property, identified by its address
CREATE TABLE properties (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    street VARCHAR(100) NOT NULL,
    city VARCHAR(75) NOT NULL,
    state CHAR(2) NOT NULL,
    zip_code CHAR(5) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_properties_address UNIQUE (street, city, state, zip_code)
);

-- Index for the property list (ordered by street)
CREATE INDEX idx_properties_street ON properties(street);
";

const UNITS_SQL: &str = r"
-- One leasable unit in a property's rent roll
CREATE TABLE units (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    property_id UUID NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
    unit_number VARCHAR(10) NOT NULL,
    monthly_rent NUMERIC(14,2) NOT NULL,
    vacancy_pct INTEGER NOT NULL,
    bedrooms INTEGER NOT NULL,
    bathrooms INTEGER NOT NULL,
    annual_rent NUMERIC(14,2) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_units_property_number UNIQUE (property_id, unit_number),
    CONSTRAINT chk_units_rent_positive CHECK (monthly_rent > 0),
    CONSTRAINT chk_units_vacancy_range CHECK (vacancy_pct BETWEEN 0 AND 100),
    CONSTRAINT chk_units_bedrooms_range CHECK (bedrooms BETWEEN 1 AND 50),
    CONSTRAINT chk_units_bathrooms_range CHECK (bathrooms BETWEEN 1 AND 50)
);

-- Index for rent-roll traversal in unit-number order
CREATE INDEX idx_units_property ON units(property_id, unit_number);
";

const EXPENSES_SQL: &str = r"
-- Annualized operating costs, one schedule per property
CREATE TABLE expenses (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    property_id UUID NOT NULL UNIQUE REFERENCES properties(id) ON DELETE CASCADE,
    marketing NUMERIC(14,2) NOT NULL,
    taxes NUMERIC(14,2) NOT NULL,
    insurance NUMERIC(14,2) NOT NULL,
    repairs NUMERIC(14,2) NOT NULL,
    administration NUMERIC(14,2) NOT NULL,
    annual_expense NUMERIC(14,2) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_expenses_non_negative CHECK (
        marketing >= 0 AND taxes >= 0 AND insurance >= 0
        AND repairs >= 0 AND administration >= 0
    )
);
";

-- No positive check on cap_rate: a zero rate is rejected by the quote
-- derivation inside the same transaction, which rolls the write back.
const CAP_RATES_SQL: &str = r"
-- Market capitalization rate, one per property
CREATE TABLE cap_rates (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    property_id UUID NOT NULL UNIQUE REFERENCES properties(id) ON DELETE CASCADE,
    cap_rate NUMERIC(7,4) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const QUOTES_SQL: &str = r"
-- Derived underwriting output, one per property, overwritten on refresh
CREATE TABLE quotes (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    property_id UUID NOT NULL UNIQUE REFERENCES properties(id) ON DELETE CASCADE,
    annual_property_rent NUMERIC(14,2) NOT NULL DEFAULT 0,
    debt_rate NUMERIC(7,4) NOT NULL DEFAULT 0,
    noi NUMERIC(14,2) NOT NULL DEFAULT 0,
    annual_debt_payment NUMERIC(14,2) NOT NULL DEFAULT 0,
    property_value NUMERIC(14,2) NOT NULL DEFAULT 0,
    dscr_loan_amount NUMERIC(14,2) NOT NULL DEFAULT 0,
    loan_amount NUMERIC(14,2) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Index for the quote list (newest first)
CREATE INDEX idx_quotes_created ON quotes(created_at DESC);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS quotes CASCADE;
DROP TABLE IF EXISTS cap_rates CASCADE;
DROP TABLE IF EXISTS expenses CASCADE;
DROP TABLE IF EXISTS units CASCADE;
DROP TABLE IF EXISTS properties CASCADE;
";
