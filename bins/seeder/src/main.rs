//! Database seeder for Quoin development and testing.
//!
//! Walks a demo property through the full entry flow (address, expense
//! schedule, cap rate, rent roll) via the repositories, so the quote is
//! derived exactly as it would be in production.
//!
//! Usage: cargo run --bin seeder

use std::str::FromStr;

use rust_decimal::Decimal;

use quoin_core::underwriting::DebtPolicy;
use quoin_db::repositories::{
    CapRateInput, CapRateRepository, CreatePropertyInput, CreateUnitInput, ExpenseScheduleInput,
    ExpensesRepository, PropertyError, PropertyRepository, QuoteRepository, UnitRepository,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = quoin_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let policy = DebtPolicy::default();

    println!("Seeding demo property...");
    let property_repo = PropertyRepository::new(db.clone());
    let property = match property_repo
        .create_property(CreatePropertyInput {
            street: "742 Evergreen Terrace".to_string(),
            city: "Springfield".to_string(),
            state: "NY".to_string(),
            zip_code: "10001".to_string(),
        })
        .await
    {
        Ok(property) => property,
        Err(PropertyError::DuplicateAddress) => {
            println!("  Demo property already exists, skipping...");
            return;
        }
        Err(e) => {
            eprintln!("Failed to insert demo property: {e}");
            return;
        }
    };
    println!("  Created property: {}", property.street);

    println!("Seeding expense schedule...");
    let expenses_repo = ExpensesRepository::new(db.clone(), policy);
    if let Err(e) = expenses_repo
        .create_expenses(
            property.id,
            ExpenseScheduleInput {
                marketing: dec("500"),
                taxes: dec("1000"),
                insurance: dec("300"),
                repairs: dec("200"),
                administration: dec("500"),
            },
        )
        .await
    {
        eprintln!("Failed to insert expense schedule: {e}");
        return;
    }
    println!("  Created expense schedule: 2500.00 annual");

    println!("Seeding cap rate...");
    let cap_rate_repo = CapRateRepository::new(db.clone(), policy);
    if let Err(e) = cap_rate_repo
        .create_cap_rate(property.id, CapRateInput { cap_rate: dec("6.00") })
        .await
    {
        eprintln!("Failed to insert cap rate: {e}");
        return;
    }
    println!("  Created cap rate: 6.00%");

    println!("Seeding rent roll...");
    let unit_repo = UnitRepository::new(db.clone(), policy);
    let units = [
        ("1A", "1000", 0, 2, 1),
        ("1B", "950", 5, 1, 1),
        ("2A", "1200", 0, 3, 2),
    ];
    for (unit_number, rent, vacancy_pct, bedrooms, bathrooms) in units {
        match unit_repo
            .create_unit(
                property.id,
                CreateUnitInput {
                    unit_number: unit_number.to_string(),
                    monthly_rent: dec(rent),
                    vacancy_pct,
                    bedrooms,
                    bathrooms,
                },
            )
            .await
        {
            Ok(unit) => println!("  Created unit {unit_number}: {} monthly", unit.monthly_rent),
            Err(e) => eprintln!("Failed to insert unit {unit_number}: {e}"),
        }
    }

    let quote_repo = QuoteRepository::new(db.clone());
    match quote_repo.get_quote_for_property(property.id).await {
        Ok(Some(quote)) => {
            println!("Seeding complete!");
            println!("  NOI:            {}", quote.noi);
            println!("  Property value: {}", quote.property_value);
            println!("  Loan amount:    {}", quote.loan_amount);
        }
        Ok(None) => eprintln!("Quote was not derived; check the seeded inputs"),
        Err(e) => eprintln!("Failed to read derived quote: {e}"),
    }
}

fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).expect("seed literals are valid decimals")
}
