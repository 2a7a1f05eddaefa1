//! `SeaORM` Entity for quotes table (derived underwriting output).
//!
//! One row per property, overwritten in full whenever any constituent
//! input changes. The annual property expense is not persisted here; it
//! is read from the expense schedule on demand.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "quotes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub property_id: Uuid,
    pub annual_property_rent: Decimal,
    pub debt_rate: Decimal,
    pub noi: Decimal,
    pub annual_debt_payment: Decimal,
    pub property_value: Decimal,
    pub dscr_loan_amount: Decimal,
    pub loan_amount: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::properties::Entity",
        from = "Column::PropertyId",
        to = "super::properties::Column::Id"
    )]
    Properties,
}

impl Related<super::properties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Properties.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
