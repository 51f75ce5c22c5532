//! `SeaORM` Entity for the ledger_entries table.
//!
//! Rows are append-only: corrections land as new adjustment rows, never as
//! updates or deletes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "ledger_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Discriminator selecting the store `party_id` resolves against.
    pub party_kind: String,
    pub party_id: Uuid,
    pub entry_type: String,
    pub amount: Decimal,
    pub description: String,
    pub reference_type: String,
    pub reference_id: Option<Uuid>,
    pub transaction_date: DateTimeWithTimeZone,
    pub currency: String,
    pub exchange_rate: Decimal,
    pub created_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
