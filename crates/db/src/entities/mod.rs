//! `SeaORM` entity definitions.
//!
//! Entities are plain row mappings with no behavior; enum-ish columns are
//! stored as text and converted through the core domain types in the
//! repository layer, keeping the schema portable across Postgres and
//! SQLite.

pub mod accounts;
pub mod invoice_lines;
pub mod invoices;
pub mod ledger_entries;
