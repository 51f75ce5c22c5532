//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Entity rows are mapped to and from the core domain types
//! here; the entities themselves stay behavior-free.

pub mod account;
pub mod invoice;
pub mod ledger;
pub mod scheme;

pub use account::{AccountRepository, AccountStoreError, CreateAccountInput};
pub use invoice::{AddInvoiceLineInput, CreateInvoiceInput, InvoiceRepository, InvoiceStoreError};
pub use ledger::LedgerRepository;
pub use scheme::SchemeRepository;
