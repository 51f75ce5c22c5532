//! Invoice surface repository.
//!
//! Invoice lifecycle belongs to the invoice subsystem; this repository
//! exists so the scheme orchestrator (and tests) can seed and read the
//! minimal invoice/line rows the settlement flow touches.

use bahi_shared::types::{CustomerId, InvoiceId, InvoiceLineId};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use crate::entities::{invoice_lines, invoices};

/// Error types for invoice store operations.
#[derive(Debug, thiserror::Error)]
pub enum InvoiceStoreError {
    /// Invoice not found.
    #[error("Invoice not found: {0}")]
    NotFound(InvoiceId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an invoice.
#[derive(Debug, Clone)]
pub struct CreateInvoiceInput {
    /// Human-readable invoice number.
    pub invoice_number: String,
    /// The billed customer.
    pub customer_id: CustomerId,
}

/// Input for adding a line to an invoice.
#[derive(Debug, Clone)]
pub struct AddInvoiceLineInput {
    /// Billed quantity.
    pub quantity: Decimal,
    /// Price per unit.
    pub unit_price: Decimal,
}

/// Invoice repository.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    db: DatabaseConnection,
}

impl InvoiceRepository {
    /// Creates a new invoice repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an invoice with no lines and no claim-account link.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (e.g., duplicate number).
    pub async fn create(
        &self,
        input: CreateInvoiceInput,
    ) -> Result<invoices::Model, InvoiceStoreError> {
        let now = Utc::now().into();

        let model = invoices::ActiveModel {
            id: Set(InvoiceId::new().into_inner()),
            invoice_number: Set(input.invoice_number),
            customer_id: Set(input.customer_id.into_inner()),
            claim_account_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(model.insert(&self.db).await?)
    }

    /// Adds a line to an invoice.
    ///
    /// # Errors
    ///
    /// `NotFound` if the invoice does not exist.
    pub async fn add_line(
        &self,
        invoice_id: InvoiceId,
        input: AddInvoiceLineInput,
    ) -> Result<invoice_lines::Model, InvoiceStoreError> {
        self.get(invoice_id).await?;

        let now = Utc::now().into();
        let model = invoice_lines::ActiveModel {
            id: Set(InvoiceLineId::new().into_inner()),
            invoice_id: Set(invoice_id.into_inner()),
            quantity: Set(input.quantity),
            unit_price: Set(input.unit_price),
            scheme1_quantity: Set(0),
            scheme2_quantity: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(model.insert(&self.db).await?)
    }

    /// Fetches an invoice row.
    ///
    /// # Errors
    ///
    /// `NotFound` if the invoice does not exist.
    pub async fn get(&self, id: InvoiceId) -> Result<invoices::Model, InvoiceStoreError> {
        invoices::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(InvoiceStoreError::NotFound(id))
    }

    /// Fetches an invoice's lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn lines(
        &self,
        id: InvoiceId,
    ) -> Result<Vec<invoice_lines::Model>, InvoiceStoreError> {
        Ok(invoice_lines::Entity::find()
            .filter(invoice_lines::Column::InvoiceId.eq(id.into_inner()))
            .all(&self.db)
            .await?)
    }
}
