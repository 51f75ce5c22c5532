//! Scheme settlement orchestrator.
//!
//! Glues invoice scheme quantities to claim accounts and drives the ledger
//! to post the monetary consequence. The claim-account gate runs fresh on
//! every call; the posting and the invoice's claim-account link commit in
//! one transaction.

use bahi_core::account::{validate_claim_account, AccountSnapshot};
use bahi_core::ledger::{DoubleEntryInput, EntryPair, LedgerService, PartyRef, ReferenceType};
use bahi_core::scheme::{
    ClaimLinkRequest, SchemeApplicationOutcome, SchemeApplicationRequest, SchemeError,
    SchemeQuantities, SchemeRecording, SchemeService, SchemeSettlement, SchemeValuedLine,
};
use bahi_shared::types::{AccountId, CustomerId, InvoiceId, InvoiceLineId, UserId};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{accounts, invoice_lines, invoices};
use crate::repositories::account::snapshot_from_model;
use crate::repositories::ledger::persist_pair;
use crate::retry::{run_with_retry, RetryPolicy};

/// Scheme settlement repository.
#[derive(Debug, Clone)]
pub struct SchemeRepository {
    db: DatabaseConnection,
    retry: RetryPolicy,
}

impl SchemeRepository {
    /// Creates a repository with the default retry policy.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_retry_policy(db, RetryPolicy::default())
    }

    /// Creates a repository with an explicit retry policy.
    #[must_use]
    pub const fn with_retry_policy(db: DatabaseConnection, retry: RetryPolicy) -> Self {
        Self { db, retry }
    }

    /// Records scheme1/scheme2 quantities on an invoice's lines.
    ///
    /// Scheme1 is free goods and never touches the ledger; recording alone
    /// has no monetary effect for scheme2 either; settlement happens in
    /// [`Self::link_scheme_to_claim_account`].
    ///
    /// # Errors
    ///
    /// `MissingSchemeItems` for an empty set, `InvalidQuantity` for
    /// negative quantities, `InvoiceNotFound` / `LineNotFound` for broken
    /// references.
    pub async fn record_scheme_quantities(
        &self,
        invoice_id: InvoiceId,
        items: &[SchemeQuantities],
    ) -> Result<SchemeRecording, SchemeError> {
        if items.is_empty() {
            return Err(SchemeError::MissingSchemeItems);
        }
        for item in items {
            if item.scheme1_quantity < 0 || item.scheme2_quantity < 0 {
                return Err(SchemeError::InvalidQuantity {
                    line_id: item.line_id,
                });
            }
        }

        self.get_invoice(invoice_id).await?;

        let txn = self.db.begin().await.map_err(scheme_storage_err)?;
        for item in items {
            let line = find_line(&txn, invoice_id, item.line_id).await?;

            let mut active: invoice_lines::ActiveModel = line.into();
            active.scheme1_quantity = Set(item.scheme1_quantity);
            active.scheme2_quantity = Set(item.scheme2_quantity);
            active.updated_at = Set(Utc::now().into());
            active.update(&txn).await.map_err(scheme_storage_err)?;
        }
        txn.commit().await.map_err(scheme_storage_err)?;

        Ok(SchemeRecording {
            items: items.to_vec(),
            totals: SchemeService::totals(items),
        })
    }

    /// Settles an invoice's scheme2 value against a claim account.
    ///
    /// Validates the claim account, computes
    /// `sum(scheme2_quantity * unit_price)` over the invoice's lines, and
    /// posts one double entry debiting the claim account and crediting the
    /// invoice's customer. The posting and the claim-account link on the
    /// invoice commit together.
    ///
    /// # Errors
    ///
    /// Argument and claim-account validation failures;
    /// `NoScheme2Quantities` when there is nothing to settle; ledger
    /// posting failures.
    pub async fn link_scheme_to_claim_account(
        &self,
        request: &ClaimLinkRequest,
    ) -> Result<SchemeSettlement, SchemeError> {
        let validated = SchemeService::validate_claim_link(request)?;

        let claim_account = self.validated_claim_account(validated.claim_account_id).await?;
        let invoice = self.get_invoice(validated.invoice_id).await?;

        let valued = self.valued_lines(validated.invoice_id).await?;
        let total_scheme2_value = SchemeService::settlement_value(&valued);
        if total_scheme2_value == Decimal::ZERO {
            return Err(SchemeError::NoScheme2Quantities);
        }

        let now = Utc::now();
        let input = DoubleEntryInput::home_currency(
            PartyRef::Account(claim_account.id),
            PartyRef::Customer(CustomerId::from_uuid(invoice.customer_id)),
            total_scheme2_value,
            format!(
                "Scheme claim settlement for invoice {}",
                invoice.invoice_number
            ),
            ReferenceType::SchemeClaim,
            Some(invoice.id),
            now,
            validated.actor,
        );
        let pair = LedgerService::build_double_entry(&input, now)?;

        run_with_retry(&self.retry, "link_scheme_to_claim_account", || {
            self.try_commit_settlement(&pair, invoice.id, claim_account.id)
        })
        .await
        .map_err(SchemeError::from)?;

        tracing::info!(
            invoice = %invoice.invoice_number,
            claim_account = %claim_account.code,
            value = %total_scheme2_value,
            "settled scheme2 value against claim account"
        );

        Ok(SchemeSettlement {
            invoice_id: validated.invoice_id,
            claim_account,
            entries: pair,
            total_scheme2_value,
        })
    }

    /// Full scheme application: record quantities, then settle if any
    /// scheme2 quantity exists.
    ///
    /// When no scheme2 quantity is present the ledger is never invoked and
    /// the recording is returned alone.
    ///
    /// # Errors
    ///
    /// Argument validation failures (including
    /// `ClaimAccountRequiredForScheme2` before anything is written), then
    /// everything [`Self::record_scheme_quantities`] and
    /// [`Self::link_scheme_to_claim_account`] can fail with.
    pub async fn process_scheme_application(
        &self,
        request: SchemeApplicationRequest,
    ) -> Result<SchemeApplicationOutcome, SchemeError> {
        let validated = SchemeService::validate_application(request)?;

        let recording = self
            .record_scheme_quantities(validated.invoice_id, &validated.items)
            .await?;

        if !recording.totals.has_scheme2() {
            return Ok(SchemeApplicationOutcome {
                recording,
                settlement: None,
            });
        }

        let link_request = ClaimLinkRequest {
            invoice_id: Some(validated.invoice_id),
            claim_account_id: validated.claim_account_id,
            actor: Some(validated.actor),
        };
        let settlement = self.link_scheme_to_claim_account(&link_request).await?;

        Ok(SchemeApplicationOutcome {
            recording,
            settlement: Some(settlement),
        })
    }

    /// Posts the scheme-claim entry pair for an already-computed claim
    /// amount: debit the claim account, credit the customer.
    ///
    /// # Errors
    ///
    /// Claim-account validation failures and ledger posting failures.
    pub async fn create_scheme_claim_entries(
        &self,
        claim_account_id: AccountId,
        customer_id: CustomerId,
        claim_amount: Decimal,
        invoice_id: InvoiceId,
        actor: UserId,
    ) -> Result<EntryPair, SchemeError> {
        let claim_account = self.validated_claim_account(claim_account_id).await?;

        let now = Utc::now();
        let input = DoubleEntryInput::home_currency(
            PartyRef::Account(claim_account.id),
            PartyRef::Customer(customer_id),
            claim_amount,
            "Scheme claim settlement".to_string(),
            ReferenceType::SchemeClaim,
            Some(invoice_id.into_inner()),
            now,
            actor,
        );
        let pair = LedgerService::build_double_entry(&input, now)?;

        run_with_retry(&self.retry, "create_scheme_claim_entries", || {
            self.try_commit_pair_only(&pair)
        })
        .await
        .map_err(SchemeError::from)?;

        Ok(pair)
    }

    /// Fetches and gates the claim account. Results are never cached:
    /// activation state can change between calls.
    async fn validated_claim_account(
        &self,
        id: AccountId,
    ) -> Result<AccountSnapshot, SchemeError> {
        let row = accounts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(scheme_storage_err)?;

        let snapshot = match row {
            Some(model) => {
                Some(snapshot_from_model(&model).map_err(|e| SchemeError::Storage(e.to_string()))?)
            }
            None => None,
        };

        Ok(validate_claim_account(Some(id), |_| snapshot.clone())?)
    }

    async fn get_invoice(&self, id: InvoiceId) -> Result<invoices::Model, SchemeError> {
        invoices::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(scheme_storage_err)?
            .ok_or(SchemeError::InvoiceNotFound(id))
    }

    async fn valued_lines(
        &self,
        invoice_id: InvoiceId,
    ) -> Result<Vec<SchemeValuedLine>, SchemeError> {
        let rows = invoice_lines::Entity::find()
            .filter(invoice_lines::Column::InvoiceId.eq(invoice_id.into_inner()))
            .all(&self.db)
            .await
            .map_err(scheme_storage_err)?;

        Ok(rows
            .into_iter()
            .map(|row| SchemeValuedLine {
                line_id: InvoiceLineId::from_uuid(row.id),
                scheme2_quantity: row.scheme2_quantity,
                unit_price: row.unit_price,
            })
            .collect())
    }

    /// One attempt at committing the settlement: both entry rows, the
    /// balance increments, and the invoice's claim-account link.
    async fn try_commit_settlement(
        &self,
        pair: &EntryPair,
        invoice_uuid: Uuid,
        claim_account_id: AccountId,
    ) -> Result<(), bahi_core::ledger::LedgerError> {
        use crate::repositories::ledger::storage_err;

        let txn = self.db.begin().await.map_err(storage_err)?;

        persist_pair(&txn, pair).await?;

        invoices::Entity::update_many()
            .col_expr(
                invoices::Column::ClaimAccountId,
                Expr::value(Some(claim_account_id.into_inner())),
            )
            .col_expr(
                invoices::Column::UpdatedAt,
                Expr::value(sea_orm::prelude::DateTimeWithTimeZone::from(Utc::now())),
            )
            .filter(invoices::Column::Id.eq(invoice_uuid))
            .exec(&txn)
            .await
            .map_err(storage_err)?;

        txn.commit().await.map_err(storage_err)
    }

    /// One attempt at committing a bare entry pair.
    async fn try_commit_pair_only(
        &self,
        pair: &EntryPair,
    ) -> Result<(), bahi_core::ledger::LedgerError> {
        use crate::repositories::ledger::storage_err;

        let txn = self.db.begin().await.map_err(storage_err)?;
        persist_pair(&txn, pair).await?;
        txn.commit().await.map_err(storage_err)
    }
}

async fn find_line(
    txn: &DatabaseTransaction,
    invoice_id: InvoiceId,
    line_id: InvoiceLineId,
) -> Result<invoice_lines::Model, SchemeError> {
    invoice_lines::Entity::find_by_id(line_id.into_inner())
        .filter(invoice_lines::Column::InvoiceId.eq(invoice_id.into_inner()))
        .one(txn)
        .await
        .map_err(scheme_storage_err)?
        .ok_or(SchemeError::LineNotFound(line_id))
}

fn scheme_storage_err(err: DbErr) -> SchemeError {
    SchemeError::Storage(err.to_string())
}
