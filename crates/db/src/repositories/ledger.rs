//! Ledger repository: the persistent double-entry engine.
//!
//! Every posting runs as one database transaction covering both entry rows
//! and the cached-balance increments of any account-kind parties. The
//! cached balance carries an optimistic version; a version miss rolls the
//! whole transaction back and the retry policy decides whether to try
//! again. Nothing is ever persisted on failure.

use bahi_core::ledger::{
    balance_as_of, statement, AccountStatement, DoubleEntryInput, EntryPair, EntryType,
    LedgerEntry, LedgerError, LedgerService, PartyKind, PartyRef, ReferenceType,
};
use bahi_shared::types::{LedgerEntryId, UserId};
use bahi_shared::Currency;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::entities::{accounts, ledger_entries};
use crate::retry::{run_with_retry, RetryPolicy};

/// Ledger repository owning the atomic posting unit of work.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
    retry: RetryPolicy,
}

impl LedgerRepository {
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

    /// Posts a balanced double entry.
    ///
    /// Builds and validates the pair, then commits both rows and the
    /// balance increments in one transaction, retrying on version
    /// conflicts per the policy.
    ///
    /// # Errors
    ///
    /// Validation errors from pair construction; `AccountNotFound` /
    /// `AccountInactive` for bad account parties; `ConcurrencyConflict`
    /// when retries are exhausted; `Storage` for database failures.
    pub async fn post_double_entry(
        &self,
        input: &DoubleEntryInput,
    ) -> Result<EntryPair, LedgerError> {
        let pair = LedgerService::build_double_entry(input, Utc::now())?;

        run_with_retry(&self.retry, "post_double_entry", || {
            self.try_commit_pair(&pair)
        })
        .await?;

        tracing::info!(
            amount = %pair.amount(),
            debit_party = %pair.debit.party.kind(),
            credit_party = %pair.credit.party.kind(),
            reference_type = %pair.debit.reference_type,
            "posted double entry"
        );

        Ok(pair)
    }

    /// Posts a reversal of an existing entry.
    ///
    /// The reversal is a new opposite-direction entry; the original row is
    /// never touched. Committing follows the same atomic discipline as
    /// [`Self::post_double_entry`].
    ///
    /// # Errors
    ///
    /// `EntryNotFound` if the original does not exist, plus the posting
    /// errors of [`Self::post_double_entry`].
    pub async fn reverse(
        &self,
        entry_id: LedgerEntryId,
        reason: &str,
        actor: UserId,
    ) -> Result<LedgerEntry, LedgerError> {
        let original = self.find_entry(entry_id).await?;

        let now = Utc::now();
        let reversal = LedgerService::reverse_entry(&original, reason, actor, now);
        bahi_core::ledger::validate_entry(&reversal, now)?;

        run_with_retry(&self.retry, "reverse", || self.try_commit_single(&reversal)).await?;

        tracing::info!(
            original = %entry_id,
            reversal = %reversal.id,
            "posted reversal entry"
        );

        Ok(reversal)
    }

    /// Loads one entry.
    ///
    /// # Errors
    ///
    /// `EntryNotFound` if it does not exist.
    pub async fn find_entry(&self, id: LedgerEntryId) -> Result<LedgerEntry, LedgerError> {
        let row = ledger_entries::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(storage_err)?
            .ok_or(LedgerError::EntryNotFound(id))?;

        entry_from_model(row)
    }

    /// Loads a party's full entry history, ascending by transaction date
    /// (write order breaks ties).
    ///
    /// # Errors
    ///
    /// `Storage` for database failures.
    pub async fn entries_for_party(
        &self,
        party: PartyRef,
    ) -> Result<Vec<LedgerEntry>, LedgerError> {
        let rows = ledger_entries::Entity::find()
            .filter(ledger_entries::Column::PartyKind.eq(party.kind().to_string()))
            .filter(ledger_entries::Column::PartyId.eq(party.id()))
            .order_by_asc(ledger_entries::Column::TransactionDate)
            .order_by_asc(ledger_entries::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(storage_err)?;

        rows.into_iter().map(entry_from_model).collect()
    }

    /// Authoritative balance of a party as of a point in time, derived by
    /// replaying its entries.
    ///
    /// After any successful write, the cached account balance equals
    /// `balance_as_of(account_party, now)`.
    ///
    /// # Errors
    ///
    /// `Storage` for database failures.
    pub async fn balance_as_of(
        &self,
        party: PartyRef,
        as_of: DateTime<Utc>,
    ) -> Result<Decimal, LedgerError> {
        let entries = self.entries_for_party(party).await?;
        Ok(balance_as_of(&entries, as_of))
    }

    /// A party's statement over `[start, end]` with running balances.
    ///
    /// # Errors
    ///
    /// `Storage` for database failures.
    pub async fn statement(
        &self,
        party: PartyRef,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<AccountStatement, LedgerError> {
        let entries = self.entries_for_party(party).await?;
        Ok(statement(&entries, start, end))
    }

    /// One attempt at committing a pair atomically.
    async fn try_commit_pair(&self, pair: &EntryPair) -> Result<(), LedgerError> {
        let txn = self.db.begin().await.map_err(storage_err)?;

        insert_entry(&txn, &pair.debit).await?;
        insert_entry(&txn, &pair.credit).await?;
        apply_party_balance(&txn, &pair.debit).await?;
        apply_party_balance(&txn, &pair.credit).await?;

        txn.commit().await.map_err(storage_err)
    }

    /// One attempt at committing a single (reversal) entry atomically.
    async fn try_commit_single(&self, entry: &LedgerEntry) -> Result<(), LedgerError> {
        let txn = self.db.begin().await.map_err(storage_err)?;

        insert_entry(&txn, entry).await?;
        apply_party_balance(&txn, entry).await?;

        txn.commit().await.map_err(storage_err)
    }
}

/// Inserts both halves of a pair and applies their balance increments,
/// inside an existing transaction. Used by orchestrators that must commit
/// a posting together with their own writes.
pub(crate) async fn persist_pair(
    txn: &DatabaseTransaction,
    pair: &EntryPair,
) -> Result<(), LedgerError> {
    insert_entry(txn, &pair.debit).await?;
    insert_entry(txn, &pair.credit).await?;
    apply_party_balance(txn, &pair.debit).await?;
    apply_party_balance(txn, &pair.credit).await?;

    Ok(())
}

async fn insert_entry(txn: &DatabaseTransaction, entry: &LedgerEntry) -> Result<(), LedgerError> {
    entry_to_active(entry)
        .insert(txn)
        .await
        .map_err(storage_err)?;

    Ok(())
}

/// Applies an entry's signed amount to the cached balance of its party,
/// when the party is an account. The version filter turns a concurrent
/// update into zero affected rows, surfaced as a retryable conflict.
async fn apply_party_balance(
    txn: &DatabaseTransaction,
    entry: &LedgerEntry,
) -> Result<(), LedgerError> {
    let Some(account_id) = entry.party.as_account() else {
        return Ok(());
    };

    let account = accounts::Entity::find_by_id(account_id.into_inner())
        .one(txn)
        .await
        .map_err(storage_err)?
        .ok_or(LedgerError::AccountNotFound(account_id))?;

    if !account.is_active {
        return Err(LedgerError::AccountInactive {
            id: account_id,
            name: account.name,
        });
    }

    let updated = accounts::Entity::update_many()
        .col_expr(
            accounts::Column::Balance,
            Expr::value(account.balance + entry.signed_amount()),
        )
        .col_expr(accounts::Column::Version, Expr::value(account.version + 1))
        .col_expr(
            accounts::Column::UpdatedAt,
            Expr::value(sea_orm::prelude::DateTimeWithTimeZone::from(Utc::now())),
        )
        .filter(accounts::Column::Id.eq(account_id.into_inner()))
        .filter(accounts::Column::Version.eq(account.version))
        .exec(txn)
        .await
        .map_err(storage_err)?;

    if updated.rows_affected == 0 {
        return Err(LedgerError::ConcurrencyConflict);
    }

    Ok(())
}

fn entry_to_active(entry: &LedgerEntry) -> ledger_entries::ActiveModel {
    ledger_entries::ActiveModel {
        id: Set(entry.id.into_inner()),
        party_kind: Set(entry.party.kind().to_string()),
        party_id: Set(entry.party.id()),
        entry_type: Set(entry.entry_type.to_string()),
        amount: Set(entry.amount),
        description: Set(entry.description.clone()),
        reference_type: Set(entry.reference_type.to_string()),
        reference_id: Set(entry.reference_id),
        transaction_date: Set(entry.transaction_date.into()),
        currency: Set(entry.currency.to_string()),
        exchange_rate: Set(entry.exchange_rate),
        created_by: Set(entry.created_by.into_inner()),
        created_at: Set(entry.created_at.into()),
    }
}

/// Maps a stored row back to the domain entry.
pub(crate) fn entry_from_model(model: ledger_entries::Model) -> Result<LedgerEntry, LedgerError> {
    let party_kind = model
        .party_kind
        .parse::<PartyKind>()
        .map_err(LedgerError::Storage)?;
    let entry_type = model
        .entry_type
        .parse::<EntryType>()
        .map_err(LedgerError::Storage)?;
    let reference_type = model
        .reference_type
        .parse::<ReferenceType>()
        .map_err(LedgerError::Storage)?;
    let currency = model
        .currency
        .parse::<Currency>()
        .map_err(LedgerError::Storage)?;

    Ok(LedgerEntry {
        id: LedgerEntryId::from_uuid(model.id),
        party: PartyRef::from_parts(party_kind, model.party_id),
        entry_type,
        amount: model.amount,
        description: model.description,
        reference_type,
        reference_id: model.reference_id,
        transaction_date: model.transaction_date.with_timezone(&Utc),
        currency,
        exchange_rate: model.exchange_rate,
        created_by: UserId::from_uuid(model.created_by),
        created_at: model.created_at.with_timezone(&Utc),
    })
}

pub(crate) fn storage_err(err: DbErr) -> LedgerError {
    LedgerError::Storage(err.to_string())
}
