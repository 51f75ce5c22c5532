//! Account store repository.
//!
//! Account creation and deactivation belong to account administration; the
//! engine itself only reads snapshots and adjusts the cached balance inside
//! posting transactions (see `repositories::ledger`).

use bahi_core::account::{AccountSnapshot, AccountType};
use bahi_shared::types::AccountId;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};

use crate::entities::accounts;

/// Error types for account store operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountStoreError {
    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(AccountId),

    /// A stored row failed to map back to the domain type.
    #[error("Stored account row is invalid: {0}")]
    Corrupt(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Display name.
    pub name: String,
    /// Human-readable unique code.
    pub code: String,
    /// Account type classification.
    pub account_type: AccountType,
}

/// Account repository.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an account with a zero balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (e.g., duplicate code).
    pub async fn create(
        &self,
        input: CreateAccountInput,
    ) -> Result<AccountSnapshot, AccountStoreError> {
        let now = Utc::now().into();

        let model = accounts::ActiveModel {
            id: Set(AccountId::new().into_inner()),
            name: Set(input.name),
            code: Set(input.code),
            account_type: Set(input.account_type.to_string()),
            is_active: Set(true),
            balance: Set(Decimal::ZERO),
            version: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let row = model.insert(&self.db).await?;
        snapshot_from_model(&row)
    }

    /// Looks up an account snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is corrupt.
    pub async fn find(
        &self,
        id: AccountId,
    ) -> Result<Option<AccountSnapshot>, AccountStoreError> {
        let row = accounts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?;

        row.as_ref().map(snapshot_from_model).transpose()
    }

    /// Fetches an account snapshot, failing if it does not exist.
    ///
    /// # Errors
    ///
    /// `NotFound` if the account does not exist.
    pub async fn get(&self, id: AccountId) -> Result<AccountSnapshot, AccountStoreError> {
        self.find(id)
            .await?
            .ok_or(AccountStoreError::NotFound(id))
    }

    /// Returns whether the account currently accepts postings.
    ///
    /// # Errors
    ///
    /// `NotFound` if the account does not exist.
    pub async fn is_active(&self, id: AccountId) -> Result<bool, AccountStoreError> {
        Ok(self.get(id).await?.is_active)
    }

    /// Deactivates an account. Accounts are never deleted.
    ///
    /// # Errors
    ///
    /// `NotFound` if the account does not exist.
    pub async fn deactivate(&self, id: AccountId) -> Result<(), AccountStoreError> {
        let row = accounts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(AccountStoreError::NotFound(id))?;

        let mut active: accounts::ActiveModel = row.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now().into());
        active.update(&self.db).await?;

        Ok(())
    }
}

/// Maps a stored row to the domain snapshot.
pub(crate) fn snapshot_from_model(
    model: &accounts::Model,
) -> Result<AccountSnapshot, AccountStoreError> {
    let account_type = model
        .account_type
        .parse::<AccountType>()
        .map_err(AccountStoreError::Corrupt)?;

    Ok(AccountSnapshot {
        id: AccountId::from_uuid(model.id),
        name: model.name.clone(),
        code: model.code.clone(),
        account_type,
        is_active: model.is_active,
        balance: model.balance,
    })
}
