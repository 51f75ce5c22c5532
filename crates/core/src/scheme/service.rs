//! Scheme validation and settlement computation.

use rust_decimal::Decimal;

use super::error::SchemeError;
use super::types::{
    ClaimLinkRequest, SchemeApplicationRequest, SchemeQuantities, SchemeTotals, SchemeValuedLine,
    ValidatedApplication, ValidatedClaimLink,
};

/// Stateless service for scheme computations.
pub struct SchemeService;

impl SchemeService {
    /// Aggregates scheme quantities across items.
    #[must_use]
    pub fn totals(items: &[SchemeQuantities]) -> SchemeTotals {
        SchemeTotals {
            total_scheme1: items.iter().map(|i| i64::from(i.scheme1_quantity)).sum(),
            total_scheme2: items.iter().map(|i| i64::from(i.scheme2_quantity)).sum(),
        }
    }

    /// The monetary value of an invoice's scheme2 quantities:
    /// `sum(scheme2_quantity * unit_price)` over its lines.
    #[must_use]
    pub fn settlement_value(lines: &[SchemeValuedLine]) -> Decimal {
        lines
            .iter()
            .map(|line| Decimal::from(line.scheme2_quantity) * line.unit_price)
            .sum()
    }

    /// Validates a scheme application request.
    ///
    /// Checks argument presence, quantity signs, the claim-account
    /// requirement on every scheme2 line, and that all scheme2 lines agree
    /// on a single claim account.
    ///
    /// # Errors
    ///
    /// `MissingInvoiceId` / `MissingSchemeItems` / `MissingActor` for absent
    /// arguments; `InvalidQuantity` for negative quantities;
    /// `ClaimAccountRequiredForScheme2` and `ConflictingClaimAccounts` for
    /// claim-account violations.
    pub fn validate_application(
        request: SchemeApplicationRequest,
    ) -> Result<ValidatedApplication, SchemeError> {
        let invoice_id = request.invoice_id.ok_or(SchemeError::MissingInvoiceId)?;
        if request.items.is_empty() {
            return Err(SchemeError::MissingSchemeItems);
        }
        let actor = request.actor.ok_or(SchemeError::MissingActor)?;

        let mut claim_account_id = None;
        for item in &request.items {
            if item.scheme1_quantity < 0 || item.scheme2_quantity < 0 {
                return Err(SchemeError::InvalidQuantity {
                    line_id: item.line_id,
                });
            }

            if item.scheme2_quantity > 0 {
                let account = item.claim_account_id.ok_or(
                    SchemeError::ClaimAccountRequiredForScheme2 {
                        line_id: item.line_id,
                    },
                )?;

                match claim_account_id {
                    None => claim_account_id = Some(account),
                    Some(first) if first != account => {
                        return Err(SchemeError::ConflictingClaimAccounts {
                            first,
                            second: account,
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        Ok(ValidatedApplication {
            invoice_id,
            items: request.items,
            actor,
            claim_account_id,
        })
    }

    /// Validates a claim link request.
    ///
    /// # Errors
    ///
    /// `MissingInvoiceId` / `MissingClaimAccountId` / `MissingActor` for
    /// absent arguments.
    pub fn validate_claim_link(
        request: &ClaimLinkRequest,
    ) -> Result<ValidatedClaimLink, SchemeError> {
        Ok(ValidatedClaimLink {
            invoice_id: request.invoice_id.ok_or(SchemeError::MissingInvoiceId)?,
            claim_account_id: request
                .claim_account_id
                .ok_or(SchemeError::MissingClaimAccountId)?,
            actor: request.actor.ok_or(SchemeError::MissingActor)?,
        })
    }
}
