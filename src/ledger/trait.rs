use async_trait::async_trait;

use super::error::LedgerApiError;
use crate::primitives::*;

/// Typed operations against the remote ledger. All amounts cross this seam
/// in minor units (`Nqt`).
#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn get_balance(&self, account: &AccountId) -> Result<Nqt, LedgerApiError>;

    async fn get_pledges(&self, account: &AccountId) -> Result<Vec<Pledge>, LedgerApiError>;

    async fn get_unconfirmed_tx_count(
        &self,
        account: &AccountId,
    ) -> Result<usize, LedgerApiError>;

    async fn get_current_height(&self) -> Result<u64, LedgerApiError>;

    async fn suggest_fee(&self) -> Result<Nqt, LedgerApiError>;

    async fn create_pledge(
        &self,
        recipient: &AccountId,
        amount: Nqt,
        secret: &SecretPhrase,
        fee: Nqt,
    ) -> Result<(), LedgerApiError>;

    /// May fail with [`LedgerApiError::CancelNotReady`] when the ledger
    /// cannot process the cancellation yet. Safe to resubmit until accepted.
    async fn cancel_pledge(
        &self,
        order: &OrderId,
        secret: &SecretPhrase,
        fee: Nqt,
    ) -> Result<(), LedgerApiError>;

    async fn send_money(
        &self,
        recipient: &AccountId,
        amount: Nqt,
        secret: &SecretPhrase,
        fee: Nqt,
        message: Option<&str>,
    ) -> Result<(), LedgerApiError>;

    async fn get_pledged_amount(
        &self,
        account: &AccountId,
        recipient: &AccountId,
    ) -> Result<Nqt, LedgerApiError> {
        Ok(self
            .get_pledges(account)
            .await?
            .into_iter()
            .filter(|pledge| &pledge.recipient == recipient)
            .map(|pledge| pledge.amount)
            .sum())
    }
}
