use std::time::Duration;
use tracing::info;

use crate::{
    ledger::{error::LedgerApiError, LedgerClient},
    primitives::AccountId,
};

/// Polls until the account has no unconfirmed transactions left. Returns
/// whether any were pending when called. There is no upper bound on the wait;
/// a transaction that never confirms keeps the caller parked.
pub async fn await_confirmed(
    ledger: &dyn LedgerClient,
    account: &AccountId,
    poll: Duration,
) -> Result<bool, LedgerApiError> {
    let pending = ledger.get_unconfirmed_tx_count(account).await?;
    if pending == 0 {
        return Ok(false);
    }
    info!(%account, pending, "waiting for unconfirmed transactions");
    loop {
        tokio::time::sleep(poll).await;
        if ledger.get_unconfirmed_tx_count(account).await? == 0 {
            return Ok(true);
        }
    }
}

/// Polls until the chain has advanced by `blocks` from the height observed at
/// entry. Unbounded, like [`await_confirmed`].
pub async fn await_blocks(
    ledger: &dyn LedgerClient,
    blocks: u64,
    poll: Duration,
) -> Result<(), LedgerApiError> {
    let initial = ledger.get_current_height().await?;
    loop {
        if ledger.get_current_height().await? >= initial + blocks {
            return Ok(());
        }
        tokio::time::sleep(poll).await;
    }
}
