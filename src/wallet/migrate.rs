use rust_decimal::Decimal;
use std::{sync::Arc, time::Duration};
use tracing::{error, info, instrument};

use super::{
    confirm::{await_blocks, await_confirmed},
    config::IntervalsConfig,
    error::WalletError,
};
use crate::{
    ledger::{error::LedgerApiError, LedgerClient},
    primitives::*,
};

/// Cancels pledges that point anywhere but the configured target, then waits
/// until the freed funds are spendable again.
pub struct PledgeMigrator {
    ledger: Arc<dyn LedgerClient>,
    unconfirmed_poll: Duration,
    block_poll: Duration,
    cancel_retry: Duration,
}

impl PledgeMigrator {
    pub fn new(ledger: Arc<dyn LedgerClient>, intervals: &IntervalsConfig) -> Self {
        Self {
            ledger,
            unconfirmed_poll: intervals.unconfirmed_poll,
            block_poll: intervals.block_poll,
            cancel_retry: intervals.cancel_retry,
        }
    }

    #[instrument(
        name = "wallet.migrate_pledges",
        skip(self, account, standard_fee),
        fields(account = %account.id)
    )]
    pub async fn migrate(
        &self,
        account: &Account,
        target: Option<&AccountId>,
        standard_fee: Decimal,
    ) -> Result<(), WalletError> {
        let target = match target {
            Some(target) => target,
            None => return Ok(()),
        };
        let outdated: Vec<Pledge> = self
            .ledger
            .get_pledges(&account.id)
            .await?
            .into_iter()
            .filter(|pledge| &pledge.recipient != target)
            .collect();
        if outdated.is_empty() {
            return Ok(());
        }
        let balance = self.ledger.get_balance(&account.id).await?.to_coin();
        let required = standard_fee * Decimal::from(outdated.len() as u64);
        if balance < required {
            error!(
                account = %account.id,
                %balance,
                %required,
                "not enough funds to cover pledge canceling, skipping"
            );
            return Ok(());
        }
        let fee = Nqt::from_coin(standard_fee);
        for pledge in &outdated {
            info!(
                account = %account.id,
                order = %pledge.order,
                amount = %pledge.amount.to_coin(),
                recipient = %pledge.recipient,
                "canceling pledge"
            );
            self.cancel_pledge(&pledge.order, &account.secret, fee)
                .await?;
            await_blocks(self.ledger.as_ref(), 1, self.block_poll).await?;
        }
        await_confirmed(self.ledger.as_ref(), &account.id, self.unconfirmed_poll).await?;
        info!(
            account = %account.id,
            "waiting one more block so canceled pledges are accounted for"
        );
        await_blocks(self.ledger.as_ref(), 1, self.block_poll).await?;
        Ok(())
    }

    /// The ledger rejects a cancellation while the pledge it targets is still
    /// settling. Resubmit until accepted.
    async fn cancel_pledge(
        &self,
        order: &OrderId,
        secret: &SecretPhrase,
        fee: Nqt,
    ) -> Result<(), WalletError> {
        loop {
            match self.ledger.cancel_pledge(order, secret, fee).await {
                Ok(()) => return Ok(()),
                Err(LedgerApiError::CancelNotReady(reason)) => {
                    info!(%order, %reason, "cancellation not accepted yet, retrying");
                    tokio::time::sleep(self.cancel_retry).await;
                }
                Err(error) => return Err(error.into()),
            }
        }
    }
}
