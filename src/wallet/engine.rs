use rust_decimal::Decimal;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tracing::{debug, error, info, instrument, trace};

use super::{
    confirm::await_confirmed,
    config::{IntervalsConfig, WalletConfig},
    distribution::{clamp_to_max_pledge, distribution_plan, DUST_FLOOR},
    error::WalletError,
    migrate::PledgeMigrator,
};
use crate::{fees::FeeTracker, ledger::LedgerClient, primitives::*};

#[derive(Default)]
struct AccountOutcome {
    pledged: bool,
    sent: bool,
}

/// Walks every managed account once: migrates stale pledges, splits the
/// spendable balance per the configured fractions and submits the resulting
/// pledge and transfer.
pub struct ReconcileEngine {
    config: WalletConfig,
    intervals: IntervalsConfig,
    accounts: Vec<Account>,
    ledger: Arc<dyn LedgerClient>,
    fees: Arc<FeeTracker>,
    migrator: PledgeMigrator,
    running: AtomicBool,
}

impl ReconcileEngine {
    pub fn new(
        config: WalletConfig,
        intervals: IntervalsConfig,
        ledger: Arc<dyn LedgerClient>,
        fees: Arc<FeeTracker>,
    ) -> Self {
        let accounts = config
            .accounts
            .iter()
            .map(|(id, secret)| Account {
                id: id.clone(),
                secret: secret.clone(),
            })
            .collect();
        let migrator = PledgeMigrator::new(Arc::clone(&ledger), &intervals);
        Self {
            config,
            intervals,
            accounts,
            ledger,
            fees,
            migrator,
            running: AtomicBool::new(false),
        }
    }

    /// Reconciles all accounts concurrently. Overlapping invocations are
    /// collapsed: while a run is in flight, further calls return immediately.
    #[instrument(name = "wallet.reconcile", skip(self))]
    pub async fn run_once(&self) {
        if self
            .running
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            debug!("reconciliation already in progress, skipping");
            return;
        }
        let results = futures::future::join_all(
            self.accounts
                .iter()
                .map(|account| async move { (account, self.reconcile_account(account).await) }),
        )
        .await;
        let mut pledged = false;
        let mut sent = false;
        for (account, result) in results {
            match result {
                Ok(outcome) => {
                    pledged |= outcome.pledged;
                    sent |= outcome.sent;
                }
                Err(error) => {
                    error!(account = %account.id, %error, "account reconciliation failed");
                }
            }
        }
        if pledged {
            if let Some(target) = &self.config.pledge_to {
                info!(%target, "done pledging");
            }
        }
        if sent {
            if let Some(target) = &self.config.send_to {
                info!(%target, "done sending");
            }
        }
        self.running.store(false, Ordering::Release);
    }

    async fn reconcile_account(&self, account: &Account) -> Result<AccountOutcome, WalletError> {
        let standard_fee = self.fees.current().await;
        if self.config.move_other_pledges {
            self.migrator
                .migrate(account, self.config.pledge_to.as_ref(), standard_fee)
                .await?;
        }
        let balance = self.ledger.get_balance(&account.id).await?.to_coin();
        let pledges = self.ledger.get_pledges(&account.id).await?;
        let plan = match distribution_plan(
            balance,
            standard_fee,
            pledges.len(),
            self.config.coins_to_keep,
            self.config.pledge_fraction,
            self.config.send_fraction,
        ) {
            Some(plan) => plan,
            None => {
                trace!(account = %account.id, %balance, "balance below reserve, skipping");
                return Ok(AccountOutcome::default());
            }
        };
        let mut outcome = AccountOutcome::default();
        let fee = Nqt::from_coin(standard_fee);
        if let Some(target) = &self.config.pledge_to {
            let mut to_pledge = plan.to_pledge;
            if let Some(max_pledge) = self.config.max_pledge {
                let currently_pledged = self
                    .ledger
                    .get_pledged_amount(&account.id, target)
                    .await?
                    .to_coin();
                to_pledge = clamp_to_max_pledge(to_pledge, max_pledge, currently_pledged);
            }
            if to_pledge > Decimal::ZERO && to_pledge > self.config.pledge_threshold {
                info!(
                    account = %account.id,
                    amount = %to_pledge,
                    %target,
                    "pledging"
                );
                outcome.pledged = true;
                match self
                    .ledger
                    .create_pledge(target, Nqt::from_coin(to_pledge), &account.secret, fee)
                    .await
                {
                    Ok(()) => {
                        await_confirmed(
                            self.ledger.as_ref(),
                            &account.id,
                            self.intervals.unconfirmed_poll,
                        )
                        .await?;
                    }
                    Err(error) => {
                        error!(account = %account.id, %error, "pledge submission failed");
                    }
                }
            }
        }
        if let Some(target) = &self.config.send_to {
            let to_send = plan.to_send;
            if to_send > DUST_FLOOR && to_send > self.config.send_threshold {
                info!(
                    account = %account.id,
                    amount = %to_send,
                    %target,
                    "sending"
                );
                outcome.sent = true;
                match self
                    .ledger
                    .send_money(
                        target,
                        Nqt::from_coin(to_send),
                        &account.secret,
                        fee,
                        self.config.send_message.as_deref(),
                    )
                    .await
                {
                    Ok(()) => {
                        await_confirmed(
                            self.ledger.as_ref(),
                            &account.id,
                            self.intervals.unconfirmed_poll,
                        )
                        .await?;
                    }
                    Err(error) => {
                        error!(account = %account.id, %error, "transfer submission failed");
                    }
                }
            }
        }
        Ok(outcome)
    }
}
