mod config;
mod confirm;
mod distribution;
mod engine;
pub mod error;
mod migrate;

use async_trait::async_trait;
use std::sync::Arc;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::{info, instrument};

pub use config::*;
pub use confirm::{await_blocks, await_confirmed};
pub use distribution::*;
pub use engine::ReconcileEngine;
pub use migrate::PledgeMigrator;

use crate::{fees::FeeTracker, ledger::LedgerClient};
use error::WalletError;

#[async_trait]
pub trait Wallet: Send + Sync {
    /// One-off startup pass before the periodic loops begin.
    async fn init(&self) -> Result<(), WalletError>;

    /// Runs the periodic loops until one of them fails.
    async fn start(self: Arc<Self>) -> Result<(), WalletError>;
}

pub struct PledgeWallet {
    fees: Arc<FeeTracker>,
    engine: Arc<ReconcileEngine>,
    intervals: IntervalsConfig,
}

impl PledgeWallet {
    pub fn new(
        config: WalletConfig,
        intervals: IntervalsConfig,
        ledger: Arc<dyn LedgerClient>,
    ) -> Self {
        let fees = Arc::new(FeeTracker::new(Arc::clone(&ledger)));
        let engine = Arc::new(ReconcileEngine::new(
            config,
            intervals.clone(),
            ledger,
            Arc::clone(&fees),
        ));
        Self {
            fees,
            engine,
            intervals,
        }
    }
}

#[async_trait]
impl Wallet for PledgeWallet {
    #[instrument(name = "wallet.init", skip(self))]
    async fn init(&self) -> Result<(), WalletError> {
        self.fees.refresh().await;
        self.engine.run_once().await;
        Ok(())
    }

    async fn start(self: Arc<Self>) -> Result<(), WalletError> {
        info!(
            fee_refresh = ?self.intervals.fee_refresh,
            reconcile = ?self.intervals.reconcile,
            "starting wallet loops"
        );
        let mut handles = Vec::new();
        handles.push(tokio::spawn(fee_loop(
            Arc::clone(&self.fees),
            self.intervals.fee_refresh,
        )));
        handles.push(tokio::spawn(reconcile_loop(
            Arc::clone(&self.engine),
            self.intervals.reconcile,
        )));
        for handle in handles {
            handle.await?;
        }
        Ok(())
    }
}

async fn fee_loop(fees: Arc<FeeTracker>, period: Duration) {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        fees.refresh().await;
    }
}

async fn reconcile_loop(engine: Arc<ReconcileEngine>, period: Duration) {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        engine.run_once().await;
    }
}
