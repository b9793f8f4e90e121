use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, instrument};

use crate::ledger::LedgerClient;

/// Fee assumed until the first successful fetch, in coins.
pub const INITIAL_STANDARD_FEE: Decimal = dec!(0.0147);

pub struct FeeTracker {
    ledger: Arc<dyn LedgerClient>,
    standard_fee: RwLock<Decimal>,
}

impl FeeTracker {
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self {
            ledger,
            standard_fee: RwLock::new(INITIAL_STANDARD_FEE),
        }
    }

    /// Latest known standard fee in coins.
    pub async fn current(&self) -> Decimal {
        *self.standard_fee.read().await
    }

    /// Fetches the suggested standard fee. On failure the previous value is
    /// kept.
    #[instrument(name = "fees.refresh", skip(self))]
    pub async fn refresh(&self) {
        match self.ledger.suggest_fee().await {
            Ok(fee) => {
                *self.standard_fee.write().await = fee.to_coin();
            }
            Err(error) => {
                error!(%error, "failed to refresh standard fee, keeping previous value");
            }
        }
    }
}
