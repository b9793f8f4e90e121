use serde::{Deserialize, Serialize};

use crate::{
    ledger::LedgerConfig,
    wallet::{IntervalsConfig, WalletConfig},
};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub intervals: IntervalsConfig,
}
