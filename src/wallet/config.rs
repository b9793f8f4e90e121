use derive_builder::Builder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::{collections::HashMap, time::Duration};

use crate::primitives::*;

#[derive(Debug, Clone, Serialize, Deserialize, Builder, Default)]
#[builder(default, setter(into))]
pub struct WalletConfig {
    /// Accounts under management, keyed by numeric account id.
    #[serde(default)]
    pub accounts: HashMap<AccountId, SecretPhrase>,
    /// Minimum pledge size in coins. Smaller pledges are skipped.
    #[serde(default)]
    pub pledge_threshold: Decimal,
    #[serde(default)]
    pub pledge_to: Option<AccountId>,
    /// Minimum transfer size in coins. Smaller transfers are skipped.
    #[serde(default)]
    pub send_threshold: Decimal,
    #[serde(default)]
    pub send_to: Option<AccountId>,
    #[serde(default)]
    pub send_message: Option<String>,
    /// Cancel pledges that do not point at `pledge_to` before distributing.
    #[serde(default)]
    pub move_other_pledges: bool,
    /// Cap in coins on the total amount pledged to `pledge_to`.
    #[serde(default)]
    pub max_pledge: Option<Decimal>,
    /// Balance in coins that always stays on each account.
    #[serde(default)]
    pub coins_to_keep: Decimal,
    #[serde(default)]
    pub pledge_fraction: Decimal,
    #[serde(default)]
    pub send_fraction: Decimal,
}

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalsConfig {
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    #[serde(default = "default_fee_refresh")]
    pub fee_refresh: Duration,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    #[serde(default = "default_reconcile")]
    pub reconcile: Duration,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    #[serde(default = "default_unconfirmed_poll")]
    pub unconfirmed_poll: Duration,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    #[serde(default = "default_block_poll")]
    pub block_poll: Duration,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    #[serde(default = "default_cancel_retry")]
    pub cancel_retry: Duration,
}

impl Default for IntervalsConfig {
    fn default() -> Self {
        Self {
            fee_refresh: default_fee_refresh(),
            reconcile: default_reconcile(),
            unconfirmed_poll: default_unconfirmed_poll(),
            block_poll: default_block_poll(),
            cancel_retry: default_cancel_retry(),
        }
    }
}

fn default_fee_refresh() -> Duration {
    Duration::from_secs(60)
}

fn default_reconcile() -> Duration {
    Duration::from_secs(60 * 10)
}

fn default_unconfirmed_poll() -> Duration {
    Duration::from_secs(10)
}

fn default_block_poll() -> Duration {
    Duration::from_secs(5)
}

fn default_cancel_retry() -> Duration {
    Duration::from_secs(10)
}
