use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default = "default_wallet_url")]
    pub wallet_url: Url,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            wallet_url: default_wallet_url(),
        }
    }
}

fn default_wallet_url() -> Url {
    "http://localhost:8125".parse().expect("default wallet url")
}
