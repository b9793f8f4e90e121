mod config;
pub mod error;

use std::sync::Arc;

pub use config::*;
use error::ApplicationError;

use crate::{
    ledger::HttpLedgerClient,
    wallet::{PledgeWallet, Wallet},
};

pub struct App {
    wallet: Arc<dyn Wallet>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self, ApplicationError> {
        let ledger = Arc::new(HttpLedgerClient::new(config.ledger)?);
        let wallet = Arc::new(PledgeWallet::new(config.wallet, config.intervals, ledger));
        Ok(Self { wallet })
    }

    pub async fn run(self) -> Result<(), ApplicationError> {
        self.wallet.init().await?;
        Arc::clone(&self.wallet).start().await?;
        Ok(())
    }
}
