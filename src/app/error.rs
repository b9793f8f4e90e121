use thiserror::Error;

use crate::{ledger::error::LedgerApiError, wallet::error::WalletError};

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("ApplicationError - Wallet: {0}")]
    Wallet(#[from] WalletError),
    #[error("ApplicationError - LedgerApi: {0}")]
    LedgerApi(#[from] LedgerApiError),
}
