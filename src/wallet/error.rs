use thiserror::Error;

use crate::ledger::error::LedgerApiError;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("WalletError - LedgerApi: {0}")]
    LedgerApi(#[from] LedgerApiError),
    #[error("WalletError - TaskJoin: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
