#![allow(dead_code)]

use rust_decimal::Decimal;
use std::{
    collections::{HashMap, HashSet, VecDeque},
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
    time::Duration,
};

use pledger::{
    ledger::{error::LedgerApiError, LedgerClient},
    primitives::*,
    wallet::IntervalsConfig,
};

pub fn test_intervals() -> IntervalsConfig {
    IntervalsConfig {
        unconfirmed_poll: Duration::from_millis(1),
        block_poll: Duration::from_millis(1),
        cancel_retry: Duration::from_millis(1),
        ..IntervalsConfig::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCall {
    CreatePledge {
        recipient: AccountId,
        amount: Nqt,
        fee: Nqt,
    },
    CancelPledge {
        order: OrderId,
        fee: Nqt,
    },
    SendMoney {
        recipient: AccountId,
        amount: Nqt,
        fee: Nqt,
        message: Option<String>,
    },
}

/// Scripted in-memory stand-in for the remote ledger. Mutating calls are
/// recorded in invocation order.
#[derive(Default)]
pub struct MockLedger {
    balances: Mutex<HashMap<AccountId, Nqt>>,
    pledges: Mutex<HashMap<AccountId, Vec<Pledge>>>,
    unconfirmed: Mutex<HashMap<AccountId, VecDeque<usize>>>,
    height: AtomicU64,
    fee: Mutex<Option<Nqt>>,
    cancel_rejections: Mutex<HashMap<OrderId, usize>>,
    failing_balances: Mutex<HashSet<AccountId>>,
    balance_delay: Mutex<Option<Duration>>,
    calls: Mutex<Vec<LedgerCall>>,
}

impl MockLedger {
    pub fn set_balance(&self, account: impl Into<AccountId>, coins: Decimal) {
        self.balances
            .lock()
            .unwrap()
            .insert(account.into(), Nqt::from_coin(coins));
    }

    pub fn add_pledge(
        &self,
        account: impl Into<AccountId>,
        order: impl Into<OrderId>,
        recipient: impl Into<AccountId>,
        coins: Decimal,
    ) {
        self.pledges
            .lock()
            .unwrap()
            .entry(account.into())
            .or_default()
            .push(Pledge {
                order: order.into(),
                recipient: recipient.into(),
                amount: Nqt::from_coin(coins),
            });
    }

    pub fn queue_unconfirmed(&self, account: impl Into<AccountId>, counts: &[usize]) {
        self.unconfirmed
            .lock()
            .unwrap()
            .insert(account.into(), counts.iter().copied().collect());
    }

    pub fn set_fee(&self, coins: Decimal) {
        *self.fee.lock().unwrap() = Some(Nqt::from_coin(coins));
    }

    pub fn clear_fee(&self) {
        *self.fee.lock().unwrap() = None;
    }

    pub fn reject_cancels(&self, order: impl Into<OrderId>, times: usize) {
        self.cancel_rejections
            .lock()
            .unwrap()
            .insert(order.into(), times);
    }

    pub fn fail_balance(&self, account: impl Into<AccountId>) {
        self.failing_balances.lock().unwrap().insert(account.into());
    }

    pub fn delay_balance(&self, delay: Duration) {
        *self.balance_delay.lock().unwrap() = Some(delay);
    }

    pub fn recorded_calls(&self) -> Vec<LedgerCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LedgerClient for MockLedger {
    async fn get_balance(&self, account: &AccountId) -> Result<Nqt, LedgerApiError> {
        let delay = *self.balance_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing_balances.lock().unwrap().contains(account) {
            return Err(LedgerApiError::Service {
                code: Some(5),
                description: "Unknown account".to_string(),
            });
        }
        Ok(self
            .balances
            .lock()
            .unwrap()
            .get(account)
            .copied()
            .unwrap_or(Nqt::ZERO))
    }

    async fn get_pledges(&self, account: &AccountId) -> Result<Vec<Pledge>, LedgerApiError> {
        Ok(self
            .pledges
            .lock()
            .unwrap()
            .get(account)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_unconfirmed_tx_count(
        &self,
        account: &AccountId,
    ) -> Result<usize, LedgerApiError> {
        Ok(self
            .unconfirmed
            .lock()
            .unwrap()
            .get_mut(account)
            .and_then(VecDeque::pop_front)
            .unwrap_or(0))
    }

    async fn get_current_height(&self) -> Result<u64, LedgerApiError> {
        Ok(self.height.fetch_add(1, Ordering::SeqCst))
    }

    async fn suggest_fee(&self) -> Result<Nqt, LedgerApiError> {
        (*self.fee.lock().unwrap()).ok_or_else(|| LedgerApiError::Service {
            code: None,
            description: "fee oracle offline".to_string(),
        })
    }

    async fn create_pledge(
        &self,
        recipient: &AccountId,
        amount: Nqt,
        _secret: &SecretPhrase,
        fee: Nqt,
    ) -> Result<(), LedgerApiError> {
        self.calls.lock().unwrap().push(LedgerCall::CreatePledge {
            recipient: recipient.clone(),
            amount,
            fee,
        });
        Ok(())
    }

    async fn cancel_pledge(
        &self,
        order: &OrderId,
        _secret: &SecretPhrase,
        fee: Nqt,
    ) -> Result<(), LedgerApiError> {
        self.calls.lock().unwrap().push(LedgerCall::CancelPledge {
            order: order.clone(),
            fee,
        });
        {
            let mut rejections = self.cancel_rejections.lock().unwrap();
            if let Some(remaining) = rejections.get_mut(order) {
                if *remaining > 0 {
                    *remaining -= 1;
                    return Err(LedgerApiError::CancelNotReady(
                        "Unable to process your request".to_string(),
                    ));
                }
            }
        }
        for pledges in self.pledges.lock().unwrap().values_mut() {
            pledges.retain(|pledge| &pledge.order != order);
        }
        Ok(())
    }

    async fn send_money(
        &self,
        recipient: &AccountId,
        amount: Nqt,
        _secret: &SecretPhrase,
        fee: Nqt,
        message: Option<&str>,
    ) -> Result<(), LedgerApiError> {
        self.calls.lock().unwrap().push(LedgerCall::SendMoney {
            recipient: recipient.clone(),
            amount,
            fee,
            message: message.map(str::to_string),
        });
        Ok(())
    }
}
