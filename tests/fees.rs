mod helpers;

use rust_decimal_macros::dec;
use std::sync::Arc;

use helpers::*;
use pledger::{fees::FeeTracker, ledger::LedgerClient};

fn tracker_with(mock: &Arc<MockLedger>) -> FeeTracker {
    let ledger: Arc<dyn LedgerClient> = mock.clone();
    FeeTracker::new(ledger)
}

#[tokio::test]
async fn starts_with_default_fee() -> anyhow::Result<()> {
    let mock = Arc::new(MockLedger::default());
    let tracker = tracker_with(&mock);
    assert_eq!(tracker.current().await, dec!(0.0147));
    Ok(())
}

#[tokio::test]
async fn tracks_suggested_fee() -> anyhow::Result<()> {
    let mock = Arc::new(MockLedger::default());
    mock.set_fee(dec!(0.02));
    let tracker = tracker_with(&mock);

    tracker.refresh().await;

    assert_eq!(tracker.current().await, dec!(0.02));
    Ok(())
}

#[tokio::test]
async fn keeps_last_value_when_fetch_fails() -> anyhow::Result<()> {
    let mock = Arc::new(MockLedger::default());
    mock.set_fee(dec!(0.02));
    let tracker = tracker_with(&mock);
    tracker.refresh().await;

    mock.clear_fee();
    tracker.refresh().await;

    assert_eq!(tracker.current().await, dec!(0.02));
    Ok(())
}
