use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Transfers at or below this many coins are treated as dust and skipped.
pub const DUST_FLOOR: Decimal = dec!(0.0001);

pub fn round8(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(8, RoundingStrategy::MidpointAwayFromZero)
}

/// Amount in coins that must stay on the account: enough to pay the fee for
/// every outstanding pledge plus two more transactions, or the configured
/// floor, whichever is larger.
pub fn reserve(standard_fee: Decimal, pledge_count: usize, coins_to_keep: Decimal) -> Decimal {
    (standard_fee * Decimal::from(pledge_count as u64 + 2)).max(coins_to_keep)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionPlan {
    pub distributable: Decimal,
    pub to_pledge: Decimal,
    pub to_send: Decimal,
}

/// Splits the balance above the reserve into a pledge part and a transfer
/// part. Returns `None` when the balance does not cover the reserve.
pub fn distribution_plan(
    balance: Decimal,
    standard_fee: Decimal,
    pledge_count: usize,
    coins_to_keep: Decimal,
    pledge_fraction: Decimal,
    send_fraction: Decimal,
) -> Option<DistributionPlan> {
    let reserve = reserve(standard_fee, pledge_count, coins_to_keep);
    if balance < reserve {
        return None;
    }
    let distributable = round8(balance - reserve);
    Some(DistributionPlan {
        distributable,
        to_pledge: round8(distributable * pledge_fraction),
        to_send: round8(distributable * send_fraction),
    })
}

/// Caps a planned pledge so the total pledged to the target never exceeds
/// `max_pledge`.
pub fn clamp_to_max_pledge(
    to_pledge: Decimal,
    max_pledge: Decimal,
    currently_pledged: Decimal,
) -> Decimal {
    (max_pledge - currently_pledged)
        .max(Decimal::ZERO)
        .min(to_pledge)
}
