use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use std::fmt;

pub const NQT_PER_COIN: Decimal = dec!(100_000_000);

#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque credential forwarded to the ledger on mutating calls. `Debug` and
/// `Serialize` both redact so it cannot leak through logs or config dumps.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct SecretPhrase(String);

impl SecretPhrase {
    pub fn reveal(&self) -> &str {
        &self.0
    }
}

impl From<String> for SecretPhrase {
    fn from(secret: String) -> Self {
        Self(secret)
    }
}

impl From<&str> for SecretPhrase {
    fn from(secret: &str) -> Self {
        Self(secret.to_string())
    }
}

impl fmt::Debug for SecretPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretPhrase(<redacted>)")
    }
}

impl Serialize for SecretPhrase {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("<redacted>")
    }
}

#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub secret: SecretPhrase,
}

/// An outstanding commitment of funds to a recipient, revocable via
/// cancellation of its order.
#[derive(Debug, Clone)]
pub struct Pledge {
    pub order: OrderId,
    pub recipient: AccountId,
    pub amount: Nqt,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Nqt(Decimal);

impl Nqt {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn to_coin(self) -> Decimal {
        self.0 / NQT_PER_COIN
    }

    pub fn from_coin(coin: Decimal) -> Self {
        Self((coin * NQT_PER_COIN).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
    }

    pub fn into_inner(self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Nqt {
    fn from(nqt: Decimal) -> Self {
        Self(nqt)
    }
}

impl From<u64> for Nqt {
    fn from(nqt: u64) -> Self {
        Self(Decimal::from(nqt))
    }
}

impl From<Nqt> for u64 {
    fn from(nqt: Nqt) -> u64 {
        nqt.0.to_u64().expect("Couldn't convert Nqt")
    }
}

impl std::ops::Add<Nqt> for Nqt {
    type Output = Nqt;
    fn add(self, rhs: Nqt) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign<Nqt> for Nqt {
    fn add_assign(&mut self, rhs: Nqt) {
        *self = Self(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Nqt {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nqt::ZERO, |a, b| a + b)
    }
}

impl<'a> std::iter::Sum<&'a Nqt> for Nqt {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Nqt::ZERO, |a, b| a + *b)
    }
}
