use reqwest::Method;
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use url::Url;

use super::{config::LedgerConfig, error::LedgerApiError, r#trait::LedgerClient};
use crate::primitives::*;

/// Transaction deadline forwarded on every mutating call, in blocks.
const DEADLINE_BLOCKS: u32 = 150;

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
struct BalanceResponse {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(rename = "balanceNQT")]
    balance_nqt: u64,
}

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
struct PledgeEntry {
    order: String,
    recipient: String,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(rename = "amountNQT")]
    amount_nqt: u64,
}

impl From<PledgeEntry> for Pledge {
    fn from(entry: PledgeEntry) -> Self {
        Self {
            order: OrderId::from(entry.order),
            recipient: AccountId::from(entry.recipient),
            amount: Nqt::from(entry.amount_nqt),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct UnconfirmedTransactionsResponse {
    #[serde(rename = "unconfirmedTransactions", default)]
    unconfirmed_transactions: Vec<serde_json::Value>,
}

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
struct MiningInfoResponse {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    height: u64,
}

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
struct SuggestFeeResponse {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    standard: u64,
}

#[derive(Clone, Debug)]
pub struct HttpLedgerClient {
    endpoint: Url,
    client: reqwest::Client,
}

impl HttpLedgerClient {
    pub fn new(config: LedgerConfig) -> Result<Self, LedgerApiError> {
        let endpoint = config.wallet_url.join("boom")?;
        Ok(Self {
            endpoint,
            client: reqwest::Client::new(),
        })
    }

    /// Issues one API call and surfaces the ledger's error envelope
    /// (`errorCode` / `errorDescription`) as a service error before any
    /// payload decoding.
    async fn call(
        &self,
        method: Method,
        request_type: &str,
        params: Vec<(&str, String)>,
    ) -> Result<serde_json::Value, LedgerApiError> {
        let mut query = vec![("requestType", request_type.to_string())];
        query.extend(params);
        let body = self
            .client
            .request(method, self.endpoint.clone())
            .query(&query)
            .send()
            .await?
            .text()
            .await?;
        let value: serde_json::Value = serde_json::from_str(&body)?;
        if let Some(object) = value.as_object() {
            if object.contains_key("errorCode") || object.contains_key("errorDescription") {
                return Err(LedgerApiError::Service {
                    code: object.get("errorCode").and_then(serde_json::Value::as_i64),
                    description: object
                        .get("errorDescription")
                        .and_then(serde_json::Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| value.to_string()),
                });
            }
        }
        Ok(value)
    }
}

#[async_trait::async_trait]
impl LedgerClient for HttpLedgerClient {
    async fn get_balance(&self, account: &AccountId) -> Result<Nqt, LedgerApiError> {
        let value = self
            .call(
                Method::GET,
                "getBalance",
                vec![("account", account.to_string())],
            )
            .await?;
        let balance: BalanceResponse = serde_json::from_value(value)?;
        Ok(Nqt::from(balance.balance_nqt))
    }

    async fn get_pledges(&self, account: &AccountId) -> Result<Vec<Pledge>, LedgerApiError> {
        let value = self
            .call(
                Method::GET,
                "getPledgesByAccount",
                vec![("account", account.to_string())],
            )
            .await?;
        let pledges: Vec<PledgeEntry> = serde_json::from_value(value)?;
        Ok(pledges.into_iter().map(Pledge::from).collect())
    }

    async fn get_unconfirmed_tx_count(
        &self,
        account: &AccountId,
    ) -> Result<usize, LedgerApiError> {
        let value = self
            .call(
                Method::GET,
                "getUnconfirmedTransactions",
                vec![("account", account.to_string())],
            )
            .await?;
        let unconfirmed: UnconfirmedTransactionsResponse = serde_json::from_value(value)?;
        Ok(unconfirmed.unconfirmed_transactions.len())
    }

    async fn get_current_height(&self) -> Result<u64, LedgerApiError> {
        let value = self.call(Method::GET, "getMiningInfo", vec![]).await?;
        let mining_info: MiningInfoResponse = serde_json::from_value(value)?;
        Ok(mining_info.height)
    }

    async fn suggest_fee(&self) -> Result<Nqt, LedgerApiError> {
        let value = self.call(Method::GET, "suggestFee", vec![]).await?;
        let fees: SuggestFeeResponse = serde_json::from_value(value)?;
        Ok(Nqt::from(fees.standard))
    }

    async fn create_pledge(
        &self,
        recipient: &AccountId,
        amount: Nqt,
        secret: &SecretPhrase,
        fee: Nqt,
    ) -> Result<(), LedgerApiError> {
        self.call(
            Method::POST,
            "createPledge",
            vec![
                ("recipient", recipient.to_string()),
                ("amountNQT", u64::from(amount).to_string()),
                ("secretPhrase", secret.reveal().to_string()),
                ("feeNQT", u64::from(fee).to_string()),
                ("deadline", DEADLINE_BLOCKS.to_string()),
            ],
        )
        .await?;
        Ok(())
    }

    async fn cancel_pledge(
        &self,
        order: &OrderId,
        secret: &SecretPhrase,
        fee: Nqt,
    ) -> Result<(), LedgerApiError> {
        let value = self
            .call(
                Method::POST,
                "cancelPledge",
                vec![
                    ("order", order.to_string()),
                    ("secretPhrase", secret.reveal().to_string()),
                    ("feeNQT", u64::from(fee).to_string()),
                    ("deadline", DEADLINE_BLOCKS.to_string()),
                ],
            )
            .await?;
        // The ledger reports a cancellation it cannot process yet through an
        // `error` field outside the regular error envelope.
        if let Some(error) = value.get("error") {
            let reason = error
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(LedgerApiError::CancelNotReady(reason));
        }
        Ok(())
    }

    async fn send_money(
        &self,
        recipient: &AccountId,
        amount: Nqt,
        secret: &SecretPhrase,
        fee: Nqt,
        message: Option<&str>,
    ) -> Result<(), LedgerApiError> {
        let mut params = vec![
            ("recipient", recipient.to_string()),
            ("amountNQT", u64::from(amount).to_string()),
            ("secretPhrase", secret.reveal().to_string()),
            ("feeNQT", u64::from(fee).to_string()),
            ("deadline", DEADLINE_BLOCKS.to_string()),
        ];
        if let Some(message) = message {
            params.push(("message", message.to_string()));
        }
        self.call(Method::POST, "sendMoney", params).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_minor_units_from_string_or_number() {
        let from_string: BalanceResponse =
            serde_json::from_str(r#"{"balanceNQT":"1000000000"}"#).unwrap();
        let from_number: BalanceResponse =
            serde_json::from_str(r#"{"balanceNQT":1000000000}"#).unwrap();
        assert_eq!(from_string.balance_nqt, from_number.balance_nqt);
    }

    #[test]
    fn decodes_large_numeric_heights_without_loss() {
        let raw = format!(r#"{{"height":{}}}"#, u64::MAX);
        let mining_info: MiningInfoResponse = serde_json::from_str(&raw).unwrap();
        assert_eq!(mining_info.height, u64::MAX);
    }

    #[test]
    fn decodes_pledge_entries() {
        let raw = r#"[{"order":"123","recipient":"456","amountNQT":"250000000"}]"#;
        let pledges: Vec<PledgeEntry> = serde_json::from_str(raw).unwrap();
        let pledge = Pledge::from(pledges[0].clone());
        assert_eq!(pledge.recipient, AccountId::from("456"));
        assert_eq!(pledge.amount, Nqt::from(250_000_000_u64));
    }
}
