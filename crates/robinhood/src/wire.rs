use serde::{de::DeserializeOwned, Deserialize, Deserializer};

use interface::{AccountSummary, PortfolioSummary, TrackerError};

#[derive(Debug, Deserialize)]
struct AccountsPage {
    results: Vec<AccountRecord>,
}

#[derive(Debug, Deserialize)]
struct AccountRecord {
    #[serde(default, deserialize_with = "lenient")]
    portfolio: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    margin_balances: Option<MarginBalances>,
}

#[derive(Debug, Deserialize)]
struct MarginBalances {
    #[serde(default, deserialize_with = "lenient")]
    unallocated_margin_cash: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PortfolioRecord {
    #[serde(default, deserialize_with = "lenient")]
    equity: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    extended_hours_equity: Option<String>,
}

/// 타입이 맞지 않는 값은 에러 대신 None으로 읽는다.
/// 필수 여부는 상위(추출 단계)에서 판단한다.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn truncate(body: &str) -> String {
    body.chars().take(200).collect()
}

/// 최상위가 JSON 객체인 경우에만 `T`로 변환한다
fn parse_object<T: DeserializeOwned>(body: &str, what: &str) -> Result<T, TrackerError> {
    let malformed = |e: String| {
        TrackerError::MalformedResponse(format!(
            "failed to parse {} response: {}, response: {}",
            what,
            e,
            truncate(body)
        ))
    };

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(malformed("expected a JSON object".to_string()));
    }
    serde_json::from_value(value).map_err(|e| malformed(e.to_string()))
}

/// `accounts/` 응답에서 첫 번째 계좌를 꺼낸다
pub(crate) fn parse_account_summary(body: &str) -> Result<AccountSummary, TrackerError> {
    let page: AccountsPage = parse_object(body, "accounts")?;

    let account = page.results.into_iter().next().ok_or_else(|| {
        TrackerError::MalformedResponse("accounts response has empty `results`".to_string())
    })?;

    let portfolio_url = account
        .portfolio
        .filter(|url| !url.is_empty())
        .ok_or_else(|| {
            TrackerError::MalformedResponse(
                "`portfolio` is missing, empty or not a string".to_string(),
            )
        })?;

    Ok(AccountSummary {
        portfolio_url,
        unallocated_margin_cash: account
            .margin_balances
            .and_then(|m| m.unallocated_margin_cash),
    })
}

pub(crate) fn parse_portfolio_summary(body: &str) -> Result<PortfolioSummary, TrackerError> {
    let portfolio: PortfolioRecord = parse_object(body, "portfolio")?;

    Ok(PortfolioSummary {
        equity: portfolio.equity,
        extended_hours_equity: portfolio.extended_hours_equity,
    })
}
