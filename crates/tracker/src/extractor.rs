use chrono::{DateTime, Utc};

use interface::{AccountSummary, PortfolioSummary, StatsSnapshot, TrackerError};

/// 응답에서 buying power / equity를 골라 스냅샷을 만든다.
/// 장외 시간 평가액이 있으면 그것을, 없으면 정규장 평가액을 쓴다.
pub fn extract(
    account: &AccountSummary,
    portfolio: &PortfolioSummary,
    now: DateTime<Utc>,
) -> Result<StatsSnapshot, TrackerError> {
    let equity = non_empty(&portfolio.equity).ok_or(TrackerError::MissingField("equity"))?;

    // 문자열이 아니거나 없으면 정규장 시간으로 간주
    let extended_hours_equity = non_empty(&portfolio.extended_hours_equity);

    let buying_power = non_empty(&account.unallocated_margin_cash).ok_or(
        TrackerError::MissingField("margin_balances.unallocated_margin_cash"),
    )?;

    let current_equity = extended_hours_equity.unwrap_or(equity);

    Ok(StatsSnapshot {
        buying_power: buying_power.to_string(),
        equity: current_equity.to_string(),
        at: StatsSnapshot::format_at(now),
    })
}

pub fn extract_now(
    account: &AccountSummary,
    portfolio: &PortfolioSummary,
) -> Result<StatsSnapshot, TrackerError> {
    extract(account, portfolio, Utc::now())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
