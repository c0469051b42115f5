use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `at` 필드 포맷 (예: `2024-03-01 14:05:09 +0000`)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// `accounts/` 응답의 첫 번째 계좌
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub portfolio_url: String,
    /// `margin_balances.unallocated_margin_cash`, 문자열이 아니면 None
    pub unallocated_margin_cash: Option<String>,
}

/// 포트폴리오 리소스
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioSummary {
    pub equity: Option<String>,
    pub extended_hours_equity: Option<String>, // 정규장 외 시간에만 값이 있음
}

/// 토픽으로 발행되는 메시지
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub buying_power: String,
    pub equity: String,
    pub at: String,
}

impl StatsSnapshot {
    pub fn format_at(at: DateTime<Utc>) -> String {
        at.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
