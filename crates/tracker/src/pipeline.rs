use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use interface::{StatsSnapshot, TrackerError};
use robinhood::AccountApi;

use crate::{extractor::extract_now, publisher::Publisher, scheduler::Cycle};

/// 계좌 조회 → 포트폴리오 조회 → 추출 → 발행을 한 번 수행한다.
/// 어느 단계든 첫 오류에서 중단하며, 부분 스냅샷은 발행하지 않는다.
pub struct Tracker {
    api: Arc<dyn AccountApi>,
    publisher: Arc<dyn Publisher>,
}

impl Tracker {
    pub fn new(api: Arc<dyn AccountApi>, publisher: Arc<dyn Publisher>) -> Self {
        Self { api, publisher }
    }

    pub async fn track_stats(&self) -> Result<StatsSnapshot, TrackerError> {
        let account = self.api.fetch_account_summary().await?;
        debug!("portfolio url: {}", account.portfolio_url);

        let portfolio = self
            .api
            .fetch_portfolio_summary(&account.portfolio_url)
            .await?;

        let snapshot = extract_now(&account, &portfolio)?;
        self.publisher.publish(&snapshot).await?;

        Ok(snapshot)
    }
}

#[async_trait]
impl Cycle for Tracker {
    async fn run_once(&self) -> Result<StatsSnapshot, TrackerError> {
        self.track_stats().await
    }
}
