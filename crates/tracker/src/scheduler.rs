use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{info, warn};

use interface::{StatsSnapshot, TrackerError};

/// 틱마다 한 번 실행되는 작업
#[async_trait]
pub trait Cycle: Send + Sync {
    async fn run_once(&self) -> Result<StatsSnapshot, TrackerError>;
}

/// 고정 간격으로 사이클을 순차 실행한다.
/// 한 사이클이 끝나야 다음 대기가 시작되므로 동시에 둘 이상 돌지 않는다.
pub struct Scheduler {
    interval: Duration,
    cycle: Arc<dyn Cycle>,
}

impl Scheduler {
    pub fn new(interval: Duration, cycle: Arc<dyn Cycle>) -> Self {
        Self { interval, cycle }
    }

    /// 간격만큼 기다린 뒤 사이클 하나를 실행하고 결과를 로그로 남긴다
    pub async fn tick(&self) -> Result<StatsSnapshot, TrackerError> {
        sleep(self.interval).await;

        let outcome = self.cycle.run_once().await;
        match &outcome {
            Ok(snapshot) => info!(
                "snapshot published: buying_power={}, equity={}, at={}",
                snapshot.buying_power, snapshot.equity, snapshot.at
            ),
            Err(e) => warn!("cycle failed: {}", e),
        }
        outcome
    }

    /// 프로세스가 종료될 때까지 반환하지 않는다
    pub async fn run(&self) {
        info!("수집 루프 시작: {}초 간격", self.interval.as_secs());
        loop {
            let _ = self.tick().await;
        }
    }
}
