use std::time::Duration;

use async_trait::async_trait;
use kafka::producer::{Producer, Record, RequiredAcks};
use tracing::{debug, info};

use interface::{StatsSnapshot, TrackerError};

/// 스냅샷을 메시지로 내보내는 쪽. 파이프라인은 이 트레이트에만 의존한다.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, snapshot: &StatsSnapshot) -> Result<(), TrackerError>;
}

/// 단일 브로커의 토픽으로 동기 전송하는 구현체.
/// 호출마다 연결을 열고 ack를 받은 뒤 닫는다.
#[derive(Debug, Clone)]
pub struct KafkaPublisher {
    broker: String,
    topic: String,
    ack_timeout: Duration,
}

impl KafkaPublisher {
    pub fn new(
        broker: impl Into<String>,
        topic: impl Into<String>,
        ack_timeout: Duration,
    ) -> Self {
        Self {
            broker: broker.into(),
            topic: topic.into(),
            ack_timeout,
        }
    }

    fn send_blocking(&self, payload: &str) -> Result<(), TrackerError> {
        let mut producer = Producer::from_hosts(vec![self.broker.clone()])
            .with_ack_timeout(self.ack_timeout)
            .with_required_acks(RequiredAcks::One)
            .create()
            .map_err(|e| {
                TrackerError::Publish(format!("failed to connect to {}: {}", self.broker, e))
            })?;

        producer
            .send(&Record::from_value(&self.topic, payload.as_bytes()))
            .map_err(|e| {
                TrackerError::Publish(format!("failed to send to {}: {}", self.topic, e))
            })?;

        debug!("ack received from {} for topic {}", self.broker, self.topic);
        Ok(())
    }
}

#[async_trait]
impl Publisher for KafkaPublisher {
    async fn publish(&self, snapshot: &StatsSnapshot) -> Result<(), TrackerError> {
        let payload = snapshot
            .to_json()
            .map_err(|e| TrackerError::Publish(format!("failed to serialize snapshot: {}", e)))?;

        info!("Sending: {}", payload);

        // kafka 클라이언트는 blocking I/O라서 런타임 워커를 막지 않도록 분리
        let publisher = self.clone();
        tokio::task::spawn_blocking(move || publisher.send_blocking(&payload))
            .await
            .map_err(|e| TrackerError::Publish(format!("publish task failed: {}", e)))?
    }
}
