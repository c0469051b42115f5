use std::sync::Arc;

use eyre::WrapErr;
use tracing::info;

use robinhood::RobinhoodClient;
use tracker::{logger, KafkaPublisher, Scheduler, Tracker, TrackerConfig};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // init error reporting
    color_eyre::install()?;

    // .env + 환경변수
    let config = TrackerConfig::from_env().wrap_err("failed to load configuration")?;

    // init logging
    let _guards =
        logger::init_tracing(config.log_dir.as_deref()).wrap_err("failed to init logging")?;

    info!(
        "tracker 시작: api={}, broker={}, topic={}",
        config.api_endpoint, config.kafka_endpoint, config.producer_topic
    );

    let api = RobinhoodClient::new(
        config.api_endpoint.clone(),
        config.token.clone(),
        config.http_timeout,
    )?;
    let publisher = KafkaPublisher::new(
        config.kafka_endpoint.clone(),
        config.producer_topic.clone(),
        config.ack_timeout,
    );

    let tracker = Tracker::new(Arc::new(api), Arc::new(publisher));
    Scheduler::new(config.interval, Arc::new(tracker)).run().await;

    Ok(())
}
