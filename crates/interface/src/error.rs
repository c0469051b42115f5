use thiserror::Error;

/// 한 사이클 안에서 발생할 수 있는 모든 오류.
/// 스케줄러가 유일한 복구 지점이며, 종류에 상관없이 로그만 남기고 다음 틱으로 넘어간다.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Incorrect status code: {0}")]
    UnexpectedStatus(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("publish error: {0}")]
    Publish(String),
}
