use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, StatusCode, Url};
use tracing::debug;

use interface::{AccountSummary, PortfolioSummary, TrackerError};

mod wire;

pub const DEFAULT_API_ENDPOINT: &str = "https://api.robinhood.com/";

/// 계좌/포트폴리오 조회 클라이언트. 파이프라인은 이 트레이트에만 의존한다.
#[async_trait]
pub trait AccountApi: Send + Sync {
    /// `accounts/`를 조회해 첫 번째 계좌를 반환
    async fn fetch_account_summary(&self) -> Result<AccountSummary, TrackerError>;

    /// 계좌에 연결된 포트폴리오 리소스를 조회
    async fn fetch_portfolio_summary(&self, url: &str) -> Result<PortfolioSummary, TrackerError>;
}

#[derive(Clone)]
pub struct RobinhoodClient {
    pub(crate) http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl RobinhoodClient {
    /// `base_url`은 `/`로 끝나야 `accounts/`가 그 아래로 붙는다
    pub fn new(
        base_url: Url,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TrackerError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url,
            token: token.into(),
        })
    }

    /// 인증 헤더를 붙여 GET, 200이 아니면 실패
    async fn get_body(&self, url: Url) -> Result<String, TrackerError> {
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json")
            .header(header::AUTHORIZATION, format!("Token {}", self.token))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(TrackerError::UnexpectedStatus(status.to_string()));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl AccountApi for RobinhoodClient {
    async fn fetch_account_summary(&self) -> Result<AccountSummary, TrackerError> {
        let url = self.base_url.join("accounts/").map_err(|e| {
            TrackerError::MalformedResponse(format!("invalid accounts url: {}", e))
        })?;

        let body = self.get_body(url).await?;
        wire::parse_account_summary(&body)
    }

    async fn fetch_portfolio_summary(&self, url: &str) -> Result<PortfolioSummary, TrackerError> {
        // 절대 URL은 그대로, 상대 경로는 API 호스트 기준으로 해석
        let url = self.base_url.join(url).map_err(|e| {
            TrackerError::MalformedResponse(format!("invalid portfolio url {:?}: {}", url, e))
        })?;

        let body = self.get_body(url).await?;
        wire::parse_portfolio_summary(&body)
    }
}
