use crate::adapters::http::ErrorBody;
use crate::domain::model::{PointsResponse, ProcessResponse, ReceiptPayload};
use crate::utils::error::{ReceiptError, Result};
use crate::utils::validation::validate_url;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

const RECEIPT_NOT_FOUND: &str = "NOT_FOUND";

/// HTTP client for a running receipt service.
#[derive(Debug, Clone)]
pub struct ReceiptClient {
    base_url: String,
    client: Client,
}

impl ReceiptClient {
    pub fn new(base_url: &str) -> Result<Self> {
        validate_url("server", base_url)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        })
    }

    pub async fn submit(&self, payload: &ReceiptPayload) -> Result<String> {
        let url = format!("{}/receipts/process", self.base_url);
        tracing::debug!("POST {}", url);

        let response = self.client.post(&url).json(payload).send().await?;
        let body: ProcessResponse = Self::decode(Self::into_success(response).await?).await?;
        Ok(body.id)
    }

    pub async fn points(&self, id: &str) -> Result<u64> {
        let url = format!("{}/receipts/{}/points", self.base_url, id);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let response = match Self::into_success(response).await {
            Ok(response) => response,
            // 只有 receipt 路由本身回報的 404 代表 id 不存在
            Err(ReceiptError::ServiceError { status: 404, code, .. }) if code == RECEIPT_NOT_FOUND => {
                return Err(ReceiptError::ReceiptNotFound { id: id.to_string() });
            }
            Err(e) => return Err(e),
        };

        let body: PointsResponse = Self::decode(response).await?;
        Ok(body.points)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn into_success(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        tracing::debug!("Service responded with {}", status);
        let text = response.text().await?;
        let (code, message) = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => (body.code, body.message),
            Err(_) => (status.to_string(), text),
        };

        Err(ReceiptError::ServiceError {
            status: status.as_u16(),
            code,
            message,
        })
    }
}
