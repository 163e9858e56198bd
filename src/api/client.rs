//! API client for the exchange REST endpoints

use crate::{
    error::{HyperliquidError, Result},
    signer::Config,
    types::{
        api::ExchangeRequest,
        constants::endpoints::{EXCHANGE_PATH, INFO_PATH},
        market::Meta,
    },
};
use reqwest::Client as HttpClient;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Exchange API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// HTTP client
    http_client: HttpClient,
    /// Base API URL
    base_url: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::CONTENT_TYPE,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .build()
            .map_err(|e| {
                HyperliquidError::config(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            base_url: config.api_url.to_string(),
        })
    }

    /// Base API URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// POST a JSON body; 2xx responses are returned as parsed JSON, anything
    /// else becomes `HyperliquidError::Http` with the raw body
    async fn post(&self, path: &str, body: Vec<u8>) -> Result<Value> {
        let url = self.url(path);
        debug!("POST {} body: {}", url, String::from_utf8_lossy(&body));

        let response = self.http_client.post(&url).body(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            debug!("Response {}: {}", status, text);
            Ok(serde_json::from_str(&text)?)
        } else {
            warn!("POST {} rejected with {}: {}", url, status, text);
            Err(HyperliquidError::http(status.as_u16(), text))
        }
    }

    // === Exchange ===

    /// Submit a signed action to `/exchange`
    pub async fn post_exchange<A: Serialize>(
        &self,
        request: &ExchangeRequest<'_, A>,
    ) -> Result<Value> {
        self.post(EXCHANGE_PATH, request.to_body()?).await
    }

    // === Info ===

    /// Raw `/info` query
    pub async fn info(&self, query: &Value) -> Result<Value> {
        self.post(INFO_PATH, serde_json::to_vec(query)?).await
    }

    /// Perpetuals universe metadata
    pub async fn meta(&self) -> Result<Meta> {
        let response = self.info(&serde_json::json!({ "type": "meta" })).await?;
        Ok(serde_json::from_value(response)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        actions::{Action, CancelEntry},
        api::Signature,
    };

    fn create_test_config(url: &str) -> Config {
        Config::new(
            "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
            "testnet",
            None,
        )
        .unwrap()
        .with_api_url(url)
        .unwrap()
    }

    fn test_signature() -> Signature {
        Signature {
            r: format!("0x{}", "11".repeat(32)),
            s: format!("0x{}", "22".repeat(32)),
            v: 27,
        }
    }

    #[test]
    fn test_url_joining() {
        let client = ApiClient::new(&create_test_config("http://localhost:1234")).unwrap();
        assert_eq!(client.url("/exchange"), "http://localhost:1234/exchange");

        let client = ApiClient::new(&create_test_config("http://localhost:1234/api/")).unwrap();
        assert_eq!(client.url("/info"), "http://localhost:1234/api/info");
    }

    #[tokio::test]
    async fn test_post_exchange_success() {
        let mut server = mockito::Server::new_async().await;
        let action = Action::cancel(vec![CancelEntry::new(3, 91490942)]);
        let request = ExchangeRequest::new(&action, test_signature(), 1_700_000_000_000);

        let mock = server
            .mock("POST", "/exchange")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::Exact(
                String::from_utf8(request.to_body().unwrap()).unwrap(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"ok","response":{"type":"cancel","data":{"statuses":["success"]}}}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&create_test_config(&server.url())).unwrap();
        let response = client.post_exchange(&request).await.unwrap();

        assert_eq!(response["status"], "ok");
        assert_eq!(response["response"]["data"]["statuses"][0], "success");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_post_exchange_http_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/exchange")
            .with_status(422)
            .with_body("Failed to deserialize the JSON body")
            .create_async()
            .await;

        let action = Action::cancel(vec![]);
        let request = ExchangeRequest::new(&action, test_signature(), 1);
        let client = ApiClient::new(&create_test_config(&server.url())).unwrap();

        match client.post_exchange(&request).await {
            Err(HyperliquidError::Http { status, body }) => {
                assert_eq!(status, 422);
                assert_eq!(body, "Failed to deserialize the JSON body");
            }
            other => panic!("Expected Http error, got {:?}", other),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_meta() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/info")
            .match_body(mockito::Matcher::Json(serde_json::json!({"type": "meta"})))
            .with_status(200)
            .with_body(
                r#"{"universe":[{"name":"BTC","szDecimals":5,"maxLeverage":40},{"name":"ETH","szDecimals":4,"maxLeverage":25}]}"#,
            )
            .create_async()
            .await;

        let client = ApiClient::new(&create_test_config(&server.url())).unwrap();
        let meta = client.meta().await.unwrap();

        assert_eq!(meta.universe.len(), 2);
        assert_eq!(meta.asset_index("ETH").unwrap(), 1);
        mock.assert_async().await;
    }
}
