//! Bridge service client over HTTP.

use alloy_primitives::Address;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, trace, Instrument};
use url::Url;

use crate::api::{
    ActivationRequest, ActivationResponse, ApiVersion, BalancesResponse, DepositAddressRequest,
    DepositAddressResponse, Operation, RequestStatus, ScheduleTransactionRequest,
    ScheduleTransactionResponse, ServiceErrorBody, SupportedChain, SupportedToken,
    SupportedTokensQuery,
};
use crate::config::{BridgeConfig, API_KEY_HEADER};
use crate::error::{BridgeError, Result};
use crate::spans;
use crate::traits::BridgeApi;

/// Production [`BridgeApi`] implementation using `reqwest`.
///
/// The API key travels in the `x-api-key` header of every request. The API
/// version is fixed by the [`BridgeConfig`] the client is built from.
///
/// # Examples
///
/// ```rust,no_run
/// use deposit_bridge::providers::HttpBridgeClient;
/// use deposit_bridge::{BridgeApi, BridgeConfig};
///
/// # async fn example() -> Result<(), deposit_bridge::BridgeError> {
/// let client = HttpBridgeClient::new(BridgeConfig::new("my-api-key").with_dapp_id("my-dapp"))?;
/// let chains = client.supported_chains().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpBridgeClient {
    config: BridgeConfig,
    client: Client,
}

impl HttpBridgeClient {
    /// Builds a client with the key and content-type headers preset.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidConfig`] when the API key is not a valid
    /// header value, and [`BridgeError::Network`] when the HTTP client cannot
    /// be initialised.
    pub fn new(config: BridgeConfig) -> Result<Self> {
        let mut api_key = HeaderValue::from_str(config.api_key()).map_err(|_| {
            BridgeError::InvalidConfig("API key contains invalid header characters".to_string())
        })?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        debug!(
            base_url = config.base_url(),
            version = %config.version(),
            event = "bridge_client_initialized"
        );

        Ok(Self { config, client })
    }

    /// Client configured from the environment, see [`BridgeConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(BridgeConfig::from_env()?)
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    fn endpoint_url(&self, operation: Operation, suffix: &str) -> Result<(Method, Url)> {
        let endpoint = self.config.version().endpoint(operation)?;
        let url = self.config.url(&format!("{}{suffix}", endpoint.path))?;
        Ok((endpoint.method, url))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        operation: Operation,
        suffix: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let (method, mut url) = self.endpoint_url(operation, suffix)?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        let request = self.client.request(method.clone(), url.clone());
        self.execute(operation, &method, &url, request).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        operation: Operation,
        body: &B,
    ) -> Result<T> {
        let (method, url) = self.endpoint_url(operation, "")?;
        let request = self.client.request(method.clone(), url.clone()).json(body);
        self.execute(operation, &method, &url, request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: Operation,
        method: &Method,
        url: &Url,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let span = spans::http_request(method.as_str(), url, operation);

        async move {
            trace!(event = "http_request_sent");
            let response = request.send().await?;

            let status = response.status();
            tracing::Span::current().record("http.status_code", u64::from(status.as_u16()));
            trace!(status_code = %status, event = "http_response_received");

            let body = response.text().await?;
            if !status.is_success() {
                let err = service_error(operation, status.as_u16(), &body);
                spans::record_error_with_context(
                    "ServiceError",
                    &err.to_string(),
                    Some(operation.as_str()),
                );
                debug!(
                    status_code = status.as_u16(),
                    error = %err,
                    event = "bridge_service_error"
                );
                return Err(err);
            }

            decode_body(operation, &body)
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl BridgeApi for HttpBridgeClient {
    fn version(&self) -> ApiVersion {
        self.config.version()
    }

    #[instrument(skip_all, fields(qr_flow = request.is_qr_flow()))]
    async fn request_deposit_address(
        &self,
        request: &DepositAddressRequest,
    ) -> Result<DepositAddressResponse> {
        let query = request.query(self.version(), self.config.dapp_id())?;
        self.get(request.operation(), "", &query).await
    }

    #[instrument(skip_all, fields(request_id = request.request_id()))]
    async fn activate_deposit_address(
        &self,
        request: &ActivationRequest,
    ) -> Result<ActivationResponse> {
        self.post(Operation::ActivateDepositAddress, request).await
    }

    #[instrument(skip_all, fields(request_id = request.request_id()))]
    async fn schedule_transaction(
        &self,
        request: &ScheduleTransactionRequest,
    ) -> Result<ScheduleTransactionResponse> {
        let body = request.body(self.version());
        self.post(Operation::ScheduleTransaction, &body).await
    }

    #[instrument(skip(self))]
    async fn get_request_status(&self, request_id: &str) -> Result<RequestStatus> {
        if request_id.is_empty() || request_id.contains(['/', '?', '#']) {
            return Err(BridgeError::invalid_request(format!(
                "`{request_id}` is not a valid request id"
            )));
        }
        self.get(Operation::RequestStatus, request_id, &[]).await
    }

    #[instrument(skip_all)]
    async fn supported_tokens(&self, query: &SupportedTokensQuery) -> Result<Vec<SupportedToken>> {
        self.get(Operation::SupportedTokens, "", &query.query()).await
    }

    #[instrument(skip_all)]
    async fn supported_chains(&self) -> Result<Vec<SupportedChain>> {
        self.get(Operation::SupportedChains, "", &[]).await
    }

    #[instrument(skip_all, fields(wallet = %wallet))]
    async fn balances(&self, wallet: Address) -> Result<BalancesResponse> {
        self.get(Operation::Balances, &wallet.to_string(), &[]).await
    }
}

/// Maps a non-2xx answer to an error carrying the service's message, or the
/// operation's default message when the body has none.
fn service_error(operation: Operation, status: u16, body: &str) -> BridgeError {
    let message = serde_json::from_str::<ServiceErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| operation.default_error_message().to_string());

    BridgeError::Service {
        operation,
        status,
        message,
    }
}

fn decode_body<T: DeserializeOwned>(operation: Operation, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| BridgeError::MalformedResponse { operation, source })
}
