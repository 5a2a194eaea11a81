//! Payment Gateway Client
//!
//! The [`PaymentGateway`] trait is the seam between the checkout
//! orchestrator and the hosted payment service; [`HttpGateway`] is the
//! production implementation. Tests substitute their own implementations.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::models::{AccountLink, AccountStatus, CheckoutRequest, CheckoutSession, LoginLink};
use crate::error::GatewayError;

/// How long one gateway call may run before the checkout surfaces a
/// failure instead of hanging.
pub const GATEWAY_TIMEOUT: Duration = Duration::from_secs(30);

/// Hosted checkout-session API plus the connected-account operations the
/// admin tooling consumes.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a hosted checkout session and returns the redirect target.
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, GatewayError>;

    /// Retrieves the onboarding state of a connected account.
    async fn account_status(&self, account_id: &str) -> Result<AccountStatus, GatewayError>;

    /// Creates a connected account and its onboarding link.
    async fn create_account_link(&self) -> Result<AccountLink, GatewayError>;

    /// Creates a dashboard login link for an onboarded account.
    async fn create_login_link(&self, account_id: &str) -> Result<LoginLink, GatewayError>;
}

/// Error body the gateway returns on 4xx/5xx.
#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    error: String,
    details: Option<String>,
}

/// JSON-over-HTTP gateway client.
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(GATEWAY_TIMEOUT)
            .build()
            .map_err(|err| GatewayError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn transport(err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout
        } else {
            GatewayError::Transport(err.to_string())
        }
    }

    /// Decodes a success body, or surfaces the gateway's own error message
    /// verbatim on a non-2xx status.
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(|err| {
                GatewayError::Transport(format!("malformed gateway response: {err}"))
            });
        }

        match response.json::<GatewayErrorBody>().await {
            Ok(body) => Err(GatewayError::Rejected {
                message: body.error,
                details: body.details,
            }),
            Err(_) => Err(GatewayError::Rejected {
                message: format!("gateway returned {status}"),
                details: None,
            }),
        }
    }
}

#[async_trait]
impl PaymentGateway for HttpGateway {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, GatewayError> {
        let response = self
            .client
            .post(self.url("/v1/checkout/sessions"))
            .json(request)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::decode(response).await
    }

    async fn account_status(&self, account_id: &str) -> Result<AccountStatus, GatewayError> {
        let response = self
            .client
            .get(self.url("/v1/accounts/status"))
            .query(&[("accountId", account_id)])
            .send()
            .await
            .map_err(Self::transport)?;
        Self::decode(response).await
    }

    async fn create_account_link(&self) -> Result<AccountLink, GatewayError> {
        let response = self
            .client
            .post(self.url("/v1/accounts/links"))
            .send()
            .await
            .map_err(Self::transport)?;
        Self::decode(response).await
    }

    async fn create_login_link(&self, account_id: &str) -> Result<LoginLink, GatewayError> {
        let response = self
            .client
            .post(self.url("/v1/accounts/login-links"))
            .json(&serde_json::json!({ "accountId": account_id }))
            .send()
            .await
            .map_err(Self::transport)?;
        Self::decode(response).await
    }
}
