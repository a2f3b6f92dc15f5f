//! Resend HTTP request methods.
//!
//! Resend signals errors through HTTP status codes with a JSON body of
//! `{statusCode, name, message}`, unlike Cloudflare's success envelope.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::types::ResendErrorBody;
use super::{RESEND_API_BASE, ResendProvider};

const MAX_RETRIES: u32 = 3;

impl ResendProvider {
    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.header("Authorization", format!("Bearer {}", self.api_key))
    }

    /// Turn a non-2xx response into a mapped provider error.
    fn status_error(
        &self,
        status: u16,
        response_text: &str,
        context: ErrorContext,
    ) -> crate::error::ProviderError {
        let body: ResendErrorBody = serde_json::from_str(response_text).unwrap_or(ResendErrorBody {
            name: None,
            message: None,
        });
        let message = body
            .message
            .unwrap_or_else(|| format!("HTTP {status}: {response_text}"));
        let raw = match body.name {
            Some(name) => RawApiError::with_code(name, message),
            None => RawApiError::with_code(status.to_string(), message),
        };
        self.map_error(raw, context)
    }

    /// GET, expecting a 2xx JSON body.
    pub(crate) async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> Result<T> {
        let url = format!("{RESEND_API_BASE}{path}");
        let (status, text) = HttpUtils::execute_request_with_retry(
            self.authed(self.client.get(&url)),
            self.provider_name(),
            "GET",
            &url,
            MAX_RETRIES,
        )
        .await?;

        if !(200..300).contains(&status) {
            return Err(self.status_error(status, &text, context));
        }
        HttpUtils::parse_json(&text, self.provider_name())
    }

    /// POST with a JSON body, expecting a 2xx JSON body.
    pub(crate) async fn post<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        let url = format!("{RESEND_API_BASE}{path}");
        let (status, text) = HttpUtils::execute_request_with_retry(
            self.authed(self.client.post(&url)).json(body),
            self.provider_name(),
            "POST",
            &url,
            MAX_RETRIES,
        )
        .await?;

        if !(200..300).contains(&status) {
            return Err(self.status_error(status, &text, context));
        }
        HttpUtils::parse_json(&text, self.provider_name())
    }

    /// POST without a body, ignoring the response payload.
    pub(crate) async fn post_empty(&self, path: &str, context: ErrorContext) -> Result<()> {
        let url = format!("{RESEND_API_BASE}{path}");
        let (status, text) = HttpUtils::execute_request_with_retry(
            self.authed(self.client.post(&url)),
            self.provider_name(),
            "POST",
            &url,
            MAX_RETRIES,
        )
        .await?;

        if !(200..300).contains(&status) {
            return Err(self.status_error(status, &text, context));
        }
        Ok(())
    }
}
