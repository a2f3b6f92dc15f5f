//! Cloudflare HTTP request methods.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{CF_API_BASE, CloudflareProvider, CloudflareResponse};

/// Retries for transient failures; business errors return immediately.
const MAX_RETRIES: u32 = 3;

impl CloudflareProvider {
    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.header("Authorization", format!("Bearer {}", self.api_token))
    }

    /// Unwrap the Cloudflare response envelope, mapping API errors.
    fn unwrap_envelope<T>(
        &self,
        response_text: &str,
        context: ErrorContext,
    ) -> Result<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let envelope: CloudflareResponse<T> =
            HttpUtils::parse_json(response_text, self.provider_name())?;

        if !envelope.success {
            let (code, message) = envelope
                .errors
                .and_then(|errors| {
                    errors
                        .first()
                        .map(|e| (e.code.to_string(), e.message.clone()))
                })
                .unwrap_or_else(|| (String::new(), "Unknown error".to_string()));
            return Err(self.map_error(RawApiError::with_code(code, message), context));
        }

        Ok(envelope.result)
    }

    /// GET a single result.
    pub(crate) async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> Result<T> {
        let url = format!("{CF_API_BASE}{path}");
        let (_, text) = HttpUtils::execute_request_with_retry(
            self.authed(self.client.get(&url)),
            self.provider_name(),
            "GET",
            &url,
            MAX_RETRIES,
        )
        .await?;

        self.unwrap_envelope(&text, context)?
            .ok_or_else(|| self.parse_error("Missing result field in response"))
    }

    /// POST with a JSON body.
    pub(crate) async fn post<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        let url = format!("{CF_API_BASE}{path}");
        let (_, text) = HttpUtils::execute_request_with_retry(
            self.authed(self.client.post(&url)).json(body),
            self.provider_name(),
            "POST",
            &url,
            MAX_RETRIES,
        )
        .await?;

        self.unwrap_envelope(&text, context)?
            .ok_or_else(|| self.parse_error("Missing result field in response"))
    }

    /// POST without a body; tolerates an absent `result` field.
    pub(crate) async fn post_empty(&self, path: &str, context: ErrorContext) -> Result<()> {
        let url = format!("{CF_API_BASE}{path}");
        let (_, text) = HttpUtils::execute_request_with_retry(
            self.authed(self.client.post(&url)),
            self.provider_name(),
            "POST",
            &url,
            MAX_RETRIES,
        )
        .await?;

        self.unwrap_envelope::<serde_json::Value>(&text, context)?;
        Ok(())
    }

    /// PUT with a JSON body.
    pub(crate) async fn put<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        let url = format!("{CF_API_BASE}{path}");
        let (_, text) = HttpUtils::execute_request_with_retry(
            self.authed(self.client.put(&url)).json(body),
            self.provider_name(),
            "PUT",
            &url,
            MAX_RETRIES,
        )
        .await?;

        self.unwrap_envelope(&text, context)?
            .ok_or_else(|| self.parse_error("Missing result field in response"))
    }

    /// PATCH with a JSON body.
    pub(crate) async fn patch<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        let url = format!("{CF_API_BASE}{path}");
        let (_, text) = HttpUtils::execute_request_with_retry(
            self.authed(self.client.patch(&url)).json(body),
            self.provider_name(),
            "PATCH",
            &url,
            MAX_RETRIES,
        )
        .await?;

        self.unwrap_envelope(&text, context)?
            .ok_or_else(|| self.parse_error("Missing result field in response"))
    }

    /// DELETE; the result payload is ignored.
    pub(crate) async fn delete(&self, path: &str, context: ErrorContext) -> Result<()> {
        let url = format!("{CF_API_BASE}{path}");
        let (_, text) = HttpUtils::execute_request_with_retry(
            self.authed(self.client.delete(&url)),
            self.provider_name(),
            "DELETE",
            &url,
            MAX_RETRIES,
        )
        .await?;

        self.unwrap_envelope::<serde_json::Value>(&text, context)?;
        Ok(())
    }
}
