//! Resend error mapping.

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::ResendProvider;

/// Resend error name mapping.
/// Reference: <https://resend.com/docs/api-reference/errors>
impl ProviderErrorMapper for ResendProvider {
    fn provider_name(&self) -> &'static str {
        "resend"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            Some("missing_api_key" | "invalid_api_key" | "restricted_api_key" | "401") => {
                ProviderError::InvalidCredentials {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }

            Some("not_found" | "404") => ProviderError::DomainNotFound {
                provider: self.provider_name().to_string(),
                domain: context.domain.unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            Some("rate_limit_exceeded" | "daily_quota_exceeded" | "429") => {
                ProviderError::RateLimited {
                    provider: self.provider_name().to_string(),
                    retry_after: None,
                    raw_message: Some(raw.message),
                }
            }

            Some("validation_error" | "invalid_parameter" | "400" | "422") => {
                // A duplicate domain registration also surfaces as a
                // validation error; callers that need the distinction look at
                // the message (see `register_domain`).
                if raw.message.to_lowercase().contains("already") {
                    ProviderError::RecordExists {
                        provider: self.provider_name().to_string(),
                        record_name: context.domain.unwrap_or_else(|| "<unknown>".to_string()),
                        raw_message: Some(raw.message),
                    }
                } else {
                    ProviderError::InvalidParameter {
                        provider: self.provider_name().to_string(),
                        param: "general".to_string(),
                        detail: raw.message,
                    }
                }
            }

            Some("403") => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            _ => self.unknown_error(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> ResendProvider {
        ResendProvider::new(String::new())
    }

    fn ctx() -> ErrorContext {
        ErrorContext::default()
    }

    fn ctx_with_domain() -> ErrorContext {
        ErrorContext {
            domain: Some("example.com".to_string()),
            ..ErrorContext::default()
        }
    }

    #[test]
    fn invalid_api_key() {
        let err = provider().map_error(RawApiError::with_code("invalid_api_key", "bad"), ctx());
        assert!(matches!(err, ProviderError::InvalidCredentials { .. }));
    }

    #[test]
    fn bare_401_status() {
        let err = provider().map_error(RawApiError::with_code("401", "unauthorized"), ctx());
        assert!(matches!(err, ProviderError::InvalidCredentials { .. }));
    }

    #[test]
    fn not_found_maps_domain() {
        let err = provider().map_error(
            RawApiError::with_code("not_found", "domain not found"),
            ctx_with_domain(),
        );
        assert!(matches!(
            err,
            ProviderError::DomainNotFound { domain, .. } if domain == "example.com"
        ));
    }

    #[test]
    fn rate_limit() {
        let err = provider().map_error(
            RawApiError::with_code("rate_limit_exceeded", "slow down"),
            ctx(),
        );
        assert!(matches!(err, ProviderError::RateLimited { .. }));
    }

    #[test]
    fn validation_error_duplicate_becomes_exists() {
        let err = provider().map_error(
            RawApiError::with_code("validation_error", "Domain already exists"),
            ctx_with_domain(),
        );
        assert!(matches!(err, ProviderError::RecordExists { .. }));
    }

    #[test]
    fn validation_error_other() {
        let err = provider().map_error(
            RawApiError::with_code("validation_error", "name is invalid"),
            ctx(),
        );
        assert!(matches!(err, ProviderError::InvalidParameter { .. }));
    }

    #[test]
    fn fallback_unknown() {
        let err = provider().map_error(
            RawApiError::with_code("internal_server_error", "oops"),
            ctx(),
        );
        assert!(matches!(err, ProviderError::Unknown { .. }));
    }
}
