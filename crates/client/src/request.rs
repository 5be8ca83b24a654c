//! Retry helper for HTTP requests with exponential backoff.
//!
//! This module provides functionality to automatically retry HTTP requests
//! that fail with a retryable status code (429, 502, 503, 504), using
//! exponential backoff between retry attempts.

use reqwest::{RequestBuilder, Response};
use tracing::debug;

use crate::error::{ClientError, Result};

/// Sends an HTTP request with automatic retry logic for transient failures.
///
/// This function wraps a `reqwest::RequestBuilder` with retry logic that:
/// - Detects retryable status codes via [`ClientError::is_retryable_status`]
/// - Implements exponential backoff (1s, 2s, 4s = 2^attempt)
/// - Respects the `max_retries` parameter (0 means a single attempt)
/// - Logs retry attempts with `tracing::debug`
/// - Returns `MaxRetriesExceeded` error when retries are exhausted
///
/// # Errors
///
/// Returns `ClientError::MaxRetriesExceeded` when all retry attempts are
/// exhausted, `ClientError::ApiError` for non-retryable non-success
/// statuses, and propagates connection-level failures as
/// `ClientError::HttpError`.
pub(crate) async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
) -> Result<Response> {
    for attempt in 0..=max_retries {
        // Try to clone the builder for this attempt
        // On first attempt (0), we try to clone to see if retry is possible
        // On subsequent attempts, we clone again for the retry
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None => {
                // Can't clone - this is either:
                // 1. First attempt with a non-clonable builder - use it directly
                // 2. Subsequent attempt but can't clone - error out
                if attempt == 0 {
                    debug!("Request builder cannot be cloned, single attempt only");
                    return builder.send().await.map_err(ClientError::from);
                } else {
                    debug!("Cannot clone request builder for retry");
                    return Err(ClientError::MaxRetriesExceeded(attempt));
                }
            }
        };

        match attempt_builder.send().await {
            Ok(response) if ClientError::is_retryable_status(response.status().as_u16()) => {
                let status = response.status().as_u16();
                if attempt < max_retries {
                    // Calculate exponential backoff: 2^attempt seconds
                    let backoff_secs = 2u64.pow(attempt as u32);
                    debug!(
                        status,
                        attempt = attempt + 1,
                        max_retries = max_retries + 1,
                        backoff_secs = backoff_secs,
                        "Transient response, retrying with exponential backoff"
                    );

                    tokio::time::sleep(tokio::time::Duration::from_secs(backoff_secs)).await;
                } else {
                    debug!(
                        status,
                        attempts = attempt + 1,
                        "Max retries exhausted for transient response"
                    );
                    return Err(ClientError::MaxRetriesExceeded(max_retries + 1));
                }
            }
            Ok(response) => {
                if response.status().is_success() {
                    // Successful response
                    if attempt > 0 {
                        debug!(attempt = attempt + 1, "Request succeeded after retry");
                    }
                    return Ok(response);
                } else {
                    // Handle non-success status codes
                    let status = response.status().as_u16();
                    let url = response.url().to_string();
                    let message = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Could not read error response body".to_string());

                    return Err(ClientError::ApiError {
                        status,
                        url,
                        message,
                    });
                }
            }
            Err(e) => {
                // Connection-level errors propagate immediately
                return Err(ClientError::from(e));
            }
        }
    }

    // This should never be reached, but handle it for completeness
    Err(ClientError::MaxRetriesExceeded(max_retries + 1))
}
