//! Retrying JSON client.
//!
//! [`ApiClient`] is the only place komik touches the network. It issues GET requests through a
//! [`Transport`], retries transient failures with exponential backoff, honors `429 Too Many
//! Requests` responses, and parses successful bodies into typed values.
//!
//! # Retry policy
//!
//! Every retry, including one caused by rate limiting, draws from the same budget
//! ([`RetryPolicy::max_retries`](crate::config::RetryPolicy)), so a call makes at most
//! `max_retries + 1` requests:
//!
//! - `429`: wait for the `Retry-After` header (seconds, default from the policy) and retry
//! - other non-2xx or a network failure: wait the current delay, multiply it by the backoff factor,
//!   and retry
//! - a 2xx body that does not parse: fail immediately
//!
//! # Examples
//!
//! ```no_run
//! use komik::{client::ApiClient, config::RetryPolicy};
//! use serde_json::Value;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::http(RetryPolicy::default())?;
//! let url = "https://api.mangadex.org/manga/tag".parse()?;
//! let tags: Value = client.fetch_json(&url).await?;
//! # Ok(())
//! # }
//! ```

use super::*;
use crate::config::RetryPolicy;

mod http;

pub use http::HttpTransport;

/// Raw response handed back by a [`Transport`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
  /// HTTP status code
  pub status:      u16,
  /// Raw `Retry-After` header value, if present
  pub retry_after: Option<String>,
  /// Response body
  pub body:        Vec<u8>,
}

impl Reply {
  /// A 200 response carrying `body`.
  pub fn ok(body: impl Into<Vec<u8>>) -> Self {
    Self { status: 200, retry_after: None, body: body.into() }
  }

  /// An empty response with the given status.
  pub fn status(status: u16) -> Self { Self { status, ..Self::default() } }

  /// A 429 response, optionally with a `Retry-After` value.
  pub fn rate_limited(retry_after: Option<&str>) -> Self {
    Self { status: 429, retry_after: retry_after.map(String::from), body: Vec::new() }
  }

  /// Whether the status is in the 2xx range.
  pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }

  /// Whether the upstream asked us to slow down.
  pub fn is_rate_limited(&self) -> bool { self.status == 429 }

  /// Parses the `Retry-After` header as (possibly fractional) seconds.
  ///
  /// Missing, negative, infinite, or unparsable values yield `default`. Larger waits are capped at
  /// [`RetryPolicy::MAX_DELAY`].
  pub fn retry_after_or(&self, default: Duration) -> Duration {
    self
      .retry_after
      .as_deref()
      .and_then(|value| value.trim().parse::<f64>().ok())
      .filter(|secs| secs.is_finite())
      .and_then(RetryPolicy::bounded_secs)
      .unwrap_or(default)
  }
}

/// The seam between [`ApiClient`] and the network.
///
/// Implementations perform exactly one GET per call and report the status as data; only a
/// failure to obtain any response is an `Err`.
#[async_trait]
pub trait Transport: Send + Sync {
  /// Performs a single GET request.
  async fn get(&self, url: &Url) -> Result<Reply>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
  async fn get(&self, url: &Url) -> Result<Reply> { (**self).get(url).await }
}

/// JSON client with retries, backoff, and rate-limit handling.
#[derive(Debug, Clone)]
pub struct ApiClient<T = HttpTransport> {
  /// Performs the actual requests
  transport: T,
  /// Retry budget and delays
  policy:    RetryPolicy,
}

impl ApiClient<HttpTransport> {
  /// Creates a client backed by [`HttpTransport`].
  pub fn http(policy: RetryPolicy) -> Result<Self> { Ok(Self::new(HttpTransport::new()?, policy)) }
}

impl<T: Transport> ApiClient<T> {
  /// Creates a client over any transport.
  pub fn new(transport: T, policy: RetryPolicy) -> Self { Self { transport, policy } }

  /// The retry policy in use.
  pub fn policy(&self) -> &RetryPolicy { &self.policy }

  /// The underlying transport.
  pub fn transport(&self) -> &T { &self.transport }

  /// Fetches `url` and parses the body as `D`, retrying transient failures.
  ///
  /// # Errors
  ///
  /// - [`KomikError::RateLimited`] when the budget runs out on a 429
  /// - [`KomikError::Status`] or [`KomikError::Network`] from the last attempt once retries are
  ///   exhausted
  /// - [`KomikError::MalformedResponse`] as soon as a successful body fails to parse
  pub async fn fetch_json<D: DeserializeOwned>(&self, url: &Url) -> Result<D> {
    let mut retries = self.policy.max_retries;
    let mut delay = self.policy.initial_delay();
    let mut attempts = 0u32;

    loop {
      attempts += 1;
      debug!("Fetching {url} (attempt {attempts})");

      let error = match self.transport.get(url).await {
        Ok(reply) if reply.is_success() => {
          trace!("{url} response: {}", String::from_utf8_lossy(&reply.body));
          return parse_body(&reply.body);
        },
        Ok(reply) if reply.is_rate_limited() => {
          if retries == 0 {
            warn!("Rate limited on {url}, no retries left");
            return Err(KomikError::RateLimited { attempts });
          }
          let wait = reply.retry_after_or(self.policy.default_retry_after());
          warn!("Rate limited on {url}, retrying after {:.1}s", wait.as_secs_f64());
          tokio::time::sleep(wait).await;
          retries -= 1;
          continue;
        },
        Ok(reply) => KomikError::Status(reply.status),
        Err(e) => e,
      };

      if retries == 0 || !error.is_transient() {
        return Err(error);
      }
      warn!("Request to {url} failed: {error}. Retries left: {}", retries - 1);
      tokio::time::sleep(delay).await;
      retries -= 1;
      delay = RetryPolicy::bounded_secs(delay.as_secs_f64() * self.policy.backoff).unwrap_or(delay);
    }
  }
}

/// Parses a successful body, mapping shape errors to [`KomikError::MalformedResponse`].
fn parse_body<D: DeserializeOwned>(body: &[u8]) -> Result<D> {
  serde_json::from_slice(body).map_err(|e| KomikError::MalformedResponse(e.to_string()))
}
