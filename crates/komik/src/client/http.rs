use reqwest::header::{RETRY_AFTER, USER_AGENT};

use super::*;

/// User agent sent with every request; MangaDex rejects requests without one.
const KOMIK_USER_AGENT: &str = concat!("komik/", env!("CARGO_PKG_VERSION"));

/// [`Transport`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
  /// Connection pool reused across requests
  client: reqwest::Client,
}

impl HttpTransport {
  /// Builds the underlying client.
  pub fn new() -> Result<Self> {
    let client = reqwest::Client::builder().build()?;
    Ok(Self { client })
  }
}

#[async_trait]
impl Transport for HttpTransport {
  async fn get(&self, url: &Url) -> Result<Reply> {
    let response = self.client.get(url.clone()).header(USER_AGENT, KOMIK_USER_AGENT).send().await?;

    let status = response.status().as_u16();
    let retry_after = response
      .headers()
      .get(RETRY_AFTER)
      .and_then(|value| value.to_str().ok())
      .map(String::from);
    let body = response.bytes().await?.to_vec();

    Ok(Reply { status, retry_after, body })
  }
}
