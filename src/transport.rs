//! HTTP transport behind the client
//!
//! The codec never touches the network. A [`Transport`] takes a
//! finished request body, performs one HTTP exchange, and hands
//! back the complete response body. [`ReqwestTransport`] is the
//! default binding; tests swap in their own.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, trace};

/// One outbound HTTP call
#[derive(Debug, Clone)]
pub struct HttpRequest
{   pub url: String
  , pub method: reqwest::Method
  , pub headers: Vec<(String, String)>
  , pub body: Vec<u8>
}

/// A fully received HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse
{   pub status: u16
  , pub body: Vec<u8>
}

impl HttpResponse
{   pub fn is_success(&self) -> bool
    {   (200..300).contains(&self.status)
    }
}

/// Performs a single request/response exchange.
///
/// Implementations return only once the whole body is in hand, so
/// a cancelled or timed out call never reaches the decoder.
#[async_trait]
pub trait Transport: Send + Sync
{   async fn send(
      &self
    , request: HttpRequest
    ) -> Result<HttpResponse, crate::error::Error>;
}

/// Transport over `reqwest` with a whole-exchange timeout and a
/// cap on the buffered body
pub struct ReqwestTransport
{   http_client: reqwest::Client
  , timeout: Duration
  , max_response_bytes: usize
}

impl ReqwestTransport
{   pub fn new(config: &crate::config::TransportConfig) -> Self
    {   debug!(
          "Creating ReqwestTransport (timeout {}s, cap {} bytes)",
          config.timeout_secs, config.max_response_bytes
        );
        ReqwestTransport
        {   http_client: reqwest::Client::new()
          , timeout: Duration::from_secs(config.timeout_secs)
          , max_response_bytes: config.max_response_bytes
        }
    }

    async fn exchange(
      &self
    , request: HttpRequest
    ) -> Result<HttpResponse, crate::error::Error>
    {   let mut builder = self.http_client
          .request(request.method, request.url.as_str());
        for (name, value) in &request.headers
        {   builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder
          .body(request.body)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            crate::error::Error::HttpError(e.to_string())
          })?;

        let status = response.status().as_u16();
        trace!("Response status: {}", status);

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| {
          error!("Failed to read response body: {}", e);
          crate::error::Error::HttpError(e.to_string())
        })?
        {   if body.len() + chunk.len() > self.max_response_bytes
            {   error!(
                  "Response body exceeded {} bytes",
                  self.max_response_bytes
                );
                return Err(crate::error::Error::BodyTooLarge
                {   limit: self.max_response_bytes
                });
            }
            body.extend_from_slice(&chunk);
        }

        debug!("Received {} byte body", body.len());
        Ok(HttpResponse
        {   status
          , body
        })
    }
}

impl Default for ReqwestTransport
{   fn default() -> Self
    {   ReqwestTransport::new(
          &crate::config::TransportConfig::default()
        )
    }
}

#[async_trait]
impl Transport for ReqwestTransport
{   async fn send(
      &self
    , request: HttpRequest
    ) -> Result<HttpResponse, crate::error::Error>
    {   debug!("{} {}", request.method, request.url);
        tokio::time::timeout(self.timeout, self.exchange(request))
          .await
          .map_err(|_| {
            error!("Request timed out after {:?}", self.timeout);
            crate::error::Error::Timeout
          })?
    }
}
