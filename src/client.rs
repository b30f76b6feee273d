use log::{debug, error, info, trace};

use crate::message::Turn;
use crate::request::GenerationRequest;
use crate::response::GenerationResult;
use crate::transport::{HttpRequest, ReqwestTransport, Transport};

/// Client for the Messages endpoint
///
/// Holds configuration only: every call encodes, sends and
/// decodes independently, so one client can serve concurrent
/// callers.
pub struct Client<T = ReqwestTransport>
{   api_key: String
  , api_version: crate::ApiVersion
  , config: crate::config::ClientConfig
  , transport: T
}

impl Client<ReqwestTransport>
{   /// Create a client using the default reqwest transport
    pub fn new(
      api_key: impl Into<String>
    , config: crate::config::ClientConfig
    ) -> Self
    {   let transport = ReqwestTransport::new(&config.transport);
        Client::with_transport(api_key, config, transport)
    }
}

impl<T: Transport> Client<T>
{   /// Create a client over any transport
    pub fn with_transport(
      api_key: impl Into<String>
    , config: crate::config::ClientConfig
    , transport: T
    ) -> Self
    {   debug!("Creating Client for {}", config.endpoint);
        Client
        {   api_key: api_key.into()
          , api_version: crate::ApiVersion::V2023_06
          , config
          , transport
        }
    }

    pub fn config(&self) -> &crate::config::ClientConfig
    {   &self.config
    }

    pub fn api_version(&self) -> crate::ApiVersion
    {   self.api_version
    }

    /// An empty request seeded with this client's defaults
    pub fn request(&self) -> GenerationRequest
    {   GenerationRequest::from_defaults(&self.config.defaults)
    }

    /// Send turns using the configured defaults
    pub async fn send_messages(
      &self
    , messages: Vec<Box<dyn Turn>>
    ) -> Result<GenerationResult, crate::error::Error>
    {   let request = self.request().with_messages(messages);
        self.send(&request).await
    }

    /// Encode, send and decode one request
    pub async fn send(
      &self
    , request: &GenerationRequest
    ) -> Result<GenerationResult, crate::error::Error>
    {   debug!(
          "send for model {} with {} turns",
          request.model(), request.turns().len()
        );

        let body = request.encode()?;
        let http_request = HttpRequest
        {   url: self.config.endpoint.clone()
          , method: reqwest::Method::POST
          , headers: self.headers()
          , body
        };

        let response = self.transport.send(http_request).await?;
        trace!("Response status: {}", response.status);

        if !response.is_success()
        {   let (kind, message)
              = crate::response::decode_api_error(&response.body);
            error!(
              "API error {} ({}): {}",
              response.status, kind, message
            );
            return Err(crate::error::Error::ApiError
            {   status: response.status
              , kind
              , message
            });
        }

        let result = crate::response::decode(&response.body)?;
        info!(
          "Response {} finished with {} ({} in / {} out tokens)",
          result.id(),
          result.stop_reason().tag(),
          result.usage().input_tokens,
          result.usage().output_tokens
        );
        Ok(result)
    }

    fn headers(&self) -> Vec<(String, String)>
    {   vec![
          ("content-type".to_string(), "application/json".to_string())
        , ("x-api-key".to_string(), self.api_key.clone())
        , ( "anthropic-version".to_string()
          , self.api_version.as_str().to_string()
          )
        ]
    }
}
