use thiserror::Error;

/// Which step of a call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage
{   Encode
  , Transport
  , Decode
}

/// Error type for every client operation
/// Implements Clone for sending through channels
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error
{   /// Request could not be serialized
    #[error("Encode error: {0}")]
    Encode(String)
  , /// Connection or protocol failure below the API
    #[error("HTTP error: {0}")]
    HttpError(String)
  , /// Transport did not finish within the configured timeout
    #[error("Request timed out")]
    Timeout
  , /// Response body was larger than the transport allows
    #[error("Response body exceeded {limit} bytes")]
    BodyTooLarge { limit: usize }
  , /// API answered with a non-success status
    #[error("API error ({status}, {kind}): {message}")]
    ApiError
    {   status: u16
      , kind: String
      , message: String
    }
  , /// Response body did not match the expected schema
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError)
}

impl Error
{   pub fn stage(&self) -> Stage
    {   match self
        {   Error::Encode(_) => Stage::Encode
          , Error::HttpError(_)
          | Error::Timeout
          | Error::BodyTooLarge { .. }
          | Error::ApiError { .. } => Stage::Transport
          , Error::Decode(_) => Stage::Decode
        }
    }
}

/// Reasons a response document is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError
{   /// Not JSON, wrong type, or a required key is absent
    #[error("malformed response: {0}")]
    Json(String)
  , #[error("missing field `{0}`")]
    MissingField(&'static str)
  , #[error("response content is empty")]
    EmptyContent
  , /// First content block is something other than text
    #[error("unsupported content block type: {0}")]
    UnsupportedContent(String)
  , #[error("unknown role: {0}")]
    UnknownRole(String)
  , #[error("unknown model: {0}")]
    UnknownModel(String)
  , #[error("unknown stop reason: {0}")]
    UnknownStopReason(String)
}

impl From<serde_json::Error> for DecodeError
{   fn from(e: serde_json::Error) -> Self
    {   DecodeError::Json(e.to_string())
    }
}
