pub mod error;
pub mod config;
pub mod message;
pub mod request;
pub mod response;
pub mod transport;
pub mod client;
use serde::{Deserialize, Serialize};

pub use client::Client;
pub use config::{ClientConfig, RequestDefaults, TransportConfig};
pub use error::{DecodeError, Error, Stage};
pub use message::{Message, Turn};
pub use request::{encode, GenerationRequest, Metadata};
pub use response::{decode, GenerationResult, StopReason, Usage};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

/*

anthropic_messages: a small async client for the Anthropic
Messages API. The heart of the crate is a pure encode/decode
pair; the client and transport are thin glue around it.

anthropic_messages/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports, roles, models, api versions
│   ├── error.rs        # Error taxonomy (encode/transport/decode)
│   ├── config.rs       # Client, transport and request defaults
│   ├── message.rs      # Turn trait and plain messages
│   ├── request.rs      # GenerationRequest + wire encoder
│   ├── response.rs     # GenerationResult + wire decoder
│   ├── transport.rs    # Transport trait + reqwest binding
│   └── client.rs       # encode -> transport -> decode
├── demos/              # Runnable demos, registered as [[example]]
│                       # targets in Cargo.toml
└── tests/              # Integration tests

*/

/// ANTHROPIC STRUCTURES:

/// Who sent a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role
{   User
  , Assistant
}

impl Role
{   pub fn as_str(&self) -> &'static str
    {   match self
        {   Role::User => "user"
          , Role::Assistant => "assistant"
        }
    }
}

impl std::fmt::Display for Role
{   fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
      -> std::fmt::Result
    {   f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role
{   type Err = crate::error::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {   match s
        {   "user" => Ok(Role::User)
          , "assistant" => Ok(Role::Assistant)
          , other => Err(
              crate::error::DecodeError::UnknownRole(
                other.to_string()
              )
            )
        }
    }
}

/// An Anthropic model, identified on the wire by its dated name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Model
{   /// Claude 3 Opus, high performance, high cost
    #[serde(rename = "claude-3-opus-20240229")]
    Claude3Opus
  , /// Claude 3 Sonnet, superseded by Claude 3.5 Sonnet
    #[serde(rename = "claude-3-sonnet-20240229")]
    Claude3Sonnet
  , /// Claude 3 Haiku, lower performance, low cost
    #[serde(rename = "claude-3-haiku-20240307")]
    Claude3Haiku
  , /// Claude 3.5 Sonnet, high performance, medium cost
    #[default]
    #[serde(rename = "claude-3-5-sonnet-20240620")]
    Claude35Sonnet
}

static ALL_MODELS: [Model; 4] = [
  Model::Claude3Opus
, Model::Claude3Sonnet
, Model::Claude3Haiku
, Model::Claude35Sonnet
];

impl Model
{   /// Every model this crate knows how to name.
    pub fn all() -> &'static [Model]
    {   &ALL_MODELS
    }

    /// Wire identifier, e.g. "claude-3-5-sonnet-20240620"
    pub fn as_str(&self) -> &'static str
    {   match self
        {   Model::Claude3Opus => "claude-3-opus-20240229"
          , Model::Claude3Sonnet => "claude-3-sonnet-20240229"
          , Model::Claude3Haiku => "claude-3-haiku-20240307"
          , Model::Claude35Sonnet => "claude-3-5-sonnet-20240620"
        }
    }
}

impl std::fmt::Display for Model
{   fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
      -> std::fmt::Result
    {   f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Model
{   type Err = crate::error::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {   ALL_MODELS
          .iter()
          .find(|m| m.as_str() == s)
          .copied()
          .ok_or_else(|| {
            crate::error::DecodeError::UnknownModel(s.to_string())
          })
    }
}

/// Value of the `anthropic-version` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion
{   /// Legacy schema; the message codec does not speak it
    V2023_01
  , V2023_06
}

impl ApiVersion
{   pub fn as_str(&self) -> &'static str
    {   match self
        {   ApiVersion::V2023_01 => "2023-01-01"
          , ApiVersion::V2023_06 => "2023-06-01"
        }
    }
}
