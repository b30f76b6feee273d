//! Configuration for the client, its transport and request defaults

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str
  = "https://api.anthropic.com/v1/messages";

/// 1 MiB
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 1024 * 1024;

pub const DEFAULT_TIMEOUT_SECS: u64 = 40;

/// Values seeded into every request built by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestDefaults
{   /// Model used when the caller does not pick one
    pub model: crate::Model
  , /// Maximum tokens to generate
    pub max_tokens: u32
  , /// System prompt; empty means none
    pub system: String
  , /// Temperature for sampling
    pub temperature: f64
}

impl Default for RequestDefaults
{   fn default() -> Self
    {   RequestDefaults
        {   model: crate::Model::default()
          , max_tokens: 1024
          , system: String::new()
          , temperature: 1.0
        }
    }
}

/// Limits applied by the HTTP transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig
{   /// Whole-exchange timeout in seconds
    pub timeout_secs: u64
  , /// Cap on the buffered response body
    pub max_response_bytes: usize
}

impl Default for TransportConfig
{   fn default() -> Self
    {   TransportConfig
        {   timeout_secs: DEFAULT_TIMEOUT_SECS
          , max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig
{   /// Messages endpoint URL
    pub endpoint: String
  , pub defaults: RequestDefaults
  , pub transport: TransportConfig
}

impl Default for ClientConfig
{   fn default() -> Self
    {   ClientConfig
        {   endpoint: DEFAULT_ENDPOINT.to_string()
          , defaults: RequestDefaults::default()
          , transport: TransportConfig::default()
        }
    }
}
