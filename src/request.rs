//! Generation requests and their wire encoding

use log::{debug, error, trace};
use serde::ser::{Error as _, SerializeStruct, Serializer};
use serde::Serialize;

use crate::message::Turn;

/// Caller-side metadata attached to a request.
///
/// `user_id` should be an opaque identifier (uuid, hash); the API
/// uses it to help detect abuse. Never put names or emails here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata
{   user_id: String
}

impl Metadata
{   pub fn new(user_id: impl Into<String>) -> Self
    {   Metadata
        {   user_id: user_id.into()
        }
    }

    pub fn user_id(&self) -> &str
    {   &self.user_id
    }
}

/// A request to the Messages endpoint
///
/// Turns are kept in insertion order and encoded as-is: no
/// reordering, no merging of consecutive same-role turns. The
/// first turn should be a user turn; the API enforces that, not
/// this type.
#[derive(Debug)]
pub struct GenerationRequest
{   model: crate::Model
  , messages: Vec<Box<dyn Turn>>
  , max_tokens: u32
  , metadata: Option<Metadata>
  , stop_sequences: Vec<String>
  , system: String
  , temperature: f64
  , top_k: Option<u32>
  , top_p: Option<f64>
}

/// One element of the `messages` array.
#[derive(Serialize)]
struct WireTurn<'a>
{   role: crate::Role
  , content: &'a str
}

impl GenerationRequest
{   /// Empty request with no system prompt and temperature 1.0
    pub fn new(model: crate::Model, max_tokens: u32) -> Self
    {   GenerationRequest
        {   model
          , messages: Vec::new()
          , max_tokens
          , metadata: None
          , stop_sequences: Vec::new()
          , system: String::new()
          , temperature: 1.0
          , top_k: None
          , top_p: None
        }
    }

    /// Empty request seeded from configured defaults
    pub fn from_defaults(
      defaults: &crate::config::RequestDefaults
    ) -> Self
    {   GenerationRequest::new(defaults.model, defaults.max_tokens)
          .with_system(defaults.system.clone())
          .with_temperature(defaults.temperature)
    }

    /// Append one turn
    pub fn with_message(mut self, turn: impl Turn + 'static) -> Self
    {   self.messages.push(Box::new(turn));
        self
    }

    /// Append already boxed turns, keeping their order
    pub fn with_messages<I>(mut self, turns: I) -> Self
    where I: IntoIterator<Item = Box<dyn Turn>>
    {   self.messages.extend(turns);
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self
    {   self.metadata = Some(metadata);
        self
    }

    pub fn with_stop_sequence(mut self, sequence: impl Into<String>) -> Self
    {   self.stop_sequences.push(sequence.into());
        self
    }

    pub fn with_stop_sequences<I, S>(mut self, sequences: I) -> Self
    where I: IntoIterator<Item = S>
        , S: Into<String>
    {   self.stop_sequences
          .extend(sequences.into_iter().map(Into::into));
        self
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self
    {   self.system = system.into();
        self
    }

    /// Sent as given; the API validates the range. Must be finite.
    pub fn with_temperature(mut self, temperature: f64) -> Self
    {   self.temperature = temperature;
        self
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self
    {   self.top_k = Some(top_k);
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self
    {   self.top_p = Some(top_p);
        self
    }

    pub fn model(&self) -> crate::Model
    {   self.model
    }

    pub fn turns(&self) -> &[Box<dyn Turn>]
    {   &self.messages
    }

    pub fn max_tokens(&self) -> u32
    {   self.max_tokens
    }

    pub fn metadata(&self) -> Option<&Metadata>
    {   self.metadata.as_ref()
    }

    pub fn stop_sequences(&self) -> &[String]
    {   &self.stop_sequences
    }

    pub fn system(&self) -> &str
    {   &self.system
    }

    pub fn temperature(&self) -> f64
    {   self.temperature
    }

    pub fn top_k(&self) -> Option<u32>
    {   self.top_k
    }

    pub fn top_p(&self) -> Option<f64>
    {   self.top_p
    }

    /// Wire document as bytes
    pub fn encode(&self) -> Result<Vec<u8>, crate::error::Error>
    {   encode(self)
    }

    /// Wire document as a JSON value
    pub fn to_value(&self)
      -> Result<serde_json::Value, crate::error::Error>
    {   serde_json::to_value(self).map_err(|e| {
          error!("Failed to encode request: {}", e);
          crate::error::Error::Encode(e.to_string())
        })
    }
}

impl Serialize for GenerationRequest
{   fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer
    {   // JSON has no NaN or infinity; serde_json would write null
        if !self.temperature.is_finite()
        {   return Err(S::Error::custom(format!(
              "temperature must be finite, got {}",
              self.temperature
            )));
        }
        if let Some(top_p) = self.top_p.filter(|p| !p.is_finite())
        {   return Err(S::Error::custom(format!(
              "top_p must be finite, got {}",
              top_p
            )));
        }

        // model, messages, max_tokens, stop_sequences, stream,
        // system, temperature
        let present = [
            self.metadata.is_some()
          , self.top_k.is_some()
          , self.top_p.is_some()
          ]
          .iter()
          .filter(|p| **p)
          .count();
        let mut state = serializer
          .serialize_struct("GenerationRequest", 7 + present)?;

        let messages: Vec<WireTurn<'_>> = self.messages
          .iter()
          .map(|turn| WireTurn
          {   role: turn.role()
            , content: turn.content()
          })
          .collect();

        state.serialize_field("model", &self.model)?;
        state.serialize_field("messages", &messages)?;
        state.serialize_field("max_tokens", &self.max_tokens)?;
        match &self.metadata
        {   Some(metadata) => {
              state.serialize_field("metadata", metadata)?
            }
          , None => state.skip_field("metadata")?
        }
        state.serialize_field("stop_sequences", &self.stop_sequences)?;
        // Streaming is unsupported; the key stays for compatibility
        state.serialize_field("stream", &false)?;
        state.serialize_field("system", &self.system)?;
        state.serialize_field("temperature", &self.temperature)?;
        match self.top_k
        {   Some(top_k) => state.serialize_field("top_k", &top_k)?
          , None => state.skip_field("top_k")?
        }
        match self.top_p
        {   Some(top_p) => state.serialize_field("top_p", &top_p)?
          , None => state.skip_field("top_p")?
        }
        state.end()
    }
}

/// Encode a request into the JSON body sent to the API.
///
/// Absent optional parameters produce no key at all. The only
/// failure is a value JSON cannot represent (a NaN or infinite
/// `temperature` or `top_p`), which is a caller bug.
pub fn encode(
  request: &GenerationRequest
) -> Result<Vec<u8>, crate::error::Error>
{   debug!(
      "Encoding request for {} with {} turns",
      request.model, request.messages.len()
    );
    let body = serde_json::to_vec(request).map_err(|e| {
      error!("Failed to encode request: {}", e);
      crate::error::Error::Encode(e.to_string())
    })?;
    trace!("Request body: {}", String::from_utf8_lossy(&body));
    Ok(body)
}
