//! Generation results and their wire decoding

use log::{debug, error, trace};
use serde::{Deserialize, Deserializer};

use crate::error::DecodeError;

/// Why the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason
{   /// Natural stopping point
    EndTurn
  , /// Hit the requested `max_tokens` or the model maximum
    MaxTokens
  , /// One of the request's stop sequences, carrying the match
    StopSequence(String)
  , /// The model invoked one or more tools
    ToolUse
}

impl StopReason
{   /// Build from the `stop_reason` tag and the sibling
    /// `stop_sequence` field; the latter is only read for the
    /// `stop_sequence` tag.
    pub fn from_wire(
      tag: &str
    , stop_sequence: Option<serde_json::Value>
    ) -> Result<Self, DecodeError>
    {   match tag
        {   "end_turn" => Ok(StopReason::EndTurn)
          , "max_tokens" => Ok(StopReason::MaxTokens)
          , "stop_sequence" => match stop_sequence
            {   Some(serde_json::Value::String(matched)) => {
                  Ok(StopReason::StopSequence(matched))
                }
              , None | Some(serde_json::Value::Null) => {
                  Err(DecodeError::MissingField("stop_sequence"))
                }
              , Some(other) => Err(DecodeError::Json(format!(
                  "invalid type for `stop_sequence`: {}",
                  other
                )))
            }
          , "tool_use" => Ok(StopReason::ToolUse)
          , other => Err(
              DecodeError::UnknownStopReason(other.to_string())
            )
        }
    }

    pub fn tag(&self) -> &'static str
    {   match self
        {   StopReason::EndTurn => "end_turn"
          , StopReason::MaxTokens => "max_tokens"
          , StopReason::StopSequence(_) => "stop_sequence"
          , StopReason::ToolUse => "tool_use"
        }
    }
}

/// Token accounting for one request/response pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Usage
{   pub input_tokens: u64
  , pub output_tokens: u64
}

/// A reply generated by the model.
///
/// Only built by decoding a complete response document, and never
/// changed afterwards. It is also a [`Turn`](crate::Turn), so it
/// can be appended to the next request as the assistant's side of
/// the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult
{   id: String
  , content: String
  , role: crate::Role
  , model: crate::Model
  , stop_reason: StopReason
  , usage: Usage
}

impl GenerationResult
{   pub fn id(&self) -> &str
    {   &self.id
    }

    pub fn content(&self) -> &str
    {   &self.content
    }

    pub fn role(&self) -> crate::Role
    {   self.role
    }

    pub fn model(&self) -> crate::Model
    {   self.model
    }

    pub fn stop_reason(&self) -> &StopReason
    {   &self.stop_reason
    }

    pub fn usage(&self) -> Usage
    {   self.usage
    }
}

impl crate::message::Turn for GenerationResult
{   fn content(&self) -> &str
    {   &self.content
    }

    fn role(&self) -> crate::Role
    {   self.role
    }
}

// ===== Wire Types =====

#[derive(Debug, Deserialize)]
struct WireResponse
{   id: String
  , role: String
  , model: String
  , content: Vec<WireContentBlock>
  , stop_reason: String
  , /// Left raw; only the `stop_sequence` tag looks at it
    #[serde(default)]
    stop_sequence: Option<serde_json::Value>
  , usage: Usage
}

/// Only `text` blocks are understood; other kinds keep their
/// extra keys, which are ignored.
#[derive(Debug, Deserialize)]
struct WireContentBlock
{   #[serde(rename = "type")]
    kind: String
  , #[serde(default)]
    text: Option<String>
}

impl GenerationResult
{   fn from_wire(wire: WireResponse) -> Result<Self, DecodeError>
    {   let role: crate::Role = wire.role.parse()?;

        let block = wire.content
          .into_iter()
          .next()
          .ok_or(DecodeError::EmptyContent)?;
        if block.kind != "text"
        {   return Err(DecodeError::UnsupportedContent(block.kind));
        }
        let content = block.text
          .ok_or(DecodeError::MissingField("content[0].text"))?;

        let model: crate::Model = wire.model.parse()?;
        let stop_reason = StopReason::from_wire(
          &wire.stop_reason,
          wire.stop_sequence
        )?;

        Ok(GenerationResult
        {   id: wire.id
          , content
          , role
          , model
          , stop_reason
          , usage: wire.usage
        })
    }
}

impl<'de> Deserialize<'de> for GenerationResult
{   fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de>
    {   let wire = WireResponse::deserialize(deserializer)?;
        GenerationResult::from_wire(wire)
          .map_err(serde::de::Error::custom)
    }
}

/// Error body returned with non-success statuses
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody
{   pub(crate) error: ApiErrorDetail
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorDetail
{   #[serde(rename = "type")]
    pub(crate) kind: String
  , pub(crate) message: String
}

/// Decode a response body into a [`GenerationResult`].
///
/// All or nothing: any missing key, wrong type, unknown tag or
/// non-text first content block yields a [`DecodeError`] and no
/// result. Never panics on untrusted input.
pub fn decode(body: &[u8]) -> Result<GenerationResult, DecodeError>
{   trace!("Response body: {}", String::from_utf8_lossy(body));
    let wire: WireResponse = serde_json::from_slice(body)
      .map_err(|e| {
        error!("Malformed response: {}", e);
        DecodeError::from(e)
      })?;
    debug!("Decoding response {}", wire.id);
    GenerationResult::from_wire(wire).map_err(|e| {
      error!("Rejected response: {}", e);
      e
    })
}

/// Decode a non-success body, keeping the raw text when it is not
/// the documented error shape.
pub(crate) fn decode_api_error(body: &[u8]) -> (String, String)
{   match serde_json::from_slice::<ApiErrorBody>(body)
    {   Ok(parsed) => (parsed.error.kind, parsed.error.message)
      , Err(e) => {
          debug!("Unrecognized error body: {}", e);
          ( "unknown".to_string()
          , String::from_utf8_lossy(body).into_owned()
          )
        }
    }
}
