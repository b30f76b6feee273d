//! Conversation turns
//!
//! Anything that can sit in a request's message list implements
//! [`Turn`]. [`Message`] is the plain implementation; a decoded
//! [`GenerationResult`](crate::GenerationResult) is another, so a
//! reply can be fed straight back into the next request:
//!
//! ```
//! use anthropic_messages::{GenerationRequest, Message, Model};
//!
//! let request = GenerationRequest::new(Model::Claude35Sonnet, 64)
//!   .with_message(Message::user("Hello, Claude!"));
//! assert_eq!(request.turns().len(), 1);
//! ```

use crate::Role;

/// A single turn in a conversation.
pub trait Turn: std::fmt::Debug + Send + Sync
{   /// Text of the turn
    fn content(&self) -> &str;

    /// Who sent the turn
    fn role(&self) -> Role;
}

/// A minimal turn authored by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message
{   content: String
  , role: Role
}

impl Message
{   pub fn new(content: impl Into<String>, role: Role) -> Self
    {   Message
        {   content: content.into()
          , role
        }
    }

    pub fn user(content: impl Into<String>) -> Self
    {   Message::new(content, Role::User)
    }

    /// Prefill: the reply continues from this text.
    pub fn assistant(content: impl Into<String>) -> Self
    {   Message::new(content, Role::Assistant)
    }
}

impl Turn for Message
{   fn content(&self) -> &str
    {   &self.content
    }

    fn role(&self) -> Role
    {   self.role
    }
}
