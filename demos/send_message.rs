//! Two-turn conversation against the live API.
//!
//!   ANTHROPIC_API_KEY=... RUST_LOG=debug cargo run --example send_message

use anthropic_messages::{Client, ClientConfig, Message, Turn};
use log::{error, info};

#[tokio::main]
async fn main()
{   env_logger::init();

    let api_key = match std::env::var("ANTHROPIC_API_KEY")
    {   Ok(key) => key
      , Err(_) => {
          error!("ANTHROPIC_API_KEY not set");
          std::process::exit(1);
        }
    };

    let client = Client::new(api_key, ClientConfig::default());

    let first = client
      .request()
      .with_message(Message::user("Hello, Claude!"));
    let reply = match client.send(&first).await
    {   Ok(reply) => reply
      , Err(e) => {
          error!("First turn failed ({:?}): {}", e.stage(), e);
          std::process::exit(1);
        }
    };
    println!("{}", reply.content());

    // The reply goes back in as the assistant's turn
    let follow_up = client
      .request()
      .with_message(Message::user("Hello, Claude!"))
      .with_message(reply)
      .with_message(Message::user("What's 1 + 1?"));
    match client.send(&follow_up).await
    {   Ok(answer) => {
          info!("Stopped with {:?}", answer.stop_reason());
          println!("{}", Turn::content(&answer));
        }
      , Err(e) => {
          error!("Second turn failed ({:?}): {}", e.stage(), e);
          std::process::exit(1);
        }
    }
}
