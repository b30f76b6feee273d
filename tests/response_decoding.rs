use anthropic_messages::{
  decode, DecodeError, GenerationRequest, GenerationResult, Message,
  Model, Role, StopReason, Usage
};
use serde_json::json;

const HELLO: &str = r#"{"id":"msg_01DjMHzuj6fP1jb5D2uWcqWz","role":"assistant","model":"claude-3-5-sonnet-20240620","content":[{"type":"text","text":"Hello!"}],"stop_reason":"end_turn","stop_sequence":null,"usage":{"input_tokens":9,"output_tokens":30}}"#;

/// Response document with one text block and the given overrides
fn document(overrides: serde_json::Value) -> Vec<u8>
{   let mut doc: serde_json::Value
      = serde_json::from_str(HELLO).expect("fixture is JSON");
    if let (Some(base), Some(extra))
      = (doc.as_object_mut(), overrides.as_object())
    {   for (key, value) in extra
        {   base.insert(key.clone(), value.clone());
        }
    }
    serde_json::to_vec(&doc).expect("fixture encodes")
}

#[test]
fn test_decode_end_to_end_example()
{   let result = decode(HELLO.as_bytes()).expect("should decode");

    assert_eq!(result.id(), "msg_01DjMHzuj6fP1jb5D2uWcqWz");
    assert_eq!(result.content(), "Hello!");
    assert_eq!(result.role(), Role::Assistant);
    assert_eq!(result.model(), Model::Claude35Sonnet);
    assert_eq!(result.stop_reason(), &StopReason::EndTurn);
    assert_eq!(
      result.usage(),
      Usage { input_tokens: 9, output_tokens: 30 }
    );
}

#[test]
fn test_decode_ignores_extra_keys()
{   let body = document(json!({
      "type": "message",
      "content": [
        { "type": "text", "text": "Hi there", "citations": null }
      ]
    }));
    let result = decode(&body).expect("should decode");
    assert_eq!(result.content(), "Hi there");
}

#[test]
fn test_stop_sequence_carries_match()
{   let body = document(json!({
      "stop_reason": "stop_sequence",
      "stop_sequence": "STOP"
    }));
    let result = decode(&body).expect("should decode");
    assert_eq!(
      result.stop_reason(),
      &StopReason::StopSequence("STOP".to_string())
    );
}

#[test]
fn test_end_turn_ignores_stop_sequence_field()
{   let body = document(json!({
      "stop_reason": "end_turn",
      "stop_sequence": "ignored"
    }));
    let result = decode(&body).expect("should decode");
    assert_eq!(result.stop_reason(), &StopReason::EndTurn);
}

#[test]
fn test_other_stop_reasons()
{   let max = decode(&document(json!({ "stop_reason": "max_tokens" })))
      .expect("should decode");
    assert_eq!(max.stop_reason(), &StopReason::MaxTokens);

    let tool = decode(&document(json!({ "stop_reason": "tool_use" })))
      .expect("should decode");
    assert_eq!(tool.stop_reason(), &StopReason::ToolUse);
}

#[test]
fn test_stop_sequence_tag_without_match_fails()
{   let body = document(json!({
      "stop_reason": "stop_sequence",
      "stop_sequence": null
    }));
    assert_eq!(
      decode(&body),
      Err(DecodeError::MissingField("stop_sequence"))
    );
}

#[test]
fn test_unknown_stop_reason_is_typed()
{   let body = document(json!({ "stop_reason": "pause_turn" }));
    assert_eq!(
      decode(&body),
      Err(DecodeError::UnknownStopReason("pause_turn".to_string()))
    );
}

#[test]
fn test_missing_output_tokens_yields_no_result()
{   let body = document(json!({ "usage": { "input_tokens": 9 } }));
    let outcome = decode(&body);

    match outcome
    {   Err(DecodeError::Json(message)) => {
          assert!(message.contains("output_tokens"), "{}", message);
        }
      , other => panic!("expected a decode failure, got {:?}", other)
    }
}

#[test]
fn test_negative_usage_rejected()
{   let body = document(json!({
      "usage": { "input_tokens": -1, "output_tokens": 3 }
    }));
    assert!(matches!(decode(&body), Err(DecodeError::Json(_))));
}

#[test]
fn test_tool_use_content_is_typed_failure()
{   let body = document(json!({
      "content": [
        { "type": "tool_use", "id": "toolu_01", "name": "lookup", "input": {} }
      ],
      "stop_reason": "tool_use"
    }));
    assert_eq!(
      decode(&body),
      Err(DecodeError::UnsupportedContent("tool_use".to_string()))
    );
}

#[test]
fn test_only_first_block_is_read()
{   let body = document(json!({
      "content": [
        { "type": "text", "text": "first" },
        { "type": "tool_use", "id": "toolu_01", "name": "lookup", "input": {} }
      ]
    }));
    let result = decode(&body).expect("should decode");
    assert_eq!(result.content(), "first");
}

#[test]
fn test_empty_content_rejected()
{   let body = document(json!({ "content": [] }));
    assert_eq!(decode(&body), Err(DecodeError::EmptyContent));
}

#[test]
fn test_text_block_without_text_rejected()
{   let body = document(json!({ "content": [ { "type": "text" } ] }));
    assert_eq!(
      decode(&body),
      Err(DecodeError::MissingField("content[0].text"))
    );
}

#[test]
fn test_unknown_model_rejected()
{   let body = document(json!({ "model": "claude-9-mega" }));
    assert_eq!(
      decode(&body),
      Err(DecodeError::UnknownModel("claude-9-mega".to_string()))
    );
}

#[test]
fn test_unknown_role_rejected()
{   let body = document(json!({ "role": "system" }));
    assert_eq!(
      decode(&body),
      Err(DecodeError::UnknownRole("system".to_string()))
    );
}

#[test]
fn test_missing_id_and_garbage_rejected()
{   let mut doc: serde_json::Value
      = serde_json::from_str(HELLO).expect("fixture is JSON");
    if let Some(object) = doc.as_object_mut()
    {   object.remove("id");
    }
    let body = serde_json::to_vec(&doc).expect("encodes");
    assert!(matches!(decode(&body), Err(DecodeError::Json(_))));

    assert!(matches!(decode(b"not json"), Err(DecodeError::Json(_))));
    assert!(matches!(decode(b""), Err(DecodeError::Json(_))));
}

#[test]
fn test_serde_deserialize_matches_decode()
{   let via_serde: GenerationResult
      = serde_json::from_str(HELLO).expect("should deserialize");
    let via_decode = decode(HELLO.as_bytes()).expect("should decode");
    assert_eq!(via_serde, via_decode);

    let bad = r#"{"id":"x","role":"assistant","model":"claude-3-5-sonnet-20240620","content":[],"stop_reason":"end_turn","usage":{"input_tokens":1,"output_tokens":1}}"#;
    let err = serde_json::from_str::<GenerationResult>(bad)
      .expect_err("empty content should fail");
    assert!(err.to_string().contains("empty"));
}

#[test]
fn test_result_reused_as_assistant_turn()
{   let reply = decode(HELLO.as_bytes()).expect("should decode");
    let request = GenerationRequest::new(Model::Claude35Sonnet, 64)
      .with_message(Message::user("Hello, Claude!"))
      .with_message(reply)
      .with_message(Message::user("What's 1 + 1?"));

    let doc = request.to_value().expect("should encode");
    assert_eq!(
      doc["messages"],
      json!([
        { "role": "user", "content": "Hello, Claude!" },
        { "role": "assistant", "content": "Hello!" },
        { "role": "user", "content": "What's 1 + 1?" }
      ])
    );
}

#[test]
fn test_end_turn_ignores_non_string_stop_sequence()
{   let body = document(json!({
      "stop_reason": "end_turn",
      "stop_sequence": 42
    }));
    let result = decode(&body).expect("should decode");
    assert_eq!(result.stop_reason(), &StopReason::EndTurn);

    let body = document(json!({
      "stop_reason": "max_tokens",
      "stop_sequence": { "unexpected": true }
    }));
    let result = decode(&body).expect("should decode");
    assert_eq!(result.stop_reason(), &StopReason::MaxTokens);
}

#[test]
fn test_stop_sequence_tag_with_non_string_match_fails()
{   let body = document(json!({
      "stop_reason": "stop_sequence",
      "stop_sequence": 42
    }));
    match decode(&body)
    {   Err(DecodeError::Json(message)) => {
          assert!(message.contains("stop_sequence"), "{}", message);
        }
      , other => panic!("expected a decode failure, got {:?}", other)
    }
}

#[test]
fn test_stop_sequence_absent_for_stop_sequence_tag()
{   let mut doc: serde_json::Value
      = serde_json::from_str(HELLO).expect("fixture is JSON");
    if let Some(object) = doc.as_object_mut()
    {   object.remove("stop_sequence");
        object.insert("stop_reason".to_string(), json!("stop_sequence"));
    }
    let body = serde_json::to_vec(&doc).expect("encodes");
    assert_eq!(
      decode(&body),
      Err(DecodeError::MissingField("stop_sequence"))
    );
}
