use mmo_bot_core::agentic::tools::get_global_registry;
use mmo_bot_core::{
    BotConfig, BotError, ConversationState, FunctionCallDirective, GenerationParams, ModelGateway,
    ModelReply, OpenAiGateway, ReasoningEffort,
};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

struct CapturedRequest {
    head: String,
    body: Value,
}

/// Serves exactly one HTTP response and hands back what the client sent.
async fn serve_once(status_line: &'static str, body: String) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind local test server");
    let addr = listener.local_addr().expect("local addr");

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept connection");
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];

        let (head, body_start, content_length) = loop {
            let n = socket.read(&mut buf).await.expect("read request");
            assert!(n > 0, "client closed before sending headers");
            raw.extend_from_slice(&buf[..n]);
            if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&raw[..pos]).to_string();
                let content_length = head
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                break (head, pos + 4, content_length);
            }
        };

        while raw.len() < body_start + content_length {
            let n = socket.read(&mut buf).await.expect("read body");
            assert!(n > 0, "client closed before sending body");
            raw.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket
            .write_all(response.as_bytes())
            .await
            .expect("write response");

        CapturedRequest {
            head,
            body: serde_json::from_slice(&raw[body_start..body_start + content_length])
                .expect("request body is json"),
        }
    });

    (format!("http://{}/v1", addr), server)
}

fn config_for(base_url: String) -> BotConfig {
    BotConfig {
        api_key: "sk-local-test".to_string(),
        base_url,
        reasoning: ReasoningEffort::Low,
        ..BotConfig::default()
    }
}

fn session() -> ConversationState {
    let mut state = ConversationState::new(BotConfig::default().system_prompt);
    state.push_next_action_request();
    state
}

#[tokio::test]
async fn function_call_reply_is_parsed_and_request_is_complete() {
    let reply = json!({
        "id": "chatcmpl_local",
        "object": "chat.completion",
        "model": "o3-mini",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": null,
                "function_call": {"name": "explore_area", "arguments": "{}"}
            },
            "finish_reason": "function_call"
        }],
        "usage": {"prompt_tokens": 120, "completion_tokens": 12, "total_tokens": 132}
    });
    let (base_url, server) = serve_once("HTTP/1.1 200 OK", reply.to_string()).await;
    let config = config_for(base_url);
    let gateway = OpenAiGateway::new(&config).expect("gateway");
    let specs = get_global_registry().all_specs();

    let result = gateway
        .converse(&session(), &specs, &GenerationParams::from(&config))
        .await
        .expect("converse succeeds");

    assert_eq!(
        result,
        ModelReply::FunctionCall(FunctionCallDirective {
            name: "explore_area".to_string(),
            raw_arguments: "{}".to_string(),
        })
    );

    let captured = server.await.expect("server task completes");
    assert!(captured.head.starts_with("POST /v1/chat/completions"));
    assert!(captured
        .head
        .to_lowercase()
        .contains("authorization: bearer sk-local-test"));
    assert_eq!(captured.body["model"], "o3-mini");
    assert_eq!(captured.body["function_call"], "auto");
    assert_eq!(captured.body["reasoning_effort"], "low");
    assert_eq!(captured.body["max_completion_tokens"], 100);
    assert_eq!(captured.body["messages"].as_array().unwrap().len(), 2);
    assert_eq!(captured.body["messages"][1]["content"], "What should I do next?");
    let function_names: Vec<&str> = captured.body["functions"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|f| f["name"].as_str())
        .collect();
    assert_eq!(
        function_names,
        vec!["scan_for_enemies", "attack_enemy", "explore_area"]
    );
}

#[tokio::test]
async fn text_reply_is_returned_as_text() {
    let reply = json!({
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "Let me look around first."},
            "finish_reason": "stop"
        }]
    });
    let (base_url, server) = serve_once("HTTP/1.1 200 OK", reply.to_string()).await;
    let config = config_for(base_url);
    let gateway = OpenAiGateway::new(&config).expect("gateway");

    let result = gateway
        .converse(&session(), &get_global_registry().all_specs(), &GenerationParams::from(&config))
        .await
        .expect("converse succeeds");

    assert_eq!(result, ModelReply::Text("Let me look around first.".to_string()));
    server.await.expect("server task completes");
}

#[tokio::test]
async fn auth_failure_surfaces_service_message_as_gateway_error() {
    let body = json!({
        "error": {
            "message": "Incorrect API key provided: YOUR_API_KEY_HERE",
            "type": "invalid_request_error"
        }
    });
    let (base_url, server) = serve_once("HTTP/1.1 401 Unauthorized", body.to_string()).await;
    let config = config_for(base_url);
    let gateway = OpenAiGateway::new(&config).expect("gateway");

    let err = gateway
        .converse(&session(), &get_global_registry().all_specs(), &GenerationParams::from(&config))
        .await
        .expect_err("401 must fail");

    match err {
        BotError::Gateway(message) => {
            assert!(message.contains("401"));
            assert!(message.contains("Incorrect API key provided"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    server.await.expect("server task completes");
}

#[tokio::test]
async fn malformed_body_is_a_gateway_error() {
    let (base_url, server) = serve_once("HTTP/1.1 200 OK", "not json".to_string()).await;
    let config = config_for(base_url);
    let gateway = OpenAiGateway::new(&config).expect("gateway");

    let err = gateway
        .converse(&session(), &get_global_registry().all_specs(), &GenerationParams::from(&config))
        .await
        .expect_err("malformed body must fail");

    assert!(matches!(err, BotError::Gateway(_)));
    server.await.expect("server task completes");
}

#[tokio::test]
async fn unreachable_service_is_a_gateway_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let config = config_for(format!("http://{}/v1", addr));
    let gateway = OpenAiGateway::new(&config).expect("gateway");

    let err = gateway
        .converse(&session(), &get_global_registry().all_specs(), &GenerationParams::from(&config))
        .await
        .expect_err("connection must fail");

    assert!(matches!(err, BotError::Gateway(_)), "unexpected error: {}", err);
}
