//! Request dispatch against a mock LiveChat API

use livechat_api::objects::{Event, EventType, InitialChat, Message};
use livechat_api::{ApiBuilder, ApiError, ApiFamily, ChatsFilters, Page, Token};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn builder(server: &MockServer) -> ApiBuilder {
    ApiBuilder::new()
        .base_url(server.uri())
        .client_id("client-1")
        .token_source(|| Some(Token::bearer("secret-token", "dal").with_license_id(42)))
}

#[tokio::test]
async fn test_missing_token_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let agent = ApiBuilder::new()
        .base_url(server.uri())
        .token_source(|| -> Option<Token> { None })
        .build_agent()
        .unwrap();

    let err = agent
        .list_chats(&ChatsFilters::new(), &Page::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::NoToken));
    assert_eq!(err.to_string(), "couldn't get token");
}

#[tokio::test]
async fn test_request_headers_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3.2/agent/action/send_event"))
        .and(header("Authorization", "Bearer secret-token"))
        .and(header("User-Agent", "Rust SDK Application client-1"))
        .and(header("X-Region", "dal"))
        .and(header("Content-Type", "application/json"))
        .and(header("X-Debug", "1"))
        .and(body_partial_json(json!({
            "chat_id": "PJ0MRSHTDG",
            "event": {"type": "message", "text": "Hello", "recipients": "all"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"event_id": "K600PKZON8_1"})))
        .expect(1)
        .mount(&server)
        .await;

    let agent = builder(&server)
        .header("X-Debug", "1")
        .build_agent()
        .unwrap();
    let event_id = agent
        .send_event("PJ0MRSHTDG", &Message::new("Hello").into(), None)
        .await
        .unwrap();

    assert_eq!(event_id, "K600PKZON8_1");
}

#[tokio::test]
async fn test_structured_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3.2/agent/action/deactivate_chat"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"type": "Validation", "message": "Wrong format of request"}
        })))
        .mount(&server)
        .await;

    let agent = builder(&server).build_agent().unwrap();
    let err = agent.deactivate_chat("PJ0MRSHTDG").await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "API error: Validation - Wrong format of request"
    );
    assert_eq!(err.api_error_type(), Some("Validation"));
}

#[tokio::test]
async fn test_unparsable_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let agent = builder(&server).build_agent().unwrap();
    let err = agent.follow_chat("PJ0MRSHTDG").await.unwrap_err();

    match err {
        ApiError::UnparsableError { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, "Bad Gateway");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_chat_splits_users() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3.2/agent/action/get_chat"))
        .and(body_partial_json(json!({"chat_id": "PJ0MRSHTDG"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "PJ0MRSHTDG",
            "users": [
                {"id": "b7eff798", "type": "customer", "name": "Thomas Anderson"},
                {"id": "smith@example.com", "type": "agent", "name": "Agent Smith"}
            ],
            "thread": {"id": "K600PKZON8", "active": true}
        })))
        .mount(&server)
        .await;

    let agent = builder(&server).build_agent().unwrap();
    let chat = agent.get_chat("PJ0MRSHTDG", None).await.unwrap();

    assert_eq!(chat.agents.len(), 1);
    assert_eq!(chat.customers.len(), 1);
    assert_eq!(chat.user("b7eff798").unwrap().name, "Thomas Anderson");
    assert_eq!(chat.threads.len(), 1);
    assert_eq!(chat.threads[0].id, "K600PKZON8");
}

#[tokio::test]
async fn test_customer_api_appends_license_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3.2/customer/action/get_customer"))
        .and(query_param("license_id", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "b7eff798",
            "type": "customer",
            "name": "Thomas Anderson",
            "statistics": {"chats_count": 3}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let customer = builder(&server).build_customer().unwrap();
    let me = customer.get_customer().await.unwrap();

    assert_eq!(me.id(), "b7eff798");
    assert_eq!(me.statistics.unwrap_or_default().chats_count, 3);
}

#[tokio::test]
async fn test_customer_api_rejects_basic_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let customer = ApiBuilder::new()
        .base_url(server.uri())
        .token_source(|| Some(Token::basic("bG9naW46cGFzcw==", "dal").with_license_id(42)))
        .build_customer()
        .unwrap();

    let err = customer.deactivate_chat("PJ0MRSHTDG").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidToken(_)));
}

#[tokio::test]
async fn test_unsendable_event_is_rejected_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"event_id": "x"})))
        .expect(0)
        .mount(&server)
        .await;

    let agent = builder(&server).build_agent().unwrap();
    let event = Event::new(EventType::Other("annotation".to_string()));
    let err = agent
        .send_event("PJ0MRSHTDG", &event, None)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
    assert!(err.is_local());
}

#[tokio::test]
async fn test_resume_requires_chat_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"thread_id": "t"})))
        .expect(0)
        .mount(&server)
        .await;

    let agent = builder(&server).build_agent().unwrap();
    let err = agent
        .resume_chat(&InitialChat::default(), false, None)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn test_upload_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3.2/agent/action/upload_file"))
        .and(header("Authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://cdn.livechat-static.com/api/file/lc/att/8948324/45a3581b59a7295145c3825c86ec7ab3/image.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let agent = builder(&server).build_agent().unwrap();
    let url = agent
        .upload_file("image.png", b"\x89PNG".to_vec())
        .await
        .unwrap();

    assert!(url.ends_with("/image.png"));
}

#[tokio::test]
async fn test_configuration_upload_fails_fast() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"url": "x"})))
        .expect(0)
        .mount(&server)
        .await;

    let api = builder(&server).build(ApiFamily::Configuration).unwrap();
    let err = api
        .upload_file("image.png", vec![1, 2, 3])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::UnsupportedFileUpload(ApiFamily::Configuration)
    ));
}

#[tokio::test]
async fn test_configuration_list_groups() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3.2/configuration/action/list_groups"))
        .and(body_partial_json(json!({"fields": ["agent_priorities"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 0,
                "name": "General",
                "language_code": "en",
                "agent_priorities": {"smith@example.com": "first"}
            },
            {"id": 1, "name": "Sales", "language_code": "en"}
        ])))
        .mount(&server)
        .await;

    let configuration = builder(&server).build_configuration().unwrap();
    let groups = configuration
        .list_groups(&["agent_priorities"])
        .await
        .unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].name, "General");
    assert_eq!(groups[0].agent_priorities.len(), 1);
}
