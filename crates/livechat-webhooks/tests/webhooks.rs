//! Webhook endpoint behaviour through the axum router

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum::Router;
use livechat_webhooks::{webhook_router, Action, Configuration, HandlerError, Payload};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

const SECRET: &str = "laudla991lamda0pnoaa0";

fn fixture(name: &str) -> String {
    let path = format!(
        "{}/tests/testdata/{}.json",
        env!("CARGO_MANIFEST_DIR"),
        name
    );
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {path}: {e}"))
}

type Received = Arc<Mutex<Vec<(i64, Payload)>>>;

fn recording_config(action: Action, secret: Option<&str>) -> (Configuration, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let sink = received.clone();
    let config = Configuration::new().with_action(
        action,
        move |license_id: i64, payload: Payload| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push((license_id, payload));
                Ok::<(), HandlerError>(())
            }
        },
        secret.map(str::to_string),
    );
    (config, received)
}

async fn post(router: Router, body: impl Into<Body>) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri("/webhooks")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_follow_up_requested_dispatch() {
    let (config, received) = recording_config(Action::FollowUpRequested, Some(SECRET));
    let router = webhook_router("/webhooks", config);

    let (status, body) = post(router, fixture("follow_up_requested")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);

    let (license_id, payload) = &received[0];
    assert_eq!(*license_id, 12345);
    match payload {
        Payload::FollowUpRequested(follow_up) => {
            assert_eq!(follow_up.chat_id, "XXXX");
            assert_eq!(follow_up.thread_id, "YYYY");
            assert_eq!(follow_up.customer_id, "AAA-BBB-CCC");
        }
        other => panic!("unexpected payload: {other:?}"),
    }
}

#[tokio::test]
async fn test_secret_mismatch_is_rejected() {
    let (config, received) = recording_config(Action::FollowUpRequested, Some("other-secret"));
    let router = webhook_router("/webhooks", config);

    let (status, body) = post(router, fixture("follow_up_requested")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("follow_up_requested"));
    assert!(received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unregistered_action_is_rejected() {
    let (config, received) = recording_config(Action::IncomingEvent, None);
    let router = webhook_router("/webhooks", config);

    let (status, _) = post(router, fixture("follow_up_requested")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_action_is_rejected() {
    let (config, _) = recording_config(Action::FollowUpRequested, None);
    let router = webhook_router("/webhooks", config);

    let body = fixture("follow_up_requested").replace("follow_up_requested", "incoming_greeting");
    let (status, _) = post(router, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let (config, received) = recording_config(Action::FollowUpRequested, None);
    let router = webhook_router("/webhooks", config);

    let (status, _) = post(router, "{\"action\": ").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_payload_mismatch_is_internal_error() {
    let (config, received) = recording_config(Action::FollowUpRequested, None);
    let router = webhook_router("/webhooks", config);

    let body = fixture("follow_up_requested").replace("\"customer_id\"", "\"customer\"");
    let (status, _) = post(router, body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_handler_failure() {
    let config = Configuration::new().with_action(
        Action::FollowUpRequested,
        |_: i64, _: Payload| async { Err::<(), HandlerError>("storage unavailable".into()) },
        None,
    );
    let router = webhook_router("/webhooks", config);

    let (status, body) = post(router, fixture("follow_up_requested")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("storage unavailable"));
}

#[tokio::test]
async fn test_error_hook_can_acknowledge() {
    let seen: Arc<Mutex<Option<(String, StatusCode)>>> = Arc::new(Mutex::new(None));
    let hook_seen = seen.clone();

    let config = Configuration::new()
        .with_action(
            Action::FollowUpRequested,
            |_: i64, _: Payload| async { Err::<(), HandlerError>("do not retry".into()) },
            None,
        )
        .with_error_handler(move |message: &str, status: StatusCode| {
            *hook_seen.lock().unwrap() = Some((message.to_string(), status));
            StatusCode::OK.into_response()
        });
    let router = webhook_router("/webhooks", config);

    let (status, _) = post(router, fixture("follow_up_requested")).await;

    assert_eq!(status, StatusCode::OK);
    let (message, original) = seen.lock().unwrap().clone().unwrap();
    assert_eq!(original, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(message.contains("do not retry"));
}

#[tokio::test]
async fn test_incoming_chat_thread_has_one_thread() {
    let (config, received) = recording_config(Action::IncomingChatThread, Some(SECRET));
    let router = webhook_router("/webhooks", config);

    let (status, _) = post(router, fixture("incoming_chat_thread")).await;
    assert_eq!(status, StatusCode::OK);

    let received = received.lock().unwrap();
    let Payload::IncomingChatThread(incoming) = &received[0].1 else {
        panic!("unexpected payload");
    };
    let chat = &incoming.chat;

    assert_eq!(chat.id, "PS0X0L086G");
    assert_eq!(chat.threads.len(), 1);
    assert_eq!(chat.agents.len(), 1);
    assert_eq!(chat.customers.len(), 1);

    let thread = &chat.threads[0];
    assert_eq!(thread.id, "PZ070E0W1B");
    assert_eq!(thread.events.len(), 2);

    let form = thread.events[0].as_filled_form().unwrap();
    assert_eq!(form.form_id, "prechat");
    assert_eq!(form.fields.len(), 2);
    assert!(thread.events[0].as_message().is_none());
    assert_eq!(
        thread.events[1].as_message().unwrap().text,
        "Hello, I need help with my order"
    );

    let customer = &chat.customers["b7eff798-f8df-4364-8059-649c35c9ed0c"];
    assert_eq!(customer.statistics.unwrap_or_default().visits_count, 5);
    assert_eq!(
        chat.agents["smith@example.com"].routing_status.as_deref(),
        Some("accepting_chats")
    );
}

#[tokio::test]
async fn test_incoming_event_decodes_idempotently() {
    let (config, received) = recording_config(Action::IncomingEvent, None);
    let router = webhook_router("/webhooks", config);

    let body = fixture("incoming_event");
    let (first, _) = post(router.clone(), body.clone()).await;
    let (second, _) = post(router, body).await;
    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 2);
    assert_eq!(received[0], received[1]);

    let Payload::IncomingEvent(incoming) = &received[0].1 else {
        panic!("unexpected payload");
    };
    let system = incoming.event.as_system_message().unwrap();
    assert_eq!(system.system_message_type, "routing.assigned");
    assert_eq!(system.text_vars["agent"], "Agent Smith");
}
