use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use roomkey_server::{app, AppState};
use roomkey_token::{LiveKitConfig, TokenService, ROOM_NAME_PREFIX};
use serde_json::Value;
use tower::ServiceExt;

const URL: &str = "wss://voice.example.com";
const KEY: &str = "devkey";
const SECRET: &str = "devsecret";
const PHONE_NUMBER: &str = "+15550100";

fn full_config() -> LiveKitConfig {
    LiveKitConfig::new(URL, KEY, SECRET).with_phone_number(PHONE_NUMBER)
}

fn setup_app(config: LiveKitConfig) -> Router {
    app(AppState::new(TokenService::new(config)))
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

fn token_claims(token: &str) -> Value {
    let validation = Validation::new(Algorithm::HS256);
    let key = DecodingKey::from_secret(SECRET.as_bytes());
    decode::<Value>(token, &key, &validation)
        .expect("token should verify with the configured secret")
        .claims
}

fn token_metadata(details: &Value) -> Value {
    let token = details["participantToken"].as_str().unwrap();
    let claims = token_claims(token);
    serde_json::from_str(claims["metadata"].as_str().unwrap()).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let response = get(setup_app(full_config()), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_connection_details_without_query() {
    let response = get(setup_app(full_config()), "/api/connection-details").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");

    let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json["serverUrl"], URL);
    assert_eq!(json["participantName"], PHONE_NUMBER);

    let room_name = json["roomName"].as_str().unwrap();
    let suffix: u32 = room_name
        .strip_prefix(ROOM_NAME_PREFIX)
        .unwrap()
        .parse()
        .unwrap();
    assert!(suffix < 10_000);

    let claims = token_claims(json["participantToken"].as_str().unwrap());
    assert_eq!(claims["video"]["room"], room_name);
    assert_eq!(claims["video"]["roomJoin"], true);
    assert_eq!(claims["video"]["canPublish"], true);
    assert_eq!(claims["video"]["canPublishData"], true);
    assert_eq!(claims["video"]["canSubscribe"], true);
    assert_eq!(claims["sub"], PHONE_NUMBER);

    assert_eq!(token_metadata(&json), serde_json::json!({}));
}

#[tokio::test]
async fn test_agent_name_in_metadata() {
    let response = get(
        setup_app(full_config()),
        "/api/connection-details?agentName=foo",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(token_metadata(&json), serde_json::json!({ "agentName": "foo" }));
}

#[tokio::test]
async fn test_agent_name_and_event_id_in_metadata() {
    let response = get(
        setup_app(full_config()),
        "/api/connection-details?agentName=foo&unifiedEventId=bar",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(
        token_metadata(&json),
        serde_json::json!({ "agentName": "foo", "unified_event_id": "bar" })
    );

    // The dispatch configuration ignores the requested agent.
    let claims = token_claims(json["participantToken"].as_str().unwrap());
    assert_eq!(claims["roomConfig"]["agents"][0]["agentName"], "livekit");
}

#[tokio::test]
async fn test_missing_url_returns_500() {
    let mut config = full_config();
    config.url = None;

    let response = get(setup_app(config), "/api/connection-details").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));

    let body = body_bytes(response).await;
    assert_eq!(String::from_utf8(body).unwrap(), "LIVEKIT_URL is not defined");
}

#[tokio::test]
async fn test_missing_credentials_report_first_missing() {
    let cases = [
        (LiveKitConfig::default(), "LIVEKIT_URL is not defined"),
        (
            LiveKitConfig {
                api_key: None,
                ..full_config()
            },
            "LIVEKIT_API_KEY is not defined",
        ),
        (
            LiveKitConfig {
                api_key: None,
                api_secret: None,
                ..full_config()
            },
            "LIVEKIT_API_KEY is not defined",
        ),
        (
            LiveKitConfig {
                api_secret: Some(String::new()),
                ..full_config()
            },
            "LIVEKIT_API_SECRET is not defined",
        ),
        (
            LiveKitConfig {
                phone_number: None,
                ..full_config()
            },
            "PHONE_NUMBER is not defined",
        ),
    ];

    for (config, expected) in cases {
        let response = get(setup_app(config), "/api/connection-details").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = String::from_utf8(body_bytes(response).await).unwrap();
        assert_eq!(body, expected);
    }
}

#[tokio::test]
async fn test_consecutive_requests_get_fresh_rooms() {
    let app = setup_app(LiveKitConfig {
        room_names: roomkey_token::RoomNameStyle::Uuid,
        ..full_config()
    });

    let first: Value = serde_json::from_slice(
        &body_bytes(get(app.clone(), "/api/connection-details").await).await,
    )
    .unwrap();
    let second: Value = serde_json::from_slice(
        &body_bytes(get(app, "/api/connection-details").await).await,
    )
    .unwrap();

    assert_ne!(first["roomName"], second["roomName"]);
    assert_ne!(first["participantToken"], second["participantToken"]);
}

#[tokio::test]
async fn test_repeated_query_parameter_uses_first_value() {
    let response = get(
        setup_app(full_config()),
        "/api/connection-details?agentName=a&agentName=b",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");

    let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(token_metadata(&json), serde_json::json!({ "agentName": "a" }));
}
