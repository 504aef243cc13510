//! End-to-end tests of the webhook router with in-memory services.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use catalog::{CatalogQuery, CatalogResult, MovieRecord};
use clients::{
    ClassifiedMessage, ClientError, Entity, Intent, IntentClassifier, MovieCatalog,
    SentimentScorer, entity_types,
};
use dialog::{MoviePresenter, Services};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use server::{BotOrchestrator, build_router};
use tower::ServiceExt;

struct MovieOnlyClassifier;

#[async_trait]
impl IntentClassifier for MovieOnlyClassifier {
    async fn classify(&self, utterance: &str) -> clients::Result<ClassifiedMessage> {
        let intent = if utterance.contains("movie") {
            Intent::Movie
        } else if utterance == "hi" {
            Intent::Hello
        } else {
            Intent::None
        };
        let entities = if utterance.contains("popular") {
            vec![Entity::new(entity_types::SORT_POPULARITY, "popular")]
        } else {
            vec![]
        };
        Ok(ClassifiedMessage::new(utterance, intent, entities))
    }
}

struct FixedCatalog {
    fail: bool,
}

#[async_trait]
impl MovieCatalog for FixedCatalog {
    async fn discover(&self, _query: &CatalogQuery) -> clients::Result<CatalogResult> {
        if self.fail {
            return Err(ClientError::Status {
                service: "tmdb",
                status: 500,
                body: "down".to_string(),
            });
        }
        Ok(CatalogResult {
            results: (0..20)
                .map(|i| MovieRecord {
                    id: 500 + i,
                    title: format!("Film {}", i),
                    overview: "Plot".to_string(),
                    poster_path: Some(format!("/p{}.jpg", i)),
                })
                .collect(),
        })
    }
}

struct NeutralSentiment;

#[async_trait]
impl SentimentScorer for NeutralSentiment {
    async fn score(&self, _text: &str) -> clients::Result<f64> {
        Ok(0.5)
    }
}

fn app(catalog_fails: bool) -> axum::Router {
    let services = Services::new(
        Arc::new(MovieOnlyClassifier),
        Arc::new(FixedCatalog { fail: catalog_fails }),
        Arc::new(NeutralSentiment),
    )
    .with_presenter(MoviePresenter::with_seed(11));
    build_router(Arc::new(BotOrchestrator::new(services)))
}

fn activity(conversation: &str, text: &str) -> Value {
    json!({
        "type": "message",
        "id": format!("{}-{}", conversation, text.len()),
        "channelId": "test",
        "from": {"id": "user"},
        "recipient": {"id": "bot"},
        "conversation": {"id": conversation},
        "text": text
    })
}

async fn post(app: &axum::Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/messages")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn texts(body: &Value) -> Vec<String> {
    body["activities"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|a| a["text"].as_str().map(str::to_string))
        .collect()
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app(false).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn test_movie_dialog_over_webhook() {
    let app = app(false);

    let (status, body) = post(&app, activity("conv-1", "15 popular movie")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(texts(&body), vec!["Enter a release year ( YYYY )"]);

    let (status, body) = post(&app, activity("conv-1", "around 1999")).await;
    assert_eq!(status, StatusCode::OK);

    let activities = body["activities"].as_array().unwrap();
    assert_eq!(activities[0]["type"], "typing");

    let carousel = activities.last().unwrap();
    assert_eq!(carousel["attachmentLayout"], "carousel");
    assert_eq!(carousel["recipient"]["id"], "user");
    let card = &carousel["attachments"][0];
    assert_eq!(card["contentType"], "application/vnd.microsoft.card.hero");
    assert_eq!(card["content"]["buttons"][0]["type"], "openUrl");
    assert!(
        card["content"]["buttons"][0]["value"]
            .as_str()
            .unwrap()
            .starts_with("https://www.themoviedb.org/movie/")
    );
}

#[tokio::test]
async fn test_catalog_failure_apologizes() {
    let app = app(true);

    post(&app, activity("c", "movie")).await;
    let (status, body) = post(&app, activity("c", "2010")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        texts(&body),
        vec!["Oops, an error, can you please say 'movie' again?"]
    );
}

#[tokio::test]
async fn test_unrecognized_text_gets_fallback() {
    let (_, body) = post(&app(false), activity("c", "asdf")).await;
    assert_eq!(texts(&body), vec!["Sorry I didn't understand, I'm a bot"]);
}

#[tokio::test]
async fn test_expect_replies_activity_is_answered_in_body() {
    let mut message = activity("c", "hi");
    message["deliveryMode"] = json!("expectReplies");

    let (status, body) = post(&app(false), message).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(texts(&body), vec!["Hi! I'm MovieBot. What's your name?"]);
}

#[tokio::test]
async fn test_conversation_update_gets_no_replies() {
    let mut update = activity("c", "");
    update["type"] = json!("conversationUpdate");

    let (status, body) = post(&app(false), update).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["activities"], json!([]));
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let (status, _) = post(&app(false), json!({"type": "message"})).await;
    assert!(status.is_client_error());
}
