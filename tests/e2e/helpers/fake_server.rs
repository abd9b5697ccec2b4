use axum::{
    extract::{Form, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use freshrss_to_karakeep::infrastructure::clients::freshrss::fever_api_key;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

use super::{KARAKEEP_KEY, PASSWORD, USERNAME};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    FeverPing,
    FeverRejected,
    SavedItemIds,
    Items(Vec<String>),
    Mark { as_: String, id: String },
    CreateBookmark { url: String, title: String },
    CreateRejected,
    AttachTags { bookmark_id: String, tags: Vec<String> },
}

impl RecordedCall {
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            RecordedCall::Mark { .. }
                | RecordedCall::CreateBookmark { .. }
                | RecordedCall::AttachTags { .. }
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeServerOptions {
    /// Bookmark creation answers 500 for URLs containing this text
    pub fail_create_for: Option<String>,
    /// Bookmark creation answers without an id for URLs containing this text
    pub omit_id_for: Option<String>,
    /// Tag attachment answers `{"attached": []}`
    pub attach_nothing: bool,
}

#[derive(Clone)]
pub struct FakeServer {
    items: Arc<Vec<Value>>,
    options: Arc<FakeServerOptions>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    api_key: String,
}

impl FakeServer {
    pub fn new(items: &[(&str, &str, &str)], options: FakeServerOptions) -> Self {
        let items = items
            .iter()
            .map(|(id, url, title)| {
                json!({
                    "id": id,
                    "feed_id": "1",
                    "title": title,
                    "author": "",
                    "html": "<p>body</p>",
                    "url": url,
                    "is_saved": 1,
                    "is_read": 0,
                    "created_on_time": 1700000000
                })
            })
            .collect();

        Self {
            items: Arc::new(items),
            options: Arc::new(options),
            calls: Arc::new(Mutex::new(Vec::new())),
            api_key: fever_api_key(USERNAME, PASSWORD),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/fever.php", post(fever))
            .route("/api/v1/bookmarks", post(create_bookmark))
            .route("/api/v1/bookmarks/:bookmark_id/tags", post(attach_tags))
            .with_state(self.clone())
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().push(call);
    }
}

async fn fever(
    State(server): State<FakeServer>,
    Query(query): Query<HashMap<String, String>>,
    Form(form): Form<HashMap<String, String>>,
) -> Json<Value> {
    if form.get("api_key") != Some(&server.api_key) {
        server.record(RecordedCall::FeverRejected);
        return Json(json!({"api_version": 3, "auth": 0}));
    }

    if query.contains_key("saved_item_ids") {
        server.record(RecordedCall::SavedItemIds);
        let ids: Vec<&str> = server
            .items
            .iter()
            .filter_map(|item| item["id"].as_str())
            .collect();
        return Json(json!({"api_version": 3, "auth": 1, "saved_item_ids": ids.join(",")}));
    }

    if let Some(with_ids) = query.get("with_ids") {
        let requested: Vec<String> = with_ids.split(',').map(str::to_string).collect();
        server.record(RecordedCall::Items(requested.clone()));
        let items: Vec<Value> = server
            .items
            .iter()
            .filter(|item| {
                item["id"]
                    .as_str()
                    .is_some_and(|id| requested.iter().any(|r| r == id))
            })
            .cloned()
            .collect();
        return Json(json!({
            "api_version": 3,
            "auth": 1,
            "total_items": server.items.len(),
            "items": items
        }));
    }

    if query.get("mark").map(String::as_str) == Some("item") {
        server.record(RecordedCall::Mark {
            as_: query.get("as").cloned().unwrap_or_default(),
            id: query.get("id").cloned().unwrap_or_default(),
        });
        return Json(json!({"api_version": 3, "auth": 1}));
    }

    server.record(RecordedCall::FeverPing);
    Json(json!({"api_version": 3, "auth": 1, "last_refreshed_on_time": 1700000000}))
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", KARAKEEP_KEY))
}

async fn create_bookmark(
    State(server): State<FakeServer>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        server.record(RecordedCall::CreateRejected);
        return (StatusCode::UNAUTHORIZED, Json(json!({"code": "UNAUTHORIZED"}))).into_response();
    }

    let url = body["url"].as_str().unwrap_or_default().to_string();
    let title = body["title"].as_str().unwrap_or_default().to_string();
    assert_eq!(body["type"], "link", "bookmarks must be created as links");

    server.record(RecordedCall::CreateBookmark {
        url: url.clone(),
        title: title.clone(),
    });

    let matches = |needle: &Option<String>| needle.as_deref().is_some_and(|n| url.contains(n));

    if matches(&server.options.fail_create_for) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"code": "INTERNAL_SERVER_ERROR"})),
        )
            .into_response();
    }

    if matches(&server.options.omit_id_for) {
        return (StatusCode::CREATED, Json(json!({"title": title}))).into_response();
    }

    let id = format!("bm-{}", server.calls.lock().len());
    (
        StatusCode::CREATED,
        Json(json!({
            "id": id,
            "createdAt": "2026-10-19T00:00:00.000Z",
            "title": title,
            "archived": false,
            "favourited": false,
            "tags": [],
            "content": {"type": "link", "url": url}
        })),
    )
        .into_response()
}

async fn attach_tags(
    State(server): State<FakeServer>,
    Path(bookmark_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let tags: Vec<String> = body["tags"]
        .as_array()
        .map(|tags| {
            tags.iter()
                .filter_map(|t| t["tagName"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    server.record(RecordedCall::AttachTags { bookmark_id, tags });

    if server.options.attach_nothing {
        return Json(json!({"attached": []})).into_response();
    }
    Json(json!({"attached": ["tag-freshrss"]})).into_response()
}
