//! HTTP contract tests: each route is exercised against a real listener.

use reqwest::StatusCode;
use serde_json::{json, Value};
use tempfile::TempDir;
use todolist_lib::http::{build_router, AppState};
use todolist_lib::todos::TodoStore;

struct TestServer {
    base: String,
    client: reqwest::Client,
    dir: TempDir,
}

impl TestServer {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn data_file(&self) -> std::path::PathBuf {
        self.dir.path().join("todos.json")
    }

    async fn todos(&self) -> Value {
        let resp = self.client.get(self.url("/api/todos")).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        resp.json().await.unwrap()
    }

    async fn add(&self, text: &str) {
        let resp = self
            .client
            .post(self.url("/api/todos"))
            .json(&json!({ "todo": text }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
}

async fn spawn_server() -> TestServer {
    let dir = tempfile::tempdir().expect("tempdir");
    let static_dir = dir.path().join("public");
    std::fs::create_dir_all(&static_dir).expect("static dir");
    std::fs::write(static_dir.join("index.html"), "<h1>todos</h1>").expect("index");

    let store = TodoStore::new(dir.path().join("todos.json"));
    let app = build_router(AppState::new(store), &static_dir);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve") });

    TestServer {
        base: format!("http://{}", addr),
        client: reqwest::Client::new(),
        dir,
    }
}

#[tokio::test]
async fn list_starts_empty() {
    let server = spawn_server().await;

    assert_eq!(server.todos().await, json!([]));
}

#[tokio::test]
async fn post_appends_active_todo() {
    let server = spawn_server().await;

    let resp = server
        .client
        .post(server.url("/api/todos"))
        .json(&json!({"todo": "buy milk"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(resp.text().await.unwrap(), "Todo added");
    assert_eq!(
        server.todos().await,
        json!([{"text": "buy milk", "completed": false, "deleted": false}])
    );
}

#[tokio::test]
async fn post_without_text_is_bad_request() {
    let server = spawn_server().await;

    for body in [json!({}), json!({"todo": ""}), json!({"todo": "   "})] {
        let resp = server
            .client
            .post(server.url("/api/todos"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body {}", body);
        assert_eq!(resp.text().await.unwrap(), "Todo text is required");
    }

    assert_eq!(server.todos().await, json!([]));
}

#[tokio::test]
async fn post_with_malformed_json_is_bad_request() {
    let server = spawn_server().await;

    let resp = server
        .client
        .post(server.url("/api/todos"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_sets_completed() {
    let server = spawn_server().await;
    server.add("a").await;

    let resp = server
        .client
        .patch(server.url("/api/todos/0"))
        .json(&json!({"completed": true}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        server.todos().await,
        json!([{"text": "a", "completed": true, "deleted": false}])
    );
}

#[tokio::test]
async fn patch_without_completed_flag_is_bad_request() {
    let server = spawn_server().await;
    server.add("a").await;

    let resp = server
        .client
        .patch(server.url("/api/todos/0"))
        .json(&json!({"done": true}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_and_restore_keep_the_slot() {
    let server = spawn_server().await;
    server.add("x").await;
    server.add("y").await;

    let resp = server
        .client
        .delete(server.url("/api/todos/0"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "Todo deleted");
    assert_eq!(server.todos().await[0]["deleted"], json!(true));

    let resp = server
        .client
        .patch(server.url("/api/todos/0/restore"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "Todo restored");

    assert_eq!(
        server.todos().await,
        json!([
            {"text": "x", "completed": false, "deleted": false},
            {"text": "y", "completed": false, "deleted": false}
        ])
    );
}

#[tokio::test]
async fn put_replaces_text() {
    let server = spawn_server().await;
    server.add("draft").await;

    let resp = server
        .client
        .put(server.url("/api/todos/0"))
        .json(&json!({"text": "final"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(server.todos().await[0]["text"], json!("final"));
}

#[tokio::test]
async fn put_with_empty_text_is_bad_request_even_for_unknown_index() {
    let server = spawn_server().await;

    let resp = server
        .client
        .put(server.url("/api/todos/7"))
        .json(&json!({"text": ""}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bad_indices_are_not_found() {
    let server = spawn_server().await;
    server.add("only").await;
    let before = std::fs::read(server.data_file()).unwrap();

    for index in ["1", "-1", "abc", "99", "summary"] {
        let resp = server
            .client
            .delete(server.url(&format!("/api/todos/{}", index)))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "index {}", index);
        assert_eq!(resp.text().await.unwrap(), "Todo not found");

        let resp = server
            .client
            .patch(server.url(&format!("/api/todos/{}", index)))
            .json(&json!({"completed": true}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "index {}", index);

        let resp = server
            .client
            .patch(server.url(&format!("/api/todos/{}/restore", index)))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "index {}", index);

        let resp = server
            .client
            .put(server.url(&format!("/api/todos/{}", index)))
            .json(&json!({"text": "x"}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "index {}", index);
    }

    assert_eq!(std::fs::read(server.data_file()).unwrap(), before);
}

#[tokio::test]
async fn corrupt_file_is_server_error() {
    let server = spawn_server().await;
    std::fs::write(server.data_file(), "garbage").unwrap();

    let resp = server.client.get(server.url("/api/todos")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.text().await.unwrap(), "Error reading data");

    let resp = server
        .client
        .post(server.url("/api/todos"))
        .json(&json!({"todo": "x"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn failed_write_is_server_error() {
    let server = spawn_server().await;
    server.add("a").await;
    let before = std::fs::read(server.data_file()).unwrap();
    std::fs::create_dir(server.dir.path().join("todos.json.tmp")).unwrap();

    let resp = server
        .client
        .post(server.url("/api/todos"))
        .json(&json!({"todo": "b"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.text().await.unwrap(), "Error saving data");

    let resp = server
        .client
        .delete(server.url("/api/todos/0"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(std::fs::read(server.data_file()).unwrap(), before);
}

#[tokio::test]
async fn summary_counts_states() {
    let server = spawn_server().await;
    server.add("a").await;
    server.add("b").await;
    server
        .client
        .patch(server.url("/api/todos/0"))
        .json(&json!({"completed": true}))
        .send()
        .await
        .unwrap();
    server
        .client
        .delete(server.url("/api/todos/1"))
        .send()
        .await
        .unwrap();

    let resp = server
        .client
        .get(server.url("/api/summary"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let summary: Value = resp.json().await.unwrap();
    assert_eq!(
        summary,
        json!({"total": 2, "active": 1, "completed": 1, "deleted": 1})
    );
}

#[tokio::test]
async fn concurrent_posts_are_all_kept() {
    let server = spawn_server().await;

    let requests = (0..20).map(|i| {
        server
            .client
            .post(server.url("/api/todos"))
            .json(&json!({ "todo": format!("item {}", i) }))
            .send()
    });
    for resp in spawn_all(requests).await {
        assert_eq!(resp.unwrap().status(), StatusCode::CREATED);
    }

    assert_eq!(server.todos().await.as_array().unwrap().len(), 20);
}

async fn spawn_all<F, T>(futures: impl Iterator<Item = F>) -> Vec<T>
where
    F: std::future::Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let handles: Vec<_> = futures.map(tokio::spawn).collect();
    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.expect("request task"));
    }
    results
}

#[tokio::test]
async fn frontend_logs_are_accepted() {
    let server = spawn_server().await;

    let resp = server
        .client
        .post(server.url("/api/logs"))
        .json(&json!({"level": "warn", "message": "render failed", "context": {"index": 3}}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn healthz_and_static_ui() {
    let server = spawn_server().await;

    let resp = server.client.get(server.url("/healthz")).send().await.unwrap();
    assert_eq!(resp.text().await.unwrap(), "ok");

    let resp = server.client.get(server.url("/")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "<h1>todos</h1>");

    let resp = server
        .client
        .get(server.url("/missing.css"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
