use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use blog_api::{
    AppState, Application, Config, ServerError, router,
    models::{Post, PostPatch},
    store::{MemoryPostStore, PostFilter, PostStore, StoreError},
};
use serde_json::{Value, json};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

/// A store whose every operation fails, to drive the 500 path.
struct BrokenStore;

#[async_trait]
impl PostStore for BrokenStore {
    async fn list(&self, _filter: PostFilter) -> Result<Vec<Post>, StoreError> {
        Err(StoreError::Query("secret detail".into()))
    }

    async fn get(&self, _id: &str) -> Result<Option<Post>, StoreError> {
        Err(StoreError::Query("secret detail".into()))
    }

    async fn insert(&self, _post: Post) -> Result<Post, StoreError> {
        Err(StoreError::Query("secret detail".into()))
    }

    async fn update(&self, _id: &str, _patch: PostPatch) -> Result<Option<Post>, StoreError> {
        Err(StoreError::Query("secret detail".into()))
    }

    async fn delete(&self, _id: &str) -> Result<bool, StoreError> {
        Err(StoreError::Query("secret detail".into()))
    }

    async fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Memory store that remembers whether it was closed.
#[derive(Default)]
struct TrackedStore {
    inner: MemoryPostStore,
    closed: AtomicBool,
}

#[async_trait]
impl PostStore for TrackedStore {
    async fn list(&self, filter: PostFilter) -> Result<Vec<Post>, StoreError> {
        self.inner.list(filter).await
    }

    async fn get(&self, id: &str) -> Result<Option<Post>, StoreError> {
        self.inner.get(id).await
    }

    async fn insert(&self, post: Post) -> Result<Post, StoreError> {
        self.inner.insert(post).await
    }

    async fn update(&self, id: &str, patch: PostPatch) -> Result<Option<Post>, StoreError> {
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        self.inner.delete(id).await
    }

    async fn close(&self) -> Result<(), StoreError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

fn local_config() -> Config {
    Config {
        database_url: "memory://".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

async fn raw_get(addr: std::net::SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        path, addr
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_storage_failures_are_hidden_from_clients() {
    let server = TestServer::new(router(AppState::new(Arc::new(BrokenStore)))).unwrap();

    let responses = vec![
        server.get("/posts").await,
        server.get("/posts/abc").await,
        server
            .post("/posts")
            .json(&json!({
                "title": "T",
                "content": "C",
                "author": { "firstName": "A", "lastName": "B" }
            }))
            .await,
        server
            .put("/posts/abc")
            .json(&json!({ "id": "abc", "title": "T" }))
            .await,
        server.delete("/posts/abc").await,
    ];

    for response in responses {
        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body, json!({ "message": "Internal Server Error" }));
    }
}

#[tokio::test]
async fn test_validation_runs_before_storage() {
    let server = TestServer::new(router(AppState::new(Arc::new(BrokenStore)))).unwrap();

    let response = server.post("/posts").json(&json!({ "title": "T" })).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_start_serves_until_stopped() {
    let app = Application::start(&local_config()).await.unwrap();
    let addr = app.local_addr();
    assert_ne!(addr.port(), 0);

    let response = raw_get(addr, "/posts").await;
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.contains(r#"{"posts":[]}"#));

    app.stop().await.unwrap();

    assert!(TcpStream::connect(addr).await.is_err());
}

#[tokio::test]
async fn test_start_rejects_unknown_database_url() {
    let config = Config {
        database_url: "ftp://nowhere".to_string(),
        ..local_config()
    };

    let result = Application::start(&config).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_listener_failure_closes_store() {
    let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let config = Config {
        port: taken.local_addr().unwrap().port(),
        ..local_config()
    };
    let store = Arc::new(TrackedStore::default());

    let result = Application::start_with_store(&config, store.clone()).await;

    assert!(matches!(result, Err(ServerError::Bind { .. })));
    assert!(store.closed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_stop_closes_store() {
    let store = Arc::new(TrackedStore::default());

    let app = Application::start_with_store(&local_config(), store.clone())
        .await
        .unwrap();
    assert!(!store.closed.load(Ordering::SeqCst));

    app.stop().await.unwrap();
    assert!(store.closed.load(Ordering::SeqCst));
}
