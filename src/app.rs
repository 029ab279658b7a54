use crate::{
    AppState,
    config::{Config, ConfigError},
    routes::{create_post, delete_post, get_post, health_check, list_posts, update_post},
    store::{self, PostStore, StoreError},
};
use axum::{Router, routing::get};
use std::{net::SocketAddr, sync::Arc};
use thiserror::Error;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),

    #[error("server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Build the router: post routes, health check, request tracing and CORS.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

/// A listening server together with the store it serves from.
///
/// Dropping it without calling [`Application::stop`] leaves the server task
/// running until the runtime shuts down.
pub struct Application {
    local_addr: SocketAddr,
    store: Arc<dyn PostStore>,
    shutdown: oneshot::Sender<()>,
    server: JoinHandle<std::io::Result<()>>,
}

impl Application {
    /// Connects the store, binds the listener and starts serving in the background.
    pub async fn start(config: &Config) -> Result<Self, ServerError> {
        let store = store::connect(&config.database_url).await?;
        Self::start_with_store(config, store).await
    }

    /// Same as [`Application::start`] with an already opened store.
    pub async fn start_with_store(
        config: &Config,
        store: Arc<dyn PostStore>,
    ) -> Result<Self, ServerError> {
        let addr = config.addr();
        let bound = async {
            let listener = TcpListener::bind(&addr).await?;
            let local_addr = listener.local_addr()?;
            Ok::<_, std::io::Error>((listener, local_addr))
        }
        .await;
        // The store is already open, so it has to be released on any listener failure.
        let (listener, local_addr) = match bound {
            Ok(bound) => bound,
            Err(source) => {
                store.close().await?;
                return Err(ServerError::Bind { addr, source });
            }
        };

        let app = router(AppState::new(store.clone()));
        let (shutdown, signal) = oneshot::channel::<()>();
        let server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    signal.await.ok();
                })
                .await
        });

        info!("Your app is listening on http://{}", local_addr);

        Ok(Self {
            local_addr,
            store,
            shutdown,
            server,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops accepting connections, waits for in-flight requests, then closes the store.
    pub async fn stop(self) -> Result<(), ServerError> {
        info!("Closing server");
        // The receiver is gone only if the server task already exited.
        let _ = self.shutdown.send(());
        let served = self.server.await;
        self.store.close().await?;
        served??;
        Ok(())
    }
}
