//! HTTP layer for the library and capsule services.
//!
//! Each router state owns one [`StoryService`] behind a mutex. Handlers hold
//! the lock for their whole load-mutate-save, so requests touching the store
//! run one at a time.

pub mod capsule;
pub mod error;
pub mod library;
pub mod pages;

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::info;

use crate::auth::Authorizer;
use crate::service::StoryService;

pub use capsule::capsule_router;
pub use library::library_router;

/// Shared state of the file-backed library site.
#[derive(Clone)]
pub struct LibraryState {
    pub service: Arc<Mutex<StoryService>>,
    pub authorizer: Arc<dyn Authorizer>,
}

impl LibraryState {
    pub fn new(service: StoryService, authorizer: impl Authorizer + 'static) -> Self {
        Self {
            service: Arc::new(Mutex::new(service)),
            authorizer: Arc::new(authorizer),
        }
    }
}

/// Shared state of the in-memory capsule API.
#[derive(Clone)]
pub struct CapsuleState {
    pub service: Arc<Mutex<StoryService>>,
}

impl CapsuleState {
    pub fn new(service: StoryService) -> Self {
        Self {
            service: Arc::new(Mutex::new(service)),
        }
    }
}

/// Serve `router` on `listener` until Ctrl-C or SIGTERM.
pub async fn serve(listener: TcpListener, router: axum::Router) -> std::io::Result<()> {
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutting down");
}
