//! HTTP surface: GET /docs/{slug}, /categories, /category/{name}, plus the
//! /images and /css static directories.
//!
//! Filesystem work runs on the blocking pool. The category index is a shared
//! snapshot: /categories rebuilds and replaces it, /category/{name} only reads.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    routing::get,
    Router,
};
use std::path::Path as FsPath;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::docs::DocumentStore;
use crate::error::AppError;
use crate::index::{self, CategoryIndex};
use crate::render;

#[derive(Clone)]
pub struct AppState {
    store: DocumentStore,
    index: Arc<RwLock<Arc<CategoryIndex>>>,
}

impl AppState {
    pub fn new(store: DocumentStore, index: CategoryIndex) -> Self {
        Self {
            store,
            index: Arc::new(RwLock::new(Arc::new(index))),
        }
    }

    pub fn snapshot(&self) -> Arc<CategoryIndex> {
        // Writers only ever store a complete index, so a poisoned lock still
        // holds a usable value.
        self.index
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace(&self, index: CategoryIndex) -> Arc<CategoryIndex> {
        let index = Arc::new(index);
        *self.index.write().unwrap_or_else(PoisonError::into_inner) = index.clone();
        index
    }
}

async fn show_document(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, AppError> {
    let store = state.store.clone();
    let doc = tokio::task::spawn_blocking(move || store.load(&slug)).await??;

    let body = render::markdown_to_html(&doc.markdown);
    let title = doc.title().unwrap_or_default();
    Ok(Html(render::document_page(&title, &body)))
}

async fn list_categories(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let store = state.store.clone();
    let scan = tokio::task::spawn_blocking(move || index::scan(&store)).await??;

    let index = state.replace(scan.index);
    Ok(Html(render::category_list_page(index.categories())))
}

async fn show_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Html<String> {
    let index = state.snapshot();
    Html(render::category_page(&name, index.documents(&name)))
}

/// Build the application router.
pub fn router(state: AppState, static_dir: &FsPath) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/categories") }))
        .route("/docs/{slug}", get(show_document))
        .route("/categories", get(list_categories))
        .route("/category/{name}", get(show_category))
        .nest_service("/images", ServeDir::new(static_dir.join("images")))
        .nest_service("/css", ServeDir::new(static_dir.join("css")))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Serve until Ctrl+C or SIGTERM; in-flight requests complete before exit.
pub async fn serve(app: Router, bind_addr: &str) -> Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
