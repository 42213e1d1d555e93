// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! QuizGenius API Server
//!
//! Backend for the QuizGenius quiz application: AI-generated and manually
//! authored quizzes, scored play-throughs, and per-profile history.

use quizgenius::{
    config::Config,
    services::{GeneratorClient, IdentityClient},
    session::SessionService,
    store::{LocalStore, QuizDataStore},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting QuizGenius API");

    // Initialize the local slot store
    let store = LocalStore::new(config.data_dir.clone());
    tracing::info!(data_dir = %store.data_dir().display(), "Slot store initialized");

    let quiz_data = QuizDataStore::new(store.clone());

    // External collaborators
    let identity = IdentityClient::new(
        config.identity_base_url.clone(),
        config.identity_api_key.clone(),
    );
    let generator = GeneratorClient::new(
        config.generator_base_url.clone(),
        config.generator_model.clone(),
    );
    tracing::info!(
        identity = %config.identity_base_url,
        generator = %config.generator_base_url,
        model = %config.generator_model,
        "Collaborator clients initialized"
    );

    let sessions = SessionService::new(store.clone(), quiz_data.clone(), identity);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        quiz_data,
        sessions,
        generator,
    });

    // Build router
    let app = quizgenius::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizgenius=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
