// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! QuizGenius: generate, author, and play quizzes with scored history
//!
//! This crate provides the backend API for the QuizGenius application:
//! quizzes are generated from an external text-generation service or
//! authored by hand, played, and scored, with all records persisted per
//! user profile as whole-collection JSON documents.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod parser;
pub mod routes;
pub mod services;
pub mod session;
pub mod store;
pub mod time_utils;

use config::Config;
use services::GeneratorClient;
use session::SessionService;
use store::{LocalStore, QuizDataStore};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: LocalStore,
    pub quiz_data: QuizDataStore,
    pub sessions: SessionService,
    pub generator: GeneratorClient,
}
