// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quiz result model for storage and API.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A completed play-through of a quiz. Created once, never mutated.
///
/// `quiz_id` is a non-owning reference: the referenced quiz may have been
/// cleared from storage, so lookups through it are optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    /// Opaque unique id
    pub id: String,
    /// Id of the quiz that was played
    pub quiz_id: String,
    /// Denormalized copy of the quiz topic
    pub quiz_topic: String,
    /// Score as an integer percentage 0-100
    pub score: u32,
    /// Question id -> option the player chose
    pub user_answers: HashMap<String, String>,
    /// Question id -> correct option
    pub correct_answers: HashMap<String, String>,
    /// Completion timestamp (RFC3339)
    pub date_taken: String,
}

/// Result payload before the store assigns an id and timestamp.
#[derive(Debug, Clone)]
pub struct NewQuizResult {
    pub quiz_id: String,
    pub quiz_topic: String,
    pub score: u32,
    pub user_answers: HashMap<String, String>,
    pub correct_answers: HashMap<String, String>,
}
