// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quiz and question models for storage and API.
//!
//! Wire names are camelCase to match the stored collection format.

use serde::{Deserialize, Serialize};

/// Quiz difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Lowercase name, as used in generator prompts and the wire format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Opaque unique id
    pub id: String,
    /// Question text shown to the player
    pub question_text: String,
    /// Ordered answer options (always contains `correct_answer`)
    pub options: Vec<String>,
    /// The correct option value
    pub correct_answer: String,
}

/// A stored quiz. Immutable once created; destroyed only by clearing the
/// owning profile's storage scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    /// Opaque unique id
    pub id: String,
    pub topic: String,
    /// Creation timestamp (RFC3339)
    pub date_created: String,
    pub difficulty: Difficulty,
    /// Number of questions actually stored
    pub num_questions: u32,
    pub questions: Vec<Question>,
    /// Whether the quiz came from the text generator
    #[serde(default)]
    pub is_ai_generated: bool,
}

/// Quiz payload before the store assigns an id and creation timestamp.
#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub topic: String,
    pub difficulty: Difficulty,
    pub num_questions: u32,
    pub questions: Vec<Question>,
    pub is_ai_generated: bool,
}
