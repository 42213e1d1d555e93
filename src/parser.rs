// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Parser for the text generator's flat key-value quiz format.
//!
//! The generator returns a single flat JSON object using positional keys
//! `question{i}`, `answer{i}_{j}`, and `correct_answer{i}` for
//! i = 1..=requested_count. This module converts that blob into a
//! validated quiz payload, tolerating an under-producing generator and
//! repairing inconsistent output.

use crate::models::{Difficulty, NewQuiz, Question};
use rand::Rng;
use serde_json::Value;
use uuid::Uuid;

/// Parse failures with no safe local default.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("generator output was not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("generator output contained no usable questions")]
    NoValidQuestions,
}

/// Convert raw generator output into a quiz payload.
///
/// Question groups with a missing `question{i}` or `correct_answer{i}`
/// are skipped, so the emitted quiz may hold fewer questions than
/// `requested_count`. Options are collected by probing ascending
/// `answer{i}_{j}` keys and stopping at the first gap. If the stated
/// correct answer is not among the collected options it is inserted at a
/// uniformly random position, so every emitted question satisfies
/// `correct_answer ∈ options`.
pub fn parse_generated_quiz(
    raw: &str,
    topic: &str,
    difficulty: Difficulty,
    requested_count: u32,
) -> Result<NewQuiz, ParseError> {
    let blob: Value = serde_json::from_str(raw)?;

    let mut rng = rand::thread_rng();
    let mut questions = Vec::new();

    for i in 1..=requested_count {
        let Some(question_text) = text_field(&blob, &format!("question{i}")) else {
            continue;
        };
        let Some(correct_answer) = text_field(&blob, &format!("correct_answer{i}")) else {
            continue;
        };

        let mut options = Vec::new();
        let mut j = 1;
        while let Some(option) = text_field(&blob, &format!("answer{i}_{j}")) {
            options.push(option.to_string());
            j += 1;
        }

        if !options.is_empty() && !options.iter().any(|o| o == correct_answer) {
            // Inconsistent generator output: the stated answer is not one
            // of the options. Insert it so the invariant holds.
            let at = rng.gen_range(0..=options.len());
            options.insert(at, correct_answer.to_string());
        }

        if options.is_empty() {
            continue;
        }

        questions.push(Question {
            id: Uuid::new_v4().to_string(),
            question_text: question_text.to_string(),
            options,
            correct_answer: correct_answer.to_string(),
        });
    }

    if questions.is_empty() {
        return Err(ParseError::NoValidQuestions);
    }

    Ok(NewQuiz {
        topic: topic.to_string(),
        difficulty,
        num_questions: questions.len() as u32,
        questions,
        is_ai_generated: true,
    })
}

/// Non-empty string value for `key`; anything else counts as absent.
fn text_field<'a>(blob: &'a Value, key: &str) -> Option<&'a str> {
    match blob.get(key).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}
