// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Append-and-read API over the quiz and result collections.
//!
//! Every mutating call performs a whole-collection read-modify-write of
//! the backing slot while holding the scope's write lock. Records are
//! never updated in place; collections only grow until the scope is
//! cleared at logout.

use crate::error::AppError;
use crate::models::{NewQuiz, NewQuizResult, Quiz, QuizResult};
use crate::store::{slots, LocalStore};
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Quiz/result collection store, cheap to clone.
#[derive(Clone)]
pub struct QuizDataStore {
    store: LocalStore,
}

impl QuizDataStore {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    // ─── Quiz Operations ─────────────────────────────────────────

    /// Assign a fresh id and creation timestamp, append, persist, and
    /// return the stored record.
    pub async fn add_quiz(&self, scope: &str, new_quiz: NewQuiz) -> Result<Quiz, AppError> {
        let _guard = self.store.lock_scope(scope).await;

        let mut quizzes: Vec<Quiz> = self
            .store
            .read_slot(scope, slots::QUIZZES)
            .await
            .unwrap_or_default();

        let quiz = Quiz {
            id: Uuid::new_v4().to_string(),
            topic: new_quiz.topic,
            date_created: format_utc_rfc3339(Utc::now()),
            difficulty: new_quiz.difficulty,
            num_questions: new_quiz.num_questions,
            questions: new_quiz.questions,
            is_ai_generated: new_quiz.is_ai_generated,
        };

        quizzes.push(quiz.clone());
        self.store.write_slot(scope, slots::QUIZZES, &quizzes).await?;

        tracing::debug!(quiz_id = %quiz.id, topic = %quiz.topic, "Quiz stored");
        Ok(quiz)
    }

    /// All quizzes in the scope, in creation order.
    pub async fn list_quizzes(&self, scope: &str) -> Vec<Quiz> {
        self.store
            .read_slot(scope, slots::QUIZZES)
            .await
            .unwrap_or_default()
    }

    pub async fn get_quiz_by_id(&self, scope: &str, id: &str) -> Option<Quiz> {
        self.list_quizzes(scope).await.into_iter().find(|q| q.id == id)
    }

    // ─── Result Operations ───────────────────────────────────────

    /// Assign a fresh id and timestamp, append, persist, and return the
    /// stored record.
    pub async fn add_result(
        &self,
        scope: &str,
        new_result: NewQuizResult,
    ) -> Result<QuizResult, AppError> {
        let _guard = self.store.lock_scope(scope).await;

        let mut results: Vec<QuizResult> = self
            .store
            .read_slot(scope, slots::RESULTS)
            .await
            .unwrap_or_default();

        let result = QuizResult {
            id: Uuid::new_v4().to_string(),
            quiz_id: new_result.quiz_id,
            quiz_topic: new_result.quiz_topic,
            score: new_result.score,
            user_answers: new_result.user_answers,
            correct_answers: new_result.correct_answers,
            date_taken: format_utc_rfc3339(Utc::now()),
        };

        results.push(result.clone());
        self.store.write_slot(scope, slots::RESULTS, &results).await?;

        tracing::debug!(result_id = %result.id, quiz_id = %result.quiz_id, "Result stored");
        Ok(result)
    }

    pub async fn get_result_by_id(&self, scope: &str, id: &str) -> Option<QuizResult> {
        let results: Vec<QuizResult> = self
            .store
            .read_slot(scope, slots::RESULTS)
            .await
            .unwrap_or_default();
        results.into_iter().find(|r| r.id == id)
    }

    /// Results for a quiz, most recent first. Tolerates the quiz itself
    /// being absent from storage.
    pub async fn get_results_for_quiz(&self, scope: &str, quiz_id: &str) -> Vec<QuizResult> {
        let results: Vec<QuizResult> = self
            .store
            .read_slot(scope, slots::RESULTS)
            .await
            .unwrap_or_default();

        let mut matching: Vec<QuizResult> = results
            .into_iter()
            .filter(|r| r.quiz_id == quiz_id)
            .collect();

        // Stable sort over the reversed collection: ties on date_taken
        // resolve to the most recently appended record first.
        matching.reverse();
        matching.sort_by(|a, b| parse_when(&b.date_taken).cmp(&parse_when(&a.date_taken)));
        matching
    }

    /// Most recent result for a quiz, if any.
    pub async fn get_last_quiz_result(&self, scope: &str, quiz_id: &str) -> Option<QuizResult> {
        self.get_results_for_quiz(scope, quiz_id)
            .await
            .into_iter()
            .next()
    }

    // ─── Scope Lifecycle ─────────────────────────────────────────

    /// Remove both collections for the scope (logout cascade).
    pub async fn clear_scope(&self, scope: &str) -> Result<(), AppError> {
        let _guard = self.store.lock_scope(scope).await;

        self.store.remove_slot(scope, slots::QUIZZES).await?;
        self.store.remove_slot(scope, slots::RESULTS).await?;

        tracing::info!(scope = %scope, "Cleared quiz and result collections");
        Ok(())
    }
}

/// Unparseable timestamps order before every valid one.
fn parse_when(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
