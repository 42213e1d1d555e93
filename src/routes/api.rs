// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Difficulty, NewQuiz, NewQuizResult, Question, Quiz, QuizResult, UserProfile};
use crate::parser::parse_generated_quiz;
use crate::session::OnboardingDetails;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

const MAX_TOPIC_LEN: usize = 200;
const MIN_GENERATE_TOPIC_LEN: usize = 3;
const MIN_QUESTIONS: u32 = 1;
const MAX_QUESTIONS: u32 = 10;

/// API routes (require a session token).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/me/api-key", put(save_api_key))
        .route("/api/onboarding", post(complete_onboarding))
        .route("/api/quizzes", get(list_quizzes).post(create_quiz))
        .route("/api/quizzes/generate", post(generate_quiz))
        .route("/api/quizzes/{id}", get(get_quiz))
        .route(
            "/api/quizzes/{id}/results",
            get(get_quiz_results).post(submit_answers),
        )
        .route("/api/results/{id}", get(get_result))
        .route("/api/results/{id}/summary", post(summarize_result))
        .route("/api/history", get(get_history))
}

// ─── User Profile ────────────────────────────────────────────

/// Current profile response. The API key itself is never echoed back,
/// only its presence.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub is_guest: bool,
    pub is_onboarded: bool,
    pub has_api_key: bool,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            is_onboarded: profile.is_onboarded(),
            has_api_key: profile.has_api_key(),
            email: profile.email,
            name: profile.name,
            profession: profile.profession,
            age: profile.age,
            is_guest: profile.is_guest,
        }
    }
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>> {
    let profile = require_profile(&state, &user).await?;
    Ok(Json(ProfileResponse::from(profile)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRequest {
    name: String,
    #[serde(default)]
    profession: Option<String>,
    #[serde(default)]
    age: Option<u32>,
}

/// Complete onboarding by merging details into the profile.
async fn complete_onboarding(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<OnboardingRequest>,
) -> Result<Json<ProfileResponse>> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }

    let details = OnboardingDetails {
        name,
        profession: req.profession.filter(|p| !p.trim().is_empty()),
        age: req.age,
    };

    let profile = state
        .sessions
        .complete_onboarding(&user.scope, details)
        .await?
        .ok_or_else(|| AppError::NotFound("No active profile".to_string()))?;

    Ok(Json(ProfileResponse::from(profile)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyRequest {
    api_key: String,
}

/// Save the generator API key on the profile.
async fn save_api_key(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<ApiKeyRequest>,
) -> Result<Json<ProfileResponse>> {
    let key = req.api_key.trim();
    if key.is_empty() {
        return Err(AppError::BadRequest("apiKey is required".to_string()));
    }

    let profile = state
        .sessions
        .set_api_key(&user.scope, key)
        .await?
        .ok_or_else(|| AppError::NotFound("No active profile".to_string()))?;

    Ok(Json(ProfileResponse::from(profile)))
}

// ─── Quizzes ─────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    question_text: String,
    options: Vec<String>,
    correct_answer: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    topic: String,
    difficulty: Difficulty,
    questions: Vec<CreateQuestionRequest>,
}

/// Create a manually authored quiz. Not available to guests.
async fn create_quiz(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateQuizRequest>,
) -> Result<Json<Quiz>> {
    let profile = require_profile(&state, &user).await?;
    if profile.is_guest {
        return Err(AppError::MissingCapability(
            "Guests cannot create manual quizzes".to_string(),
        ));
    }

    let topic = req.topic.trim().to_string();
    if topic.is_empty() {
        return Err(AppError::BadRequest("topic is required".to_string()));
    }
    if topic.len() > MAX_TOPIC_LEN {
        return Err(AppError::BadRequest("topic is too long".to_string()));
    }
    if req.questions.is_empty() {
        return Err(AppError::BadRequest(
            "a quiz needs at least 1 question".to_string(),
        ));
    }

    let mut questions = Vec::with_capacity(req.questions.len());
    for (index, q) in req.questions.into_iter().enumerate() {
        if q.question_text.trim().is_empty() {
            return Err(AppError::BadRequest(format!(
                "question {} has no text",
                index + 1
            )));
        }
        if q.options.len() < 2 {
            return Err(AppError::BadRequest(format!(
                "question {} needs at least 2 options",
                index + 1
            )));
        }
        if q.options.iter().any(|o| o.trim().is_empty()) {
            return Err(AppError::BadRequest(format!(
                "question {} has an empty option",
                index + 1
            )));
        }
        if !q.options.contains(&q.correct_answer) {
            return Err(AppError::BadRequest(format!(
                "question {}'s correct answer must be one of its options",
                index + 1
            )));
        }

        questions.push(Question {
            id: Uuid::new_v4().to_string(),
            question_text: q.question_text,
            options: q.options,
            correct_answer: q.correct_answer,
        });
    }

    let new_quiz = NewQuiz {
        topic,
        difficulty: req.difficulty,
        num_questions: questions.len() as u32,
        questions,
        is_ai_generated: false,
    };

    let quiz = state.quiz_data.add_quiz(&user.scope, new_quiz).await?;
    Ok(Json(quiz))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    topic: String,
    num_questions: u32,
    difficulty: Difficulty,
}

/// Generate a quiz from a topic via the text generator, parse it, and
/// store it. Requires a generator API key on the profile.
async fn generate_quiz(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<GenerateQuizRequest>,
) -> Result<Json<Quiz>> {
    let profile = require_profile(&state, &user).await?;
    let Some(api_key) = profile.api_key.filter(|k| !k.is_empty()) else {
        return Err(AppError::MissingCapability(
            "Quiz generation requires a generator API key".to_string(),
        ));
    };

    let topic = req.topic.trim().to_string();
    if topic.len() < MIN_GENERATE_TOPIC_LEN {
        return Err(AppError::BadRequest(
            "topic must be at least 3 characters long".to_string(),
        ));
    }
    if topic.len() > MAX_TOPIC_LEN {
        return Err(AppError::BadRequest("topic is too long".to_string()));
    }
    if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&req.num_questions) {
        return Err(AppError::BadRequest(
            "numQuestions must be between 1 and 10".to_string(),
        ));
    }

    let raw = state
        .generator
        .generate_quiz_text(&api_key, &topic, req.num_questions, req.difficulty)
        .await?;

    let new_quiz = parse_generated_quiz(&raw, &topic, req.difficulty, req.num_questions)?;

    tracing::info!(
        topic = %topic,
        requested = req.num_questions,
        emitted = new_quiz.num_questions,
        "Generated quiz parsed"
    );

    let quiz = state.quiz_data.add_quiz(&user.scope, new_quiz).await?;
    Ok(Json(quiz))
}

/// All quizzes in the caller's scope.
async fn list_quizzes(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Quiz>>> {
    Ok(Json(state.quiz_data.list_quizzes(&user.scope).await))
}

/// One quiz by id.
async fn get_quiz(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Quiz>> {
    let quiz = state
        .quiz_data
        .get_quiz_by_id(&user.scope, &id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Quiz {} not found", id)))?;
    Ok(Json(quiz))
}

// ─── Results ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SubmitAnswersRequest {
    /// Question id -> chosen option
    answers: HashMap<String, String>,
}

/// Finish a play-through: score the submitted answers against the quiz
/// and store the result.
async fn submit_answers(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<SubmitAnswersRequest>,
) -> Result<Json<QuizResult>> {
    let quiz = state
        .quiz_data
        .get_quiz_by_id(&user.scope, &id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Quiz {} not found", id)))?;

    let mut correct_answers = HashMap::with_capacity(quiz.questions.len());
    let mut correct = 0usize;
    for question in &quiz.questions {
        correct_answers.insert(question.id.clone(), question.correct_answer.clone());
        if req.answers.get(&question.id) == Some(&question.correct_answer) {
            correct += 1;
        }
    }

    let score = if quiz.questions.is_empty() {
        0
    } else {
        ((correct as f64 / quiz.questions.len() as f64) * 100.0).round() as u32
    };

    let result = state
        .quiz_data
        .add_result(
            &user.scope,
            NewQuizResult {
                quiz_id: quiz.id,
                quiz_topic: quiz.topic,
                score,
                user_answers: req.answers,
                correct_answers,
            },
        )
        .await?;

    Ok(Json(result))
}

/// Results for a quiz, most recent first.
///
/// The quiz itself may have been cleared from storage; the stored
/// results are returned regardless.
async fn get_quiz_results(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Vec<QuizResult>>> {
    Ok(Json(
        state.quiz_data.get_results_for_quiz(&user.scope, &id).await,
    ))
}

/// One result by id.
async fn get_result(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<QuizResult>> {
    let result = state
        .quiz_data
        .get_result_by_id(&user.scope, &id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Result {} not found", id)))?;
    Ok(Json(result))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub summary: String,
    pub score: u32,
}

/// Generate a prose summary of a stored result. Requires a generator
/// API key on the profile.
async fn summarize_result(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<SummaryResponse>> {
    let profile = require_profile(&state, &user).await?;
    let Some(api_key) = profile.api_key.filter(|k| !k.is_empty()) else {
        return Err(AppError::MissingCapability(
            "Result summaries require a generator API key".to_string(),
        ));
    };

    let result = state
        .quiz_data
        .get_result_by_id(&user.scope, &id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Result {} not found", id)))?;

    // Order answers by the quiz's question order when the quiz still
    // exists; fall back to the result's own map otherwise.
    let quiz = state
        .quiz_data
        .get_quiz_by_id(&user.scope, &result.quiz_id)
        .await;

    let (user_answers, correct_answers) = match quiz {
        Some(quiz) => {
            let mut user_answers = Vec::with_capacity(quiz.questions.len());
            let mut correct_answers = Vec::with_capacity(quiz.questions.len());
            for question in &quiz.questions {
                user_answers.push(
                    result
                        .user_answers
                        .get(&question.id)
                        .cloned()
                        .unwrap_or_default(),
                );
                correct_answers.push(question.correct_answer.clone());
            }
            (user_answers, correct_answers)
        }
        None => {
            let mut user_answers = Vec::with_capacity(result.correct_answers.len());
            let mut correct_answers = Vec::with_capacity(result.correct_answers.len());
            for (question_id, correct) in &result.correct_answers {
                user_answers.push(
                    result
                        .user_answers
                        .get(question_id)
                        .cloned()
                        .unwrap_or_default(),
                );
                correct_answers.push(correct.clone());
            }
            (user_answers, correct_answers)
        }
    };

    let summary = state
        .generator
        .summarize_results(
            &api_key,
            &result.quiz_topic,
            &user_answers,
            &correct_answers,
            result.score,
        )
        .await?;

    Ok(Json(SummaryResponse {
        summary,
        score: result.score,
    }))
}

// ─── History ─────────────────────────────────────────────────

/// A quiz joined with its most recent result.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub quiz: Quiz,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_result: Option<QuizResult>,
}

/// Quiz history with last scores. Not available to guests.
async fn get_history(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<HistoryEntry>>> {
    let profile = require_profile(&state, &user).await?;
    if profile.is_guest {
        return Err(AppError::MissingCapability(
            "Guests cannot view history".to_string(),
        ));
    }

    let quizzes = state.quiz_data.list_quizzes(&user.scope).await;
    let mut entries = Vec::with_capacity(quizzes.len());
    for quiz in quizzes {
        let last_result = state
            .quiz_data
            .get_last_quiz_result(&user.scope, &quiz.id)
            .await;
        entries.push(HistoryEntry { quiz, last_result });
    }

    Ok(Json(entries))
}

/// Profile for the caller's scope, or 404 if none is established.
async fn require_profile(state: &Arc<AppState>, user: &AuthUser) -> Result<UserProfile> {
    state
        .sessions
        .current_profile(&user.scope)
        .await
        .ok_or_else(|| AppError::NotFound(format!("No profile for {}", user.email)))
}
