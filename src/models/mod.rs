// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod profile;
pub mod quiz;
pub mod result;

pub use profile::UserProfile;
pub use quiz::{Difficulty, NewQuiz, Question, Quiz};
pub use result::{NewQuizResult, QuizResult};
