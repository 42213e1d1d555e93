// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile model for storage and API.

use serde::{Deserialize, Serialize};

/// Locally persisted identity/settings record for the active user.
///
/// Created at login, mutated by onboarding and api-key saves, destroyed
/// at logout (which cascades to clearing the scope's quiz and result
/// collections).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Text generator API key; gates quiz generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Guests are denied manual quiz creation and history
    #[serde(default)]
    pub is_guest: bool,
}

impl UserProfile {
    /// Onboarding is complete once the profile carries a name.
    pub fn is_onboarded(&self) -> bool {
        !self.name.is_empty()
    }

    /// Whether the profile holds a usable generator API key.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}
