// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile lifecycle: login, signup, guest entry, onboarding, API key
//! management, and logout with its storage cascade.
//!
//! The profile state machine is Unauthenticated -> Authenticated(not
//! onboarded) -> Authenticated(onboarded); onboarding is complete once
//! the profile carries a name. Guest exclusions (manual authoring,
//! history) are capability flags on the profile, not extra states.

use crate::error::AppError;
use crate::models::UserProfile;
use crate::services::IdentityClient;
use crate::store::{slots, LocalStore, QuizDataStore};

/// Profile lifecycle service, cheap to clone.
#[derive(Clone)]
pub struct SessionService {
    store: LocalStore,
    quiz_data: QuizDataStore,
    identity: IdentityClient,
}

/// Scope plus profile for a freshly established session.
#[derive(Debug, Clone)]
pub struct EstablishedSession {
    pub scope: String,
    pub profile: UserProfile,
}

/// Details merged into the profile when onboarding completes.
#[derive(Debug, Clone)]
pub struct OnboardingDetails {
    pub name: String,
    pub profession: Option<String>,
    pub age: Option<u32>,
}

impl SessionService {
    pub fn new(store: LocalStore, quiz_data: QuizDataStore, identity: IdentityClient) -> Self {
        Self {
            store,
            quiz_data,
            identity,
        }
    }

    /// Sign in against the identity provider and establish a profile.
    ///
    /// An existing stored profile for the same email is kept as-is, so a
    /// returning user keeps their onboarding details and API key.
    pub async fn login(&self, email: &str, password: &str) -> Result<EstablishedSession, AppError> {
        let user = self.identity.sign_in(email, password).await?;
        let resolved_email = user.email.unwrap_or_else(|| email.to_string());
        let scope = LocalStore::scope_for_email(&resolved_email);

        let _guard = self.store.lock_scope(&scope).await;

        let stored: Option<UserProfile> = self.store.read_slot(&scope, slots::PROFILE).await;
        let profile = match stored {
            Some(profile) if profile.email == resolved_email => profile,
            _ => {
                let profile = UserProfile {
                    email: resolved_email,
                    name: user.display_name.unwrap_or_default(),
                    profession: None,
                    age: None,
                    api_key: None,
                    is_guest: false,
                };
                self.store.write_slot(&scope, slots::PROFILE, &profile).await?;
                profile
            }
        };

        tracing::info!(email = %profile.email, onboarded = profile.is_onboarded(), "User logged in");
        Ok(EstablishedSession { scope, profile })
    }

    /// Create an account and establish a fresh profile with the given name.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<EstablishedSession, AppError> {
        let user = self.identity.sign_up(email, password).await?;
        let resolved_email = user.email.unwrap_or_else(|| email.to_string());
        let scope = LocalStore::scope_for_email(&resolved_email);

        let profile = UserProfile {
            email: resolved_email,
            name: name.to_string(),
            profession: None,
            age: None,
            api_key: None,
            is_guest: false,
        };

        let _guard = self.store.lock_scope(&scope).await;
        self.store.write_slot(&scope, slots::PROFILE, &profile).await?;

        tracing::info!(email = %profile.email, "User signed up");
        Ok(EstablishedSession { scope, profile })
    }

    /// Enter as a guest via the provider's anonymous sign-in.
    ///
    /// Guests are onboarded by construction but permanently lack the
    /// manual-authoring and history capabilities.
    pub async fn login_as_guest(&self) -> Result<EstablishedSession, AppError> {
        let user = self.identity.sign_in_anonymous().await?;

        let profile = UserProfile {
            email: format!("guest_{}@example.com", user.uid),
            name: "Guest".to_string(),
            profession: None,
            age: None,
            api_key: None,
            is_guest: true,
        };
        let scope = LocalStore::scope_for_email(&profile.email);

        let _guard = self.store.lock_scope(&scope).await;
        self.store.write_slot(&scope, slots::PROFILE, &profile).await?;

        tracing::info!(email = %profile.email, "Guest session established");
        Ok(EstablishedSession { scope, profile })
    }

    /// Profile for the scope, if one is established.
    pub async fn current_profile(&self, scope: &str) -> Option<UserProfile> {
        self.store.read_slot(scope, slots::PROFILE).await
    }

    /// Merge onboarding details into the current profile.
    ///
    /// Returns `None` (a no-op) when the scope has no active profile.
    pub async fn complete_onboarding(
        &self,
        scope: &str,
        details: OnboardingDetails,
    ) -> Result<Option<UserProfile>, AppError> {
        let _guard = self.store.lock_scope(scope).await;

        let Some(mut profile) = self
            .store
            .read_slot::<UserProfile>(scope, slots::PROFILE)
            .await
        else {
            return Ok(None);
        };

        profile.name = details.name;
        profile.profession = details.profession;
        profile.age = details.age;

        self.store.write_slot(scope, slots::PROFILE, &profile).await?;

        tracing::info!(email = %profile.email, "Onboarding completed");
        Ok(Some(profile))
    }

    /// Merge a generator API key into the current profile.
    ///
    /// Returns `None` (a no-op) when the scope has no active profile.
    pub async fn set_api_key(
        &self,
        scope: &str,
        key: &str,
    ) -> Result<Option<UserProfile>, AppError> {
        let _guard = self.store.lock_scope(scope).await;

        let Some(mut profile) = self
            .store
            .read_slot::<UserProfile>(scope, slots::PROFILE)
            .await
        else {
            return Ok(None);
        };

        profile.api_key = Some(key.to_string());
        self.store.write_slot(scope, slots::PROFILE, &profile).await?;

        tracing::info!(email = %profile.email, "Generator API key saved");
        Ok(Some(profile))
    }

    /// Clear the profile and cascade to the quiz and result collections.
    pub async fn logout(&self, scope: &str) -> Result<(), AppError> {
        {
            let _guard = self.store.lock_scope(scope).await;
            self.store.remove_slot(scope, slots::PROFILE).await?;
        }
        self.quiz_data.clear_scope(scope).await?;

        tracing::info!(scope = %scope, "Session cleared");
        Ok(())
    }
}
