// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - external collaborator clients.

pub mod generator;
pub mod identity;

pub use generator::GeneratorClient;
pub use identity::{IdentityClient, IdentityUser};
