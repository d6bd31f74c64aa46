//! Capability guard for staff-only routes.
//!
//! Two independent checks: the bearer token must be known (authenticated,
//! otherwise 401) and its holder must belong to the `Staff` group (otherwise
//! 403). Handlers opt in by taking a [`StaffUser`] argument.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{error::AppError, state::AppState};

pub const STAFF_GROUP: &str = "Staff";

#[derive(Debug, Clone)]
pub struct StaffUser {
    pub groups: Vec<String>,
}

impl FromRequestParts<Arc<AppState>> for StaffUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;

        let groups = state
            .config
            .staff_tokens
            .get(token)
            .ok_or(AppError::Unauthorized)?;

        if !groups.iter().any(|g| g == STAFF_GROUP) {
            return Err(AppError::Forbidden);
        }

        Ok(StaffUser {
            groups: groups.clone(),
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
