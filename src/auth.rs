//! Caller identity.
//!
//! Authentication happens upstream; the authenticating proxy forwards the
//! already-validated user id and role in trusted headers.

use std::str::FromStr;

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Admin,
    Instructor,
    Student,
}

impl FromStr for Role {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "instructor" => Ok(Self::Instructor),
            "student" => Ok(Self::Student),
            _ => Err(ApiError::Unauthorized),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AuthUser {
    pub user_id: i64,
    pub role: Role,
}

impl AuthUser {
    /// Staff see everyone; students only see themselves.
    #[must_use]
    pub fn can_access_student(&self, student_id: i64) -> bool {
        match self.role {
            Role::Admin | Role::Instructor => true,
            Role::Student => self.user_id == student_id,
        }
    }

    pub fn require_student_access(&self, student_id: i64) -> Result<(), ApiError> {
        if self.can_access_student(student_id) {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }

    pub fn require_role(&self, allowed: &[Role]) -> Result<(), ApiError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .ok_or(ApiError::Unauthorized)
        };

        let user_id = header(USER_ID_HEADER)?
            .parse::<i64>()
            .map_err(|_| ApiError::Unauthorized)?;

        if user_id <= 0 {
            return Err(ApiError::Unauthorized);
        }

        let role = header(USER_ROLE_HEADER)?.parse()?;

        Ok(Self { user_id, role })
    }
}
