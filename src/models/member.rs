use serde::Serialize;
use sqlx::PgPool;

use crate::error::{GavelError, GavelResult};

/// A chapter member with an account on the site.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Member {
    pub id: i64,
    /// The member's email, which must be unique
    pub email: String,
    /// The member's first name
    pub first_name: String,
    /// The member's nick name
    pub preferred_name: Option<String>,
    /// The member's last name
    pub last_name: String,
    /// Whether the member is still a candidate awaiting initiation
    pub candidate: bool,
}

impl Member {
    /// The member's full name
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.preferred_name.as_deref().unwrap_or(&self.first_name),
            self.last_name
        )
    }

    /// Resolves an API token to the member logged in with it. A token with
    /// no session behind it reads as not logged in.
    pub async fn with_token(token: &str, pool: &PgPool) -> GavelResult<Self> {
        sqlx::query_as::<_, Self>(
            "SELECT m.id, m.email, m.first_name, m.preferred_name, m.last_name, m.candidate
             FROM member m
             INNER JOIN session s ON s.member = m.id
             WHERE s.key = $1",
        )
        .bind(token)
        .fetch_optional(pool)
        .await?
        .ok_or(GavelError::Unauthorized)
    }
}
