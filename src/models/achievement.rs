use serde::Serialize;
use sqlx::PgPool;

use crate::error::GavelResult;

/// A member's aggregate achievement points, summed over every achievement
/// row tied to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct MemberScore {
    /// The id of the member
    pub member: i64,
    /// The member's display name
    pub name: String,
    /// The sum of point values across the member's achievements
    pub score: i64,
}

impl MemberScore {
    /// Every member's score, in member-id order. Members with no
    /// achievements score zero.
    pub async fn all(pool: &PgPool) -> GavelResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT m.id AS member,
                 COALESCE(m.preferred_name, m.first_name) || ' ' || m.last_name AS name,
                 COALESCE(SUM(a.points), 0)::BIGINT AS score
             FROM member m
             LEFT JOIN member_achievement ma ON ma.member = m.id
             LEFT JOIN achievement a ON a.id = ma.achievement
             GROUP BY m.id
             ORDER BY m.id",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
