use serde::Serialize;
use sqlx::PgPool;

use crate::error::GavelResult;

/// A named office members can be appointed to, identified by its short name
/// (e.g. "president", "it"). Short names match case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct OfficerPosition {
    #[serde(skip)]
    pub id: i64,
    /// The short name the position is referred to by in code and URLs
    pub short_name: String,
    /// The position's display name
    pub name: String,
    /// Used for ordering positions (e.g. President before Historian)
    pub rank: i32,
    /// Whether the position sits on the executive board
    pub executive: bool,
    /// Whether the position is an auxiliary (non-voting) one
    pub auxiliary: bool,
}

impl OfficerPosition {
    pub async fn all(pool: &PgPool) -> GavelResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT id, short_name, name, rank, executive, auxiliary
             FROM officer_position ORDER BY rank",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// The positions the member has been appointed to, restricted to one
    /// term when `term` is given and across all terms otherwise.
    pub async fn for_member(
        member: i64,
        term: Option<i64>,
        pool: &PgPool,
    ) -> GavelResult<Vec<Self>> {
        let positions = if let Some(term) = term {
            sqlx::query_as::<_, Self>(
                "SELECT DISTINCT p.id, p.short_name, p.name, p.rank, p.executive, p.auxiliary
                 FROM officer_position p
                 INNER JOIN officer_appointment a ON a.position = p.id
                 WHERE a.member = $1 AND a.term = $2
                 ORDER BY p.rank",
            )
            .bind(member)
            .bind(term)
            .fetch_all(pool)
            .await?
        } else {
            sqlx::query_as::<_, Self>(
                "SELECT DISTINCT p.id, p.short_name, p.name, p.rank, p.executive, p.auxiliary
                 FROM officer_position p
                 INNER JOIN officer_appointment a ON a.position = p.id
                 WHERE a.member = $1
                 ORDER BY p.rank",
            )
            .bind(member)
            .fetch_all(pool)
            .await?
        };

        Ok(positions)
    }
}

/// One member holding one position for one term. The triple
/// (member, position, term) is unique.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OfficerAppointment {
    pub id: i64,
    pub member: i64,
    pub position: i64,
    pub term: i64,
    pub is_chair: bool,
}

impl OfficerAppointment {
    /// Whether the member has held any office, or holds one in the current
    /// term when `current_only` is set. With no current term flagged, the
    /// current-only check finds nothing.
    pub async fn exists_for_member(
        member: i64,
        current_only: bool,
        pool: &PgPool,
    ) -> GavelResult<bool> {
        let exists = if current_only {
            sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS (
                     SELECT 1 FROM officer_appointment a
                     INNER JOIN term t ON a.term = t.id
                     WHERE a.member = $1 AND t.current = true
                 )",
            )
            .bind(member)
            .fetch_one(pool)
            .await?
        } else {
            sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS (SELECT 1 FROM officer_appointment WHERE member = $1)",
            )
            .bind(member)
            .fetch_one(pool)
            .await?
        };

        Ok(exists)
    }
}

/// A row of the current term's officer roster.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CurrentOfficer {
    /// The display name of the position held
    pub position: String,
    /// The display name of the member holding it
    pub member: String,
    /// Whether the member chairs the position
    pub is_chair: bool,
}

impl CurrentOfficer {
    /// The roster for the current term, ordered by position rank. Empty
    /// when no term is flagged current.
    pub async fn all(pool: &PgPool) -> GavelResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT p.name AS position,
                 COALESCE(m.preferred_name, m.first_name) || ' ' || m.last_name AS member,
                 a.is_chair
             FROM officer_appointment a
             INNER JOIN officer_position p ON a.position = p.id
             INNER JOIN member m ON a.member = m.id
             INNER JOIN term t ON a.term = t.id
             WHERE t.current = true
             ORDER BY p.rank, m.last_name",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
