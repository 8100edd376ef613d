use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::GavelResult;

/// The part of the school year a term covers.
///
/// Terms sort by year first and then by season, in the order the variants
/// are declared here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "season", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// Fall ("fa")
    Fa,
    /// Spring ("sp")
    Sp,
    /// Summer ("su")
    Su,
    /// Winter ("wi")
    Wi,
}

impl Season {
    /// Parses a two-character season code, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "fa" => Some(Season::Fa),
            "sp" => Some(Season::Sp),
            "su" => Some(Season::Su),
            "wi" => Some(Season::Wi),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Season::Fa => "fa",
            Season::Sp => "sp",
            Season::Su => "su",
            Season::Wi => "wi",
        }
    }
}

/// An academic term. At most one term is flagged current at a time, and the
/// pair (season, year) is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Term {
    #[serde(skip)]
    pub id: i64,
    /// The season the term covers
    pub season: Season,
    /// The calendar year of the term
    pub year: i32,
    /// Whether this is the current term
    pub current: bool,
}

impl Term {
    /// The term flagged current, if the chapter has set one.
    pub async fn get_current(pool: &PgPool) -> GavelResult<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT id, season, year, current FROM term WHERE current = true",
        )
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn with_season_and_year(
        season: Season,
        year: i32,
        pool: &PgPool,
    ) -> GavelResult<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT id, season, year, current FROM term WHERE season = $1 AND year = $2",
        )
        .bind(season)
        .bind(year)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// All terms, oldest first.
    pub async fn all(pool: &PgPool) -> GavelResult<Vec<Self>> {
        let mut terms =
            sqlx::query_as::<_, Self>("SELECT id, season, year, current FROM term ORDER BY year")
                .fetch_all(pool)
                .await?;
        terms.sort_by_key(|term| (term.year, term.season));

        Ok(terms)
    }
}
