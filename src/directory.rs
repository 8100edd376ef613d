//! The term and officer lookups the guards run against.
//!
//! Guards never query the database themselves; they consult these traits so
//! that the decision logic stays independent of how appointments are stored.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::GavelResult;
use crate::models::member::Member;
use crate::models::officer::{OfficerAppointment, OfficerPosition};
use crate::models::term::{Season, Term};

/// Resolves academic terms, in particular the one flagged current.
#[async_trait]
pub trait TermRegistry: Sync {
    /// The current term, or `None` if the chapter hasn't set one.
    async fn current_term(&self) -> GavelResult<Option<Term>>;

    async fn term(&self, season: Season, year: i32) -> GavelResult<Option<Term>>;

    /// All terms, ordered by (year, season).
    async fn terms(&self) -> GavelResult<Vec<Term>>;
}

/// Answers role questions about a member.
#[async_trait]
pub trait OfficerDirectory: Sync {
    /// Whether the member has held any office at all, or holds one in the
    /// current term when `current_only` is set.
    async fn is_officer(&self, member: &Member, current_only: bool) -> GavelResult<bool>;

    /// The positions the member holds, restricted to one term when `term`
    /// is given and across all terms otherwise.
    async fn positions_for(
        &self,
        member: &Member,
        term: Option<&Term>,
    ) -> GavelResult<Vec<OfficerPosition>>;

    async fn is_candidate(&self, member: &Member) -> GavelResult<bool>;
}

/// The production directory, backed by the chapter database.
#[derive(Clone)]
pub struct PgDirectory {
    pool: PgPool,
}

impl PgDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TermRegistry for PgDirectory {
    async fn current_term(&self) -> GavelResult<Option<Term>> {
        Term::get_current(&self.pool).await
    }

    async fn term(&self, season: Season, year: i32) -> GavelResult<Option<Term>> {
        Term::with_season_and_year(season, year, &self.pool).await
    }

    async fn terms(&self) -> GavelResult<Vec<Term>> {
        Term::all(&self.pool).await
    }
}

#[async_trait]
impl OfficerDirectory for PgDirectory {
    async fn is_officer(&self, member: &Member, current_only: bool) -> GavelResult<bool> {
        OfficerAppointment::exists_for_member(member.id, current_only, &self.pool).await
    }

    async fn positions_for(
        &self,
        member: &Member,
        term: Option<&Term>,
    ) -> GavelResult<Vec<OfficerPosition>> {
        OfficerPosition::for_member(member.id, term.map(|term| term.id), &self.pool).await
    }

    async fn is_candidate(&self, member: &Member) -> GavelResult<bool> {
        Ok(member.candidate)
    }
}
