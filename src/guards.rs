//! Officer-position checks wrapped around request handlers.
//!
//! A guard is built once with the position short-names it cares about and
//! then consulted per request. Checks resolve to one of three outcomes:
//! admitted, [login required](crate::error::GavelError::Unauthorized), or
//! [forbidden](crate::error::GavelError::Forbidden).

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::directory::{OfficerDirectory, TermRegistry};
use crate::error::{GavelError, GavelResult};
use crate::models::member::Member;

/// The alias short-name for the executive board. Never a stored position;
/// it expands to [`EXEC_POSITIONS`] when a guard is built.
pub const EXECS: &str = "execs";

/// The positions the `execs` alias stands for.
pub const EXEC_POSITIONS: [&str; 5] = ["president", "vp", "rsec", "csec", "treasurer"];

/// Admits members based on the officer positions they hold.
///
/// With an empty position set, any officer qualifies. With `exclude` set,
/// the match is inverted: officers holding none of the named positions are
/// admitted instead. With `current` set, only appointments in the current
/// term count, for both the position match and the is-an-officer check.
pub struct OfficerGuard {
    positions: HashSet<String>,
    exclude: bool,
    current: bool,
}

impl OfficerGuard {
    pub fn new(positions: &[&str], exclude: bool, current: bool) -> Self {
        let positions = positions
            .iter()
            .map(|name| name.to_lowercase())
            .flat_map(|name| {
                if name == EXECS {
                    EXEC_POSITIONS.iter().map(|exec| exec.to_string()).collect()
                } else {
                    vec![name]
                }
            })
            .collect();

        Self {
            positions,
            exclude,
            current,
        }
    }

    /// Resolves the guard for one request. Lookup failures propagate as
    /// errors rather than admitting anyone.
    pub async fn check<D>(&self, viewer: Option<&Member>, directory: &D) -> GavelResult<()>
    where
        D: TermRegistry + OfficerDirectory,
    {
        let member = viewer.ok_or(GavelError::Unauthorized)?;

        if !directory.is_officer(member, self.current).await? {
            return Err(GavelError::Forbidden(self.required_positions()));
        }

        if self.positions.is_empty() {
            return Ok(());
        }

        let held = if self.current {
            // No current term flagged means no current positions held.
            match directory.current_term().await? {
                Some(term) => directory.positions_for(member, Some(&term)).await?,
                None => Vec::new(),
            }
        } else {
            directory.positions_for(member, None).await?
        };

        let matched = held
            .iter()
            .any(|position| self.positions.contains(&position.short_name.to_lowercase()));

        if matched != self.exclude {
            Ok(())
        } else {
            Err(GavelError::Forbidden(self.required_positions()))
        }
    }

    fn required_positions(&self) -> Option<String> {
        if self.exclude || self.positions.is_empty() {
            return None;
        }

        let mut positions: Vec<&str> = self.positions.iter().map(String::as_str).collect();
        positions.sort_unstable();

        Some(positions.join(", "))
    }
}

/// Admits members still in the candidacy process.
pub struct CandidateGuard;

impl CandidateGuard {
    pub async fn check<D>(&self, viewer: Option<&Member>, directory: &D) -> GavelResult<()>
    where
        D: OfficerDirectory,
    {
        let member = viewer.ok_or(GavelError::Unauthorized)?;

        if directory.is_candidate(member).await? {
            Ok(())
        } else {
            Err(GavelError::Forbidden(None))
        }
    }
}

pub static ANY_OFFICER: LazyLock<OfficerGuard> =
    LazyLock::new(|| OfficerGuard::new(&[], false, false));
pub static ANY_CURRENT_OFFICER: LazyLock<OfficerGuard> =
    LazyLock::new(|| OfficerGuard::new(&[], false, true));
pub static CURRENT_NON_ADVISOR: LazyLock<OfficerGuard> =
    LazyLock::new(|| OfficerGuard::new(&["advisor", "faculty"], true, true));
pub static PRESIDENT: LazyLock<OfficerGuard> =
    LazyLock::new(|| OfficerGuard::new(&["president"], false, false));
pub static EXECS_ONLY: LazyLock<OfficerGuard> =
    LazyLock::new(|| OfficerGuard::new(&[EXECS], false, false));
pub static IT: LazyLock<OfficerGuard> = LazyLock::new(|| OfficerGuard::new(&["it"], false, false));
pub static EXECS_OR_IT: LazyLock<OfficerGuard> =
    LazyLock::new(|| OfficerGuard::new(&[EXECS, "it"], false, false));
pub static PRESIDENT_OR_IT: LazyLock<OfficerGuard> =
    LazyLock::new(|| OfficerGuard::new(&["president", "it"], false, false));
pub static VP_OR_IT: LazyLock<OfficerGuard> =
    LazyLock::new(|| OfficerGuard::new(&["vp", "it"], false, false));
pub static CANDIDATE: LazyLock<CandidateGuard> = LazyLock::new(|| CandidateGuard);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::term::Season;
    use crate::tests::mock::{mock_member, mock_position, mock_term, MockChapter};

    const PAST_TERM: i64 = 1;
    const CURRENT_TERM: i64 = 2;

    fn chapter() -> MockChapter {
        let mut chapter = MockChapter::default();
        chapter.add_term(mock_term(PAST_TERM, Season::Fa, 2019, false));
        chapter.add_term(mock_term(CURRENT_TERM, Season::Sp, 2020, true));

        chapter
    }

    fn forbidden(result: &GavelResult<()>) -> bool {
        matches!(result, Err(GavelError::Forbidden(_)))
    }

    #[tokio::test]
    async fn unauthenticated_viewers_must_log_in() {
        let chapter = chapter();
        let guards = [
            &*ANY_OFFICER,
            &*ANY_CURRENT_OFFICER,
            &*CURRENT_NON_ADVISOR,
            &*PRESIDENT,
            &*EXECS_ONLY,
            &*IT,
            &*EXECS_OR_IT,
            &*PRESIDENT_OR_IT,
            &*VP_OR_IT,
        ];

        for guard in guards {
            let result = guard.check(None, &chapter).await;
            assert!(matches!(result, Err(GavelError::Unauthorized)));
        }

        let result = CANDIDATE.check(None, &chapter).await;
        assert!(matches!(result, Err(GavelError::Unauthorized)));
    }

    #[tokio::test]
    async fn non_officers_are_forbidden_even_by_exclusion_guards() {
        let chapter = chapter();
        let member = mock_member(1);

        assert!(forbidden(&ANY_OFFICER.check(Some(&member), &chapter).await));
        assert!(forbidden(
            &CURRENT_NON_ADVISOR.check(Some(&member), &chapter).await
        ));
    }

    #[tokio::test]
    async fn any_officer_admits_past_officers_but_current_does_not() {
        let mut chapter = chapter();
        let member = mock_member(1);
        chapter.appoint(&member, mock_position(1, "historian"), PAST_TERM);

        assert!(ANY_OFFICER.check(Some(&member), &chapter).await.is_ok());
        assert!(forbidden(
            &ANY_CURRENT_OFFICER.check(Some(&member), &chapter).await
        ));
    }

    #[tokio::test]
    async fn past_vp_is_not_a_president() {
        let mut chapter = chapter();
        let member = mock_member(1);
        chapter.appoint(&member, mock_position(2, "vp"), PAST_TERM);

        assert!(forbidden(&PRESIDENT.check(Some(&member), &chapter).await));
        assert!(VP_OR_IT.check(Some(&member), &chapter).await.is_ok());
    }

    #[tokio::test]
    async fn exclusion_rejects_any_match_and_admits_the_rest() {
        let mut chapter = chapter();
        let advisor = mock_member(1);
        chapter.appoint(&advisor, mock_position(9, "advisor"), CURRENT_TERM);

        let advisor_with_it = mock_member(2);
        chapter.appoint(&advisor_with_it, mock_position(9, "advisor"), CURRENT_TERM);
        chapter.appoint(&advisor_with_it, mock_position(5, "it"), CURRENT_TERM);

        let treasurer = mock_member(3);
        chapter.appoint(&treasurer, mock_position(4, "treasurer"), CURRENT_TERM);

        assert!(forbidden(
            &CURRENT_NON_ADVISOR.check(Some(&advisor), &chapter).await
        ));
        assert!(forbidden(
            &CURRENT_NON_ADVISOR
                .check(Some(&advisor_with_it), &chapter)
                .await
        ));
        assert!(CURRENT_NON_ADVISOR
            .check(Some(&treasurer), &chapter)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn exclusion_is_the_complement_for_officers() {
        let mut chapter = chapter();
        let advisor = mock_member(1);
        chapter.appoint(&advisor, mock_position(9, "advisor"), CURRENT_TERM);
        let historian = mock_member(2);
        chapter.appoint(&historian, mock_position(7, "historian"), CURRENT_TERM);

        let including = OfficerGuard::new(&["advisor"], false, true);
        let excluding = OfficerGuard::new(&["advisor"], true, true);

        for member in [&advisor, &historian] {
            let included = including.check(Some(member), &chapter).await.is_ok();
            let excluded = excluding.check(Some(member), &chapter).await.is_ok();
            assert_ne!(included, excluded);
        }
    }

    #[tokio::test]
    async fn any_current_officer_admits_a_current_treasurer() {
        let mut chapter = chapter();
        let member = mock_member(1);
        chapter.appoint(&member, mock_position(4, "treasurer"), CURRENT_TERM);

        assert!(ANY_CURRENT_OFFICER
            .check(Some(&member), &chapter)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn execs_alias_covers_the_executive_board() {
        let mut chapter = chapter();
        let rsec = mock_member(1);
        chapter.appoint(&rsec, mock_position(3, "rsec"), PAST_TERM);
        let historian = mock_member(2);
        chapter.appoint(&historian, mock_position(7, "historian"), PAST_TERM);

        assert!(EXECS_ONLY.check(Some(&rsec), &chapter).await.is_ok());
        assert!(forbidden(&EXECS_ONLY.check(Some(&historian), &chapter).await));
    }

    #[tokio::test]
    async fn alias_and_extra_positions_union() {
        let mut chapter = chapter();
        let treasurer = mock_member(1);
        chapter.appoint(&treasurer, mock_position(4, "treasurer"), PAST_TERM);
        let it = mock_member(2);
        chapter.appoint(&it, mock_position(5, "it"), PAST_TERM);
        let historian = mock_member(3);
        chapter.appoint(&historian, mock_position(7, "historian"), PAST_TERM);

        assert!(EXECS_OR_IT.check(Some(&treasurer), &chapter).await.is_ok());
        assert!(EXECS_OR_IT.check(Some(&it), &chapter).await.is_ok());
        assert!(forbidden(&EXECS_OR_IT.check(Some(&historian), &chapter).await));
    }

    #[tokio::test]
    async fn position_names_match_case_insensitively() {
        let mut chapter = chapter();
        let member = mock_member(1);
        chapter.appoint(&member, mock_position(1, "President"), PAST_TERM);

        assert!(PRESIDENT.check(Some(&member), &chapter).await.is_ok());
        assert!(OfficerGuard::new(&["PRESIDENT"], false, false)
            .check(Some(&member), &chapter)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn no_current_term_means_no_current_positions() {
        let mut chapter = MockChapter::default();
        chapter.add_term(mock_term(PAST_TERM, Season::Fa, 2019, false));
        let member = mock_member(1);
        chapter.appoint(&member, mock_position(1, "president"), PAST_TERM);

        assert!(forbidden(
            &ANY_CURRENT_OFFICER.check(Some(&member), &chapter).await
        ));
        let current_president = OfficerGuard::new(&["president"], false, true);
        assert!(forbidden(
            &current_president.check(Some(&member), &chapter).await
        ));
        assert!(PRESIDENT.check(Some(&member), &chapter).await.is_ok());
    }

    #[tokio::test]
    async fn checks_are_idempotent() {
        let mut chapter = chapter();
        let member = mock_member(1);
        chapter.appoint(&member, mock_position(2, "vp"), CURRENT_TERM);

        for guard in [&*PRESIDENT, &*VP_OR_IT, &*ANY_CURRENT_OFFICER] {
            let first = guard.check(Some(&member), &chapter).await.is_ok();
            let second = guard.check(Some(&member), &chapter).await.is_ok();
            assert_eq!(first, second);
        }
    }

    #[tokio::test]
    async fn candidate_guard_checks_the_flag_not_offices() {
        let mut chapter = chapter();
        let outsider = mock_member(1);
        let candidate = mock_member(2);
        chapter.make_candidate(&candidate);

        assert!(forbidden(&CANDIDATE.check(Some(&outsider), &chapter).await));
        assert!(CANDIDATE.check(Some(&candidate), &chapter).await.is_ok());
    }
}
