use axum::extract::{Path, Query};
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::Deserialize;
use sqlx::PgPool;

use crate::directory::PgDirectory;
use crate::error::{GavelError, GavelResult};
use crate::extract::Viewer;
use crate::guards;
use crate::leaderboard::{self, LeaderboardPage};
use crate::models::achievement::MemberScore;
use crate::models::officer::CurrentOfficer;
use crate::models::term::{Season, Term};

pub fn router() -> Router {
    Router::new()
        .route("/terms", get(all_terms))
        .route("/terms/:season/:year", get(term_detail))
        .route("/officers", get(current_officers))
        .route("/leaderboard", get(leaderboard_page))
}

async fn all_terms(
    viewer: Viewer,
    Extension(pool): Extension<PgPool>,
) -> GavelResult<Json<Vec<Term>>> {
    viewer.require()?;

    Term::all(&pool).await.map(Json)
}

async fn term_detail(
    viewer: Viewer,
    Path((season, year)): Path<(String, i32)>,
    Extension(pool): Extension<PgPool>,
) -> GavelResult<Json<Term>> {
    viewer.require()?;

    let season = Season::from_code(&season)
        .ok_or_else(|| GavelError::BadRequest(format!("unknown season code {}", season)))?;

    Term::with_season_and_year(season, year, &pool)
        .await?
        .map(Json)
        .ok_or(GavelError::NotFound)
}

async fn current_officers(
    viewer: Viewer,
    Extension(pool): Extension<PgPool>,
) -> GavelResult<Json<Vec<CurrentOfficer>>> {
    guards::ANY_OFFICER
        .check(viewer.member(), &PgDirectory::new(pool.clone()))
        .await?;

    CurrentOfficer::all(&pool).await.map(Json)
}

#[derive(Deserialize)]
struct PageParams {
    page: Option<usize>,
}

async fn leaderboard_page(
    viewer: Viewer,
    Query(params): Query<PageParams>,
    Extension(pool): Extension<PgPool>,
) -> GavelResult<Json<LeaderboardPage>> {
    viewer.require()?;

    let scores = MemberScore::all(&pool).await?;
    let entries = leaderboard::project(scores);

    leaderboard::paginate(entries, params.page.unwrap_or(1))
        .map(Json)
        .ok_or(GavelError::NotFound)
}
