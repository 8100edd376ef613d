use async_trait::async_trait;
use axum::extract::{FromRequest, RequestParts};
use axum::Extension;
use sqlx::PgPool;

use crate::error::{GavelError, GavelResult};
use crate::models::member::Member;

/// The header the frontend sends its API token in.
pub const GAVEL_TOKEN: &str = "GAVEL_TOKEN";

/// Whoever is making the request: a logged-in member or nobody.
///
/// Handlers that require a login call [`require`](Viewer::require); guards
/// take [`member`](Viewer::member) and decide for themselves.
pub struct Viewer(Option<Member>);

impl Viewer {
    pub fn member(&self) -> Option<&Member> {
        self.0.as_ref()
    }

    pub fn require(&self) -> GavelResult<&Member> {
        self.0.as_ref().ok_or(GavelError::Unauthorized)
    }
}

#[async_trait]
impl<B: Send> FromRequest<B> for Viewer {
    type Rejection = GavelError;

    async fn from_request(req: &mut RequestParts<B>) -> Result<Self, Self::Rejection> {
        let token = req
            .headers()
            .get(GAVEL_TOKEN)
            .map(|value| value.to_str())
            .transpose()
            .map_err(|_| GavelError::BadRequest("token header is not valid text".to_owned()))?
            .map(str::to_owned);

        let member = match token {
            Some(token) => {
                let Extension(pool) = Extension::<PgPool>::from_request(req)
                    .await
                    .map_err(|err| GavelError::ServerError(err.to_string()))?;

                let member = Member::with_token(&token, &pool).await?;
                tracing::debug!("request from {}", member.full_name());

                Some(member)
            }
            None => None,
        };

        Ok(Viewer(member))
    }
}
