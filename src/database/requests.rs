use rocket::http::Status;
use rocket::serde::json::{self, Json};
use rocket::{get, post, State};
use tracing::debug;

use crate::leaderboard::Leaderboard;

use super::*;

/// Number of scores returned when the `limit` query parameter is absent.
pub const DEFAULT_LIMIT: u64 = 100;

#[get("/")]
pub fn index() -> &'static str {
    "This is an online highscore server!"
}

/// Stores a completion time for the level `level`.
/// Responds with the stored score, including the date assigned by the server.
#[post("/<level>/scores", data = "<request>")]
pub async fn create_score(
    level: &str,
    request: Result<Json<ScoreCreateRequest>, json::Error<'_>>,
    store: &State<ScoreStore>,
) -> RequestResult<(Status, Json<Score>)> {
    let request = request.map_err(invalid_body)?.into_inner();
    validate(&request)?;

    let score = store.insert_score(level, &request).await?;
    Ok((Status::Created, Json(score)))
}

/// Fetches the best times for the level `level`, fastest first.
#[get("/<level>/scores?<limit>")]
pub async fn list_scores(
    level: &str,
    limit: Option<&str>,
    store: &State<ScoreStore>,
) -> RequestResult<Json<Leaderboard>> {
    let limit = parse_limit(limit)?;

    let leaderboard = Leaderboard::new(store.list_scores(level, limit).await?);
    debug!(level = %level, limit, count = leaderboard.len(), "listed scores");
    Ok(Json(leaderboard))
}

fn invalid_body(error: json::Error<'_>) -> RequestError {
    let reason = match error {
        json::Error::Io(error) => error.to_string(),
        json::Error::Parse(_, error) => error.to_string(),
    };
    RequestError::InvalidRequest { reason }
}

fn validate(request: &ScoreCreateRequest) -> RequestResult<()> {
    if request.username.trim().is_empty() {
        return Err(RequestError::InvalidUsername);
    }
    if !request.time.is_finite() || request.time < 0.0 {
        return Err(RequestError::InvalidTime { time: request.time });
    }
    Ok(())
}

/// Accepts decimal digits only. Values too large for `u64` mean "no limit".
fn parse_limit(limit: Option<&str>) -> RequestResult<u64> {
    let value = match limit {
        None => return Ok(DEFAULT_LIMIT),
        Some(value) => value,
    };
    if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(RequestError::InvalidLimit {
            value: value.to_owned(),
        });
    }
    Ok(value.parse().unwrap_or(u64::MAX))
}
