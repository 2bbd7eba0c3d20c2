use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::Request;
use tracing::{error, warn};

use super::ScoreTime;

#[derive(thiserror::Error, Debug)]
pub enum RequestError {
    #[error("invalid request body: {reason}")]
    InvalidRequest { reason: String },
    #[error("username must not be empty")]
    InvalidUsername,
    #[error("invalid time: {time} (expected a non-negative number of seconds)")]
    InvalidTime { time: ScoreTime },
    #[error("invalid limit: {value:?} (expected a non-negative integer)")]
    InvalidLimit { value: String },
    #[error("storage failure")]
    Storage(#[from] sqlx::Error),
}

impl RequestError {
    pub fn status(&self) -> Status {
        match self {
            Self::Storage(_) => Status::InternalServerError,
            _ => Status::BadRequest,
        }
    }
}

/// JSON body sent with every error response.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl<'r> Responder<'r, 'static> for RequestError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        match &self {
            Self::Storage(source) => {
                error!(uri = %request.uri(), error = %source, "storage request failed")
            }
            other => warn!(uri = %request.uri(), "rejected request: {}", other),
        }

        (status, Json(ErrorBody::new(self.to_string()))).respond_to(request)
    }
}

pub type RequestResult<T, E = RequestError> = std::result::Result<T, E>;
