use serde_json::{json, Value};
use thiserror::Error;
use tide::http::{Method, StatusCode};
use tide::Response;

use super::routes::Resource;
use crate::db;

/// Everything a request can fail with.
///
/// Handlers bubble these up through `tide::Error`; [`render`] turns them
/// into the final status code and JSON body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("no {collection} entry with identifier {id:?}")]
    InvalidIdentifier { collection: &'static str, id: String },

    #[error("unknown field {0:?}")]
    UnknownField(String),

    #[error("malformed request body: {0}")]
    BadPayload(String),

    #[error("invalid credentials")]
    Unauthorized,

    #[error("method {method} is not allowed on {path}")]
    MethodNotAllowed {
        method: Method,
        path: String,
        allowed: &'static [Method],
    },

    #[error("storage failure: {0}")]
    Internal(#[from] db::Error),
}

impl ApiError {
    pub fn invalid_identifier(resource: Resource, id: &str) -> Self {
        ApiError::InvalidIdentifier {
            collection: resource.collection(),
            id: id.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidIdentifier { .. } => StatusCode::BadRequest,
            ApiError::UnknownField(_) => StatusCode::BadRequest,
            ApiError::BadPayload(_) => StatusCode::BadRequest,
            ApiError::Unauthorized => StatusCode::Unauthorized,
            ApiError::MethodNotAllowed { .. } => StatusCode::MethodNotAllowed,
            ApiError::Internal(_) => StatusCode::InternalServerError,
        }
    }

    /// Value of the `Allow` header for 405 responses.
    pub fn allow(&self) -> Option<String> {
        match self {
            ApiError::MethodNotAllowed { allowed, .. } => Some(
                allowed
                    .iter()
                    .map(|method| method.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            _ => None,
        }
    }

    pub fn body(&self) -> Value {
        json!({ "error": self.to_string() })
    }
}

/// Response post-processor giving API errors their status, body and headers.
pub(in crate::web) async fn render(mut res: Response) -> tide::Result {
    let rendered = res
        .downcast_error::<ApiError>()
        .map(|err| (err.status(), err.body(), err.allow()));

    if let Some((status, body, allow)) = rendered {
        if status.is_server_error() {
            tracing::error!(error = %body["error"], "Request failed");
        } else {
            tracing::debug!(%status, error = %body["error"], "Request rejected");
        }

        res.set_status(status);
        res.set_body(body);
        if let Some(allow) = allow {
            res.insert_header("Allow", allow);
        }
    }

    Ok(res)
}
