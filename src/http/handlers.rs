//! Public API handlers.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::reservation::NameRejection;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReservedList {
    pub count: usize,
    pub names: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NameCheck {
    pub name: String,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/reserved`: every name currently reserved, sorted.
pub async fn list_reserved(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match state.collector.compute_reserved() {
        Ok(reserved) => {
            metrics::record_request("reserved", 200);
            Json(ReservedList {
                count: reserved.len(),
                names: reserved.into_iter().collect(),
            })
            .into_response()
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id(&headers),
                error = %e,
                "Cannot list reserved names"
            );
            metrics::record_request("reserved", 500);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// `GET /api/names/{name}`: whether `name` may be used for a new account.
pub async fn check_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Response {
    let (status, check) = match state.validator.validate(&name) {
        Ok(()) => (
            StatusCode::OK,
            NameCheck {
                name,
                available: true,
                code: None,
                reason: None,
            },
        ),
        Err(rejection) => {
            let status = match rejection {
                NameRejection::Unavailable(_) => {
                    tracing::warn!(
                        request_id = %request_id(&headers),
                        name = %name,
                        error = %rejection,
                        "Name check refused"
                    );
                    StatusCode::SERVICE_UNAVAILABLE
                }
                _ => StatusCode::OK,
            };
            (
                status,
                NameCheck {
                    name,
                    available: false,
                    code: Some(rejection.code().to_string()),
                    reason: Some(rejection.to_string()),
                },
            )
        }
    };

    metrics::record_request("names", status.as_u16());
    (status, Json(check)).into_response()
}
