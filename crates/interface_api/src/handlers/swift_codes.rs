//! SWIFT code handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::dto::swift_codes::*;
use crate::{error::ApiError, AppState};

/// Gets a headquarters with its branches, or a single branch
pub async fn get_swift_code(
    State(state): State<AppState>,
    Path(swift_code): Path<String>,
) -> Result<Json<SwiftCodeResponse>, ApiError> {
    let lookup = state.service.fetch_by_code(&swift_code).await?;
    Ok(Json(lookup.into()))
}

/// Lists every code registered in a country
pub async fn get_country_swift_codes(
    State(state): State<AppState>,
    Path(country_iso2): Path<String>,
) -> Result<Json<CountrySwiftCodesResponse>, ApiError> {
    let lookup = state.service.fetch_by_country(&country_iso2).await?;
    Ok(Json(lookup.into()))
}

/// Creates a new code
pub async fn create_swift_code(
    State(state): State<AppState>,
    payload: Result<Json<CreateSwiftCodeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(request) = payload?;
    let confirmation = state.service.create(request.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: confirmation.message,
        }),
    ))
}

/// Deletes a code
pub async fn delete_swift_code(
    State(state): State<AppState>,
    Path(swift_code): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let confirmation = state.service.delete(&swift_code).await?;
    Ok(Json(MessageResponse {
        message: confirmation.message,
    }))
}
