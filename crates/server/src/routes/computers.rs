use axum::{
    extract::{Path, State},
    Extension, Json,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use service::auth::token::Claims;
use service::computer::domain::{Computer, NewComputer};

use crate::errors::JsonApiError;
use crate::startup::ServerState;

#[derive(Debug, Deserialize)]
pub struct AddComputerInput {
    pub os: String,
    pub cpu: String,
    pub ram: i32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ReservationOutput {
    pub id: Uuid,
    pub reserved: bool,
}

#[utoipa::path(
    post, path = "/api/computers", tag = "computers",
    request_body = crate::openapi::AddComputerInputDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    WithRejection(Json(input), _): WithRejection<Json<AddComputerInput>, JsonApiError>,
) -> Result<Json<Computer>, JsonApiError> {
    let c = state
        .services
        .computers
        .add_computer(NewComputer { os: input.os, cpu: input.cpu, ram: input.ram })
        .await?;
    info!(id = %c.id, by = %claims.uid, "created computer");
    Ok(Json(c))
}

#[utoipa::path(
    get, path = "/api/computers", tag = "computers",
    responses((status = 200, description = "List OK"), (status = 401, description = "Unauthorized"))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Computer>>, JsonApiError> {
    Ok(Json(state.services.computers.get_all_computers().await?))
}

#[utoipa::path(
    get, path = "/api/computers/{id}", tag = "computers",
    params(("id" = Uuid, Path, description = "Computer ID")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, WithRejection(Path(id), _): WithRejection<Path<Uuid>, JsonApiError>) -> Result<Json<Computer>, JsonApiError> {
    Ok(Json(state.services.computers.get_computer(id).await?))
}

#[utoipa::path(
    post, path = "/api/computers/{id}/reserve", tag = "computers",
    params(("id" = Uuid, Path, description = "Computer ID")),
    responses(
        (status = 200, description = "Reserved"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Already Reserved")
    )
)]
pub async fn reserve(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, JsonApiError>,
) -> Result<Json<ReservationOutput>, JsonApiError> {
    state.services.computers.reserve_computer(id).await?;
    info!(id = %id, by = %claims.uid, "reserved computer");
    Ok(Json(ReservationOutput { id, reserved: true }))
}

#[utoipa::path(
    post, path = "/api/computers/{id}/relieve", tag = "computers",
    params(("id" = Uuid, Path, description = "Computer ID")),
    responses((status = 200, description = "Relieved"), (status = 404, description = "Not Found"))
)]
pub async fn relieve(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, JsonApiError>,
) -> Result<Json<ReservationOutput>, JsonApiError> {
    state.services.computers.relieve_computer(id).await?;
    info!(id = %id, by = %claims.uid, "relieved computer");
    Ok(Json(ReservationOutput { id, reserved: false }))
}
