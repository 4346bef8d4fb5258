//! # Team Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::Team;
use error::Result;

use crate::{
    dto::teams::{
        CreateTeamRequest,
        CreateTeamResponse,
        DeactivateTeamResponse,
        GetTeamQuery,
        TeamPayload,
    },
    handlers::validated,
    AppState,
};

/// Create a team and register its members
pub async fn create_team_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<CreateTeamResponse>)> {
    let req = validated(req)?;

    let team = state.service.create_team(Team::from(req)).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateTeamResponse {
            team: team.into(),
        }),
    ))
}

/// Get a team by name
pub async fn get_team_handler(
    State(state): State<AppState>,
    Query(query): Query<GetTeamQuery>,
) -> Result<Json<TeamPayload>> {
    let team = state.service.get_team(query.team_name).await?;
    Ok(Json(team.into()))
}

/// Deactivate every member of a team
pub async fn deactivate_team_handler(
    State(state): State<AppState>,
    Path(team_name): Path<String>,
) -> Result<Json<DeactivateTeamResponse>> {
    let deactivated_count = state.service.deactivate_team(team_name).await?;

    Ok(Json(DeactivateTeamResponse {
        deactivated_count,
    }))
}
