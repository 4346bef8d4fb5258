//! # Team Data Transfer Objects

use domain::{Team, TeamMember};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A team member on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TeamMemberPayload {
    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id:   String,
    #[validate(length(min = 1, message = "username is required"))]
    pub username:  String,
    pub is_active: bool,
}

impl From<TeamMember> for TeamMemberPayload {
    fn from(member: TeamMember) -> Self {
        Self {
            user_id:   member.user_id,
            username:  member.username,
            is_active: member.is_active,
        }
    }
}

impl From<TeamMemberPayload> for TeamMember {
    fn from(payload: TeamMemberPayload) -> Self {
        Self {
            user_id:   payload.user_id,
            username:  payload.username,
            is_active: payload.is_active,
        }
    }
}

/// Request to create a team with its members
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = 255, message = "team_name must be between 1 and 255 characters"))]
    pub team_name: String,
    #[validate(nested)]
    pub members:   Vec<TeamMemberPayload>,
}

impl From<CreateTeamRequest> for Team {
    fn from(req: CreateTeamRequest) -> Self {
        Self {
            name:    req.team_name,
            members: req.members.into_iter().map(TeamMember::from).collect(),
        }
    }
}

/// Wire shape of a team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPayload {
    pub team_name: String,
    pub members:   Vec<TeamMemberPayload>,
}

impl From<Team> for TeamPayload {
    fn from(team: Team) -> Self {
        Self {
            team_name: team.name,
            members:   team.members.into_iter().map(TeamMemberPayload::from).collect(),
        }
    }
}

/// Response carrying a created team
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateTeamResponse {
    pub team: TeamPayload,
}

/// Query parameters for team lookup
#[derive(Debug, Clone, Deserialize)]
pub struct GetTeamQuery {
    pub team_name: String,
}

/// Response for a team-wide deactivation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeactivateTeamResponse {
    pub deactivated_count: usize,
}
