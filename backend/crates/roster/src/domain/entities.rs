//! Domain Entities
//!
//! Records served by the `/api/*` collections. Fields the client does not
//! model are kept in `extra` so an update can send them back untouched.

use kernel::id::{EventId, Id, PlayerId, RecruitId, ReportId, TeamId, markers};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::resource::Resource;

/// Rostered player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub jersey_number: Option<u32>,
    #[serde(default)]
    pub team_id: Option<TeamId>,
    #[serde(default)]
    pub graduation_year: Option<i32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Resource for Player {
    type Marker = markers::Player;
    const COLLECTION: &'static str = "/api/players";
    const NAME: &'static str = "player";

    fn id(&self) -> Id<markers::Player> {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource for Team {
    type Marker = markers::Team;
    const COLLECTION: &'static str = "/api/teams";
    const NAME: &'static str = "team";

    fn id(&self) -> Id<markers::Team> {
        self.id
    }
}

/// Prospect tracked by the scouting staff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recruit {
    pub id: RecruitId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub graduation_year: Option<i32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource for Recruit {
    type Marker = markers::Recruit;
    const COLLECTION: &'static str = "/api/recruits";
    const NAME: &'static str = "recruit";

    fn id(&self) -> Id<markers::Recruit> {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoutingReport {
    pub id: ReportId,
    #[serde(default)]
    pub player_id: Option<PlayerId>,
    #[serde(default)]
    pub recruit_id: Option<RecruitId>,
    #[serde(default)]
    pub opponent: Option<String>,
    #[serde(default)]
    pub grade: Option<f64>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource for ScoutingReport {
    type Marker = markers::Report;
    const COLLECTION: &'static str = "/api/reports";
    const NAME: &'static str = "report";

    fn id(&self) -> Id<markers::Report> {
        self.id
    }
}

/// Game, practice or other calendar entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub event_type: Option<String>,
    /// ISO-8601 timestamp as sent by the backend
    #[serde(default)]
    pub starts_at: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub team_id: Option<TeamId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource for ScheduleEvent {
    type Marker = markers::Event;
    const COLLECTION: &'static str = "/api/schedule";
    const NAME: &'static str = "event";

    fn id(&self) -> Id<markers::Event> {
        self.id
    }
}
