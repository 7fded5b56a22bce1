use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Track {
    Sustainability,
    Health,
    Education,
    Fintech,
    OpenInnovation,
}

impl Track {
    pub const ALL: [Track; 5] = [
        Self::Sustainability,
        Self::Health,
        Self::Education,
        Self::Fintech,
        Self::OpenInnovation,
    ];

    pub const fn label(self) -> &'static str {
        use Track::*;
        match self {
            Sustainability => "Sustainability",
            Health => "Health",
            Education => "Education",
            Fintech => "Fintech",
            OpenInnovation => "Open Innovation",
        }
    }
}

/// Which satellite illustration a team card uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SatelliteVariant {
    Probe,
    Relay,
    Station,
    Telescope,
}

impl SatelliteVariant {
    pub const fn class_name(self) -> &'static str {
        use SatelliteVariant::*;
        match self {
            Probe => "satellite-probe",
            Relay => "satellite-relay",
            Station => "satellite-station",
            Telescope => "satellite-telescope",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
    pub leader: String,
    #[serde(default)]
    pub members: Vec<String>,
    pub project: String,
    pub track: Track,
    pub satellite: SatelliteVariant,
}

impl Team {
    /// Leader plus members.
    pub fn headcount(&self) -> usize {
        1 + self.members.len()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VolunteerRole {
    Organizer,
    Mentor,
    Judge,
    Logistics,
    Design,
}

impl VolunteerRole {
    pub const fn label(self) -> &'static str {
        use VolunteerRole::*;
        match self {
            Organizer => "Organizer",
            Mentor => "Mentor",
            Judge => "Judge",
            Logistics => "Logistics",
            Design => "Design",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: u32,
    pub name: String,
    pub role: VolunteerRole,
    pub quote: String,
    /// Creature shown on the volunteer's card.
    pub creature_id: u32,
}

/// Read-only team and volunteer listings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    teams: Vec<Team>,
    volunteers: Vec<Volunteer>,
}

impl Roster {
    pub fn new(
        teams: Vec<Team>,
        volunteers: Vec<Volunteer>,
    ) -> core::result::Result<Self, RosterError> {
        let mut team_ids = BTreeSet::new();
        if let Some(team) = teams.iter().find(|team| !team_ids.insert(team.id)) {
            return Err(RosterError::DuplicateTeam(team.id));
        }

        let mut volunteer_ids = BTreeSet::new();
        if let Some(volunteer) = volunteers
            .iter()
            .find(|volunteer| !volunteer_ids.insert(volunteer.id))
        {
            return Err(RosterError::DuplicateVolunteer(volunteer.id));
        }

        Ok(Self { teams, volunteers })
    }

    pub fn from_json(teams: &str, volunteers: &str) -> core::result::Result<Self, RosterError> {
        Self::new(serde_json::from_str(teams)?, serde_json::from_str(volunteers)?)
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn volunteers(&self) -> &[Volunteer] {
        &self.volunteers
    }

    pub fn participant_count(&self) -> usize {
        self.teams.iter().map(Team::headcount).sum()
    }

    /// Non-empty tracks in [`Track::ALL`] order, teams sorted by name.
    pub fn teams_by_track(&self) -> Vec<(Track, Vec<&Team>)> {
        Track::ALL
            .into_iter()
            .filter_map(|track| {
                let mut teams: Vec<&Team> =
                    self.teams.iter().filter(|team| team.track == track).collect();
                teams.sort_by(|a, b| a.name.cmp(&b.name));
                (!teams.is_empty()).then_some((track, teams))
            })
            .collect()
    }

    /// Volunteers grouped by role, roles in declaration order, original
    /// order kept within a role.
    pub fn volunteers_by_role(&self) -> Vec<(VolunteerRole, Vec<&Volunteer>)> {
        let roles: BTreeSet<VolunteerRole> = self.volunteers.iter().map(|v| v.role).collect();
        roles
            .into_iter()
            .map(|role| {
                let members = self
                    .volunteers
                    .iter()
                    .filter(|volunteer| volunteer.role == role)
                    .collect();
                (role, members)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEAMS: &str = r#"[
        {"id": 1, "name": "Zenith", "leader": "Ana", "members": ["Bo", "Cy"],
         "project": "Solar Grid", "track": "sustainability", "satellite": "probe"},
        {"id": 2, "name": "Apogee", "leader": "Dee", "members": [],
         "project": "Ledger Lite", "track": "fintech", "satellite": "relay"},
        {"id": 3, "name": "Aurora", "leader": "Eli",
         "project": "Seed Swap", "track": "sustainability", "satellite": "telescope"}
    ]"#;

    const VOLUNTEERS: &str = r#"[
        {"id": 10, "name": "Fay", "role": "mentor", "quote": "Ship it.", "creature_id": 25},
        {"id": 11, "name": "Gus", "role": "organizer", "quote": "Coffee first.", "creature_id": 1},
        {"id": 12, "name": "Hal", "role": "mentor", "quote": "Read the logs.", "creature_id": 7}
    ]"#;

    #[test]
    fn decodes_and_groups_teams_by_track() {
        let roster = Roster::from_json(TEAMS, VOLUNTEERS).unwrap();
        let grouped = roster.teams_by_track();

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, Track::Sustainability);
        let names: Vec<&str> = grouped[0].1.iter().map(|team| team.name.as_str()).collect();
        assert_eq!(names, ["Aurora", "Zenith"]);
        assert_eq!(grouped[1].0, Track::Fintech);
        assert_eq!(roster.participant_count(), 3 + 1 + 1);
    }

    #[test]
    fn groups_volunteers_by_role() {
        let roster = Roster::from_json(TEAMS, VOLUNTEERS).unwrap();
        let grouped = roster.volunteers_by_role();

        assert_eq!(grouped[0].0, VolunteerRole::Organizer);
        assert_eq!(grouped[1].0, VolunteerRole::Mentor);
        let names: Vec<&str> = grouped[1].1.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["Fay", "Hal"]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let teams = r#"[
            {"id": 1, "name": "A", "leader": "a", "project": "p", "track": "health", "satellite": "probe"},
            {"id": 1, "name": "B", "leader": "b", "project": "q", "track": "health", "satellite": "relay"}
        ]"#;

        assert!(matches!(
            Roster::from_json(teams, "[]"),
            Err(RosterError::DuplicateTeam(1))
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            Roster::from_json("[{", "[]"),
            Err(RosterError::Malformed(_))
        ));
        assert!(matches!(
            Roster::from_json(TEAMS, r#"[{"id": 1}]"#),
            Err(RosterError::Malformed(_))
        ));
    }
}
