use crate::creature::CreatureBadge;
use codegate_core::{Roster, Team, Volunteer};
use std::rc::Rc;
use yew::prelude::*;

const TEAMS_JSON: &str = include_str!("../data/teams.json");
const VOLUNTEERS_JSON: &str = include_str!("../data/volunteers.json");

/// The embedded roster, empty if the data is rejected.
pub(crate) fn load_roster() -> Roster {
    Roster::from_json(TEAMS_JSON, VOLUNTEERS_JSON).unwrap_or_else(|err| {
        log::error!("roster data rejected: {}", err);
        Roster::default()
    })
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct TeamsProps {
    pub roster: Rc<Roster>,
}

#[function_component(TeamsView)]
pub(crate) fn teams_view(props: &TeamsProps) -> Html {
    let roster = &props.roster;

    html! {
        <section class="teams">
            <h2>{"Final teams"}</h2>
            <p class="summary">
                {format!("{} teams, {} hackers", roster.teams().len(), roster.participant_count())}
            </p>
            {
                for roster.teams_by_track().into_iter().map(|(track, teams)| html! {
                    <section class="track">
                        <h3>{track.label()}</h3>
                        <div class="cards">
                            { for teams.into_iter().map(team_card) }
                        </div>
                    </section>
                })
            }
        </section>
    }
}

fn team_card(team: &Team) -> Html {
    html! {
        <article class="team" key={team.id}>
            <div class={classes!("satellite", team.satellite.class_name())}/>
            <h4>{team.name.clone()}</h4>
            <p class="project">{team.project.clone()}</p>
            <ul class="members">
                <li class="leader">{team.leader.clone()}</li>
                { for team.members.iter().map(|member| html! { <li>{member.clone()}</li> }) }
            </ul>
        </article>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct VolunteersProps {
    pub roster: Rc<Roster>,
    pub api_base: AttrValue,
    pub timeout_ms: u32,
}

#[function_component(VolunteersView)]
pub(crate) fn volunteers_view(props: &VolunteersProps) -> Html {
    let card = |volunteer: &Volunteer| {
        html! {
            <article class="volunteer" key={volunteer.id}>
                <CreatureBadge
                    id={volunteer.creature_id}
                    api_base={props.api_base.clone()}
                    timeout_ms={props.timeout_ms}
                />
                <h4>{volunteer.name.clone()}</h4>
                <blockquote>{volunteer.quote.clone()}</blockquote>
            </article>
        }
    };

    html! {
        <section class="volunteers">
            <h2>{"Volunteers"}</h2>
            {
                for props.roster.volunteers_by_role().into_iter().map(|(role, volunteers)| html! {
                    <section class="role">
                        <h3>{role.label()}</h3>
                        <div class="cards">
                            { for volunteers.into_iter().map(&card) }
                        </div>
                    </section>
                })
            }
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_roster_is_valid() {
        let roster = Roster::from_json(TEAMS_JSON, VOLUNTEERS_JSON).unwrap();

        assert_eq!(roster.teams().len(), 8);
        assert!(roster.volunteers().iter().all(|v| v.creature_id > 0));
        assert_eq!(roster.teams_by_track().len(), 5);
    }
}
