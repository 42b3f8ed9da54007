use crate::domain::{Club, Event, TeamMember};

/// Events organized by `club`, matched on the club's display name. Clubs
/// sharing a name both receive the events.
pub fn events_for_club(club: &Club, events: &[Event]) -> Vec<Event> {
    events
        .iter()
        .filter(|e| e.organizing_club_name.as_deref() == Some(club.name.as_str()))
        .cloned()
        .collect()
}

/// First club whose name matches the event's organizer.
pub fn club_for_event<'a>(event: &Event, clubs: &'a [Club]) -> Option<&'a Club> {
    let organizer = event.organizing_club_name.as_deref()?;
    clubs.iter().find(|c| c.name == organizer)
}

/// Team members have no club key, so every club shows every member fetched.
pub fn team_for_club(_club: &Club, members: &[TeamMember]) -> Vec<TeamMember> {
    members.to_vec()
}
