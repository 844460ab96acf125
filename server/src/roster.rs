//! Read-only view of the host game's roster
//!
//! The host process owns the live session; the journal only polls it. Every
//! value handed across this boundary is owned, so nothing borrowed from the
//! host outlives a single builder pass.

use crate::error::RosterError;
use journal_shared::{Rgba, IMPOSTOR_TEAM};

/// A participant as reported by the host for one poll
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: u8,
    pub name: String,
    pub color: Rgba,
    pub color_name: String,
    pub is_dead: bool,
    /// Left the session but still listed by the host
    pub disconnected: bool,
    /// Host has not finished populating this participant
    pub incomplete: bool,
    pub team_type: i32,
}

impl Participant {
    pub fn new(
        id: u8,
        name: impl Into<String>,
        color: Rgba,
        color_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            color_name: color_name.into(),
            is_dead: false,
            disconnected: false,
            incomplete: false,
            team_type: journal_shared::CREWMATE_TEAM,
        }
    }

    pub fn is_impostor(&self) -> bool {
        self.team_type == IMPOSTOR_TEAM
    }

    /// Present in the roster but not fit to publish
    pub fn is_hidden(&self) -> bool {
        self.disconnected || self.incomplete
    }
}

/// Role archetype known to the current session
#[derive(Debug, Clone, PartialEq)]
pub struct RoleDescriptor {
    pub name: String,
    pub team_type: i32,
}

impl RoleDescriptor {
    pub fn new(name: impl Into<String>, team_type: i32) -> Self {
        Self {
            name: name.into(),
            team_type,
        }
    }
}

/// Everything the builder needs from one roster poll
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// In host iteration order
    pub participants: Vec<Participant>,
    /// Player being ejected by the meeting currently in progress
    pub exiled: Option<u8>,
    /// Host setting that reveals whether an ejected player was an impostor
    pub confirm_impostors: bool,
}

impl Session {
    pub fn new(participants: Vec<Participant>) -> Self {
        Self {
            participants,
            exiled: None,
            confirm_impostors: false,
        }
    }
}

/// Pull-based accessor for the host's live state
///
/// Implementations must not block; the publisher calls both methods while
/// holding the journal lock.
pub trait RosterSource: Send + Sync {
    /// `Ok(None)` when no session is running.
    fn poll_roster(&self) -> Result<Option<Session>, RosterError>;

    fn poll_roles(&self) -> Result<Vec<RoleDescriptor>, RosterError>;
}
