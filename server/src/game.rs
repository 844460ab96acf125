use crate::notes::NoteBook;
use crate::roster::{Participant, RoleDescriptor, RosterSource, Session};
use journal_shared::{
    is_hidden_role, GameStateSnapshot, PlayerView, RoleView, DEAD_NOTE, IMPOSTOR_NOTE,
};
use log::debug;

/// Result of one builder pass
#[derive(Debug, Clone, PartialEq)]
pub struct BuildResult {
    pub snapshot: GameStateSnapshot,
    pub session_active: bool,
}

impl BuildResult {
    fn inactive() -> Self {
        Self {
            snapshot: GameStateSnapshot::empty(),
            session_active: false,
        }
    }
}

/// Polls the host and combines its roster with the note book.
///
/// An absent, empty or unreadable session wipes the note book and yields the
/// empty snapshot. Derived notes are written back into `notes`.
pub fn build_snapshot(source: &dyn RosterSource, notes: &mut NoteBook) -> BuildResult {
    let session = match source.poll_roster() {
        Ok(Some(session)) if !session.participants.is_empty() => session,
        Ok(_) => {
            notes.clear_all();
            return BuildResult::inactive();
        }
        Err(e) => {
            debug!("Roster unreadable, treating as no session: {}", e);
            notes.clear_all();
            return BuildResult::inactive();
        }
    };

    let roles = match source.poll_roles() {
        Ok(roles) => roles,
        Err(e) => {
            debug!("Roles unreadable, treating as no session: {}", e);
            notes.clear_all();
            return BuildResult::inactive();
        }
    };

    BuildResult {
        snapshot: compose_snapshot(&session, &roles, notes),
        session_active: true,
    }
}

/// Builds the snapshot for an active session.
pub fn compose_snapshot(
    session: &Session,
    roles: &[RoleDescriptor],
    notes: &mut NoteBook,
) -> GameStateSnapshot {
    let mut players = Vec::with_capacity(session.participants.len());

    for participant in session.participants.iter().filter(|p| !p.is_hidden()) {
        if let Some(label) = derive_note(participant, session) {
            notes.set(participant.id, label);
        }

        players.push(PlayerView {
            id: participant.id,
            name: participant.name.clone(),
            color: participant.color.to_hex(),
            color_name: participant.color_name.clone(),
            note: notes.get(participant.id).map(str::to_owned),
        });
    }

    GameStateSnapshot {
        players,
        roles: visible_roles(roles),
    }
}

/// Label forced onto a participant by the session state, if any.
///
/// Evaluated every tick, so it keeps overwriting manual notes for as long as
/// the participant stays dead.
pub fn derive_note(participant: &Participant, session: &Session) -> Option<&'static str> {
    let exiled = session.exiled == Some(participant.id);
    if !participant.is_dead && !exiled {
        return None;
    }

    if session.confirm_impostors && participant.is_impostor() {
        Some(IMPOSTOR_NOTE)
    } else {
        Some(DEAD_NOTE)
    }
}

/// Source order, minus the meta-role.
pub fn visible_roles(roles: &[RoleDescriptor]) -> Vec<RoleView> {
    roles
        .iter()
        .filter(|role| !is_hidden_role(&role.name))
        .map(|role| RoleView {
            name: role.name.clone(),
            team_type: role.team_type,
        })
        .collect()
}
