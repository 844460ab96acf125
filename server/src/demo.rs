//! Simulated host game used when running the journal standalone
//!
//! Plays through rounds on its own fixed update cycle: a short lobby with no
//! session, then a match where impostors kill crewmates and meetings eject
//! players, then back to the lobby. After every update it notifies the
//! publisher loop, which is how the loop follows host ticks instead of a
//! clock of its own.

use crate::error::RosterError;
use crate::roster::{Participant, RoleDescriptor, RosterSource, Session};
use crate::utils::palette_color;
use journal_shared::{CREWMATE_TEAM, IMPOSTOR_TEAM};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;
use tokio::time::{interval, Duration, MissedTickBehavior};

const NAMES: [&str; 15] = [
    "Ann", "Bo", "Cal", "Dee", "Eli", "Fay", "Gus", "Hal", "Ivy", "Jo", "Kit", "Lou", "Max",
    "Nia", "Oz",
];

const LOBBY_TICKS: u32 = 90;
const MEETING_TICKS: u32 = 150;
const KILL_CHANCE: f64 = 0.004;
const MEETING_CHANCE: f64 = 0.002;
const DISCONNECT_CHANCE: f64 = 0.0005;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lobby { remaining: u32 },
    Playing,
    Meeting { remaining: u32, exiled: Option<u8> },
}

#[derive(Debug)]
struct Lobby {
    rng: StdRng,
    player_count: usize,
    phase: Phase,
    participants: Vec<Participant>,
    confirm_impostors: bool,
    rounds: u32,
}

impl Lobby {
    fn start_round(&mut self) {
        self.rounds += 1;
        self.confirm_impostors = self.rng.gen_bool(0.5);

        let impostors = if self.player_count >= 7 { 2 } else { 1 };
        let mut ids: Vec<usize> = (0..self.player_count).collect();
        ids.shuffle(&mut self.rng);
        let impostor_ids = &ids[..impostors.min(ids.len())];

        self.participants = (0..self.player_count)
            .map(|i| {
                let (color_name, color) = palette_color(i);
                let mut p = Participant::new(i as u8, NAMES[i % NAMES.len()], color, color_name);
                p.team_type = if impostor_ids.contains(&i) {
                    IMPOSTOR_TEAM
                } else {
                    CREWMATE_TEAM
                };
                // Still loading on the first update of a round
                p.incomplete = true;
                p
            })
            .collect();

        self.phase = Phase::Playing;
        info!(
            "Demo round {} started: {} players, {} impostors, confirm ejects: {}",
            self.rounds, self.player_count, impostors, self.confirm_impostors
        );
    }

    fn end_round(&mut self, reason: &str) {
        info!("Demo round {} over: {}", self.rounds, reason);
        self.participants.clear();
        self.phase = Phase::Lobby {
            remaining: LOBBY_TICKS,
        };
    }

    fn alive(&self, impostor: bool) -> Vec<u8> {
        self.participants
            .iter()
            .filter(|p| !p.is_dead && !p.disconnected && p.is_impostor() == impostor)
            .map(|p| p.id)
            .collect()
    }

    fn participant_mut(&mut self, id: u8) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.id == id)
    }

    fn step(&mut self) {
        for p in &mut self.participants {
            p.incomplete = false;
        }

        match self.phase {
            Phase::Lobby { remaining: 0 } => self.start_round(),
            Phase::Lobby { remaining } => {
                self.phase = Phase::Lobby {
                    remaining: remaining - 1,
                }
            }
            Phase::Playing => self.step_playing(),
            Phase::Meeting {
                remaining: 0,
                exiled,
            } => {
                if let Some(p) = exiled.and_then(|id| self.participant_mut(id)) {
                    p.is_dead = true;
                }
                self.phase = Phase::Playing;
                self.check_round_over();
            }
            Phase::Meeting { remaining, exiled } => {
                self.phase = Phase::Meeting {
                    remaining: remaining - 1,
                    exiled,
                }
            }
        }
    }

    fn step_playing(&mut self) {
        let crew = self.alive(false);
        let impostors = self.alive(true);

        if self.rng.gen_bool(KILL_CHANCE) {
            if let Some(&victim) = crew.choose(&mut self.rng) {
                debug!("Demo: player {} killed", victim);
                if let Some(p) = self.participant_mut(victim) {
                    p.is_dead = true;
                }
            }
        }

        if self.rng.gen_bool(DISCONNECT_CHANCE) {
            let everyone: Vec<u8> = crew.iter().chain(impostors.iter()).copied().collect();
            if let Some(&gone) = everyone.choose(&mut self.rng) {
                debug!("Demo: player {} disconnected", gone);
                if let Some(p) = self.participant_mut(gone) {
                    p.disconnected = true;
                }
            }
        }

        if self.rng.gen_bool(MEETING_CHANCE) {
            let candidates: Vec<u8> = self
                .alive(false)
                .into_iter()
                .chain(self.alive(true))
                .collect();
            // Skipped vote about a third of the time
            let exiled = if self.rng.gen_bool(0.33) {
                None
            } else {
                candidates.choose(&mut self.rng).copied()
            };
            debug!("Demo: meeting called, exiling {:?}", exiled);
            self.phase = Phase::Meeting {
                remaining: MEETING_TICKS,
                exiled,
            };
            return;
        }

        self.check_round_over();
    }

    fn check_round_over(&mut self) {
        let crew = self.alive(false).len();
        let impostors = self.alive(true).len();

        if impostors == 0 {
            self.end_round("crewmates win");
        } else if impostors >= crew {
            self.end_round("impostors win");
        }
    }

    fn session(&self) -> Option<Session> {
        if self.participants.is_empty() {
            return None;
        }

        let exiled = match self.phase {
            Phase::Meeting { exiled, .. } => exiled,
            _ => None,
        };

        Some(Session {
            participants: self.participants.clone(),
            exiled,
            confirm_impostors: self.confirm_impostors,
        })
    }
}

/// Roster source backed by a simulated lobby
pub struct DemoHost {
    lobby: Mutex<Lobby>,
}

impl DemoHost {
    pub fn new(player_count: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            lobby: Mutex::new(Lobby {
                rng,
                player_count: player_count.clamp(1, 15),
                phase: Phase::Lobby {
                    remaining: LOBBY_TICKS,
                },
                participants: Vec::new(),
                confirm_impostors: false,
                rounds: 0,
            }),
        }
    }

    /// Advances the simulated game by one update.
    pub fn step(&self) {
        self.lock().step();
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase
    }

    pub fn rounds(&self) -> u32 {
        self.lock().rounds
    }

    fn lock(&self) -> MutexGuard<'_, Lobby> {
        // A panic mid-step leaves the lobby usable
        self.lobby.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RosterSource for DemoHost {
    fn poll_roster(&self) -> Result<Option<Session>, RosterError> {
        Ok(self.lock().session())
    }

    fn poll_roles(&self) -> Result<Vec<RoleDescriptor>, RosterError> {
        Ok(vec![
            RoleDescriptor::new("Crewmate", CREWMATE_TEAM),
            RoleDescriptor::new("Scientist", CREWMATE_TEAM),
            RoleDescriptor::new("Engineer", CREWMATE_TEAM),
            RoleDescriptor::new("Guardian Angel", CREWMATE_TEAM),
            RoleDescriptor::new("Strmiss", CREWMATE_TEAM),
            RoleDescriptor::new("Impostor", IMPOSTOR_TEAM),
            RoleDescriptor::new("Shapeshifter", IMPOSTOR_TEAM),
        ])
    }
}

/// Drives the simulated host at `tick_rate` updates per second.
///
/// Each update is announced on `ticks`; returns once the receiver is gone.
pub async fn run_host(host: Arc<DemoHost>, tick_rate: u32, ticks: mpsc::Sender<u64>) {
    let mut interval_timer = interval(Duration::from_secs_f32(1.0 / tick_rate.max(1) as f32));
    interval_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // Skip the first tick since it fires immediately
    interval_timer.tick().await;

    let mut tick: u64 = 0;
    loop {
        interval_timer.tick().await;

        host.step();
        tick += 1;

        if ticks.send(tick).await.is_err() {
            info!("Publisher gone, stopping demo host");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_in_lobby_without_session() {
        let host = DemoHost::new(10, Some(1));
        assert!(matches!(host.phase(), Phase::Lobby { .. }));
        assert_eq!(host.poll_roster().unwrap(), None);
    }

    #[test]
    fn test_round_starts_after_lobby() {
        let host = DemoHost::new(10, Some(7));
        for _ in 0..=LOBBY_TICKS {
            host.step();
        }

        assert_eq!(host.rounds(), 1);
        let session = host.poll_roster().unwrap().unwrap();
        assert_eq!(session.participants.len(), 10);
        // First update of a round is still loading
        assert!(session.participants.iter().all(|p| p.incomplete));

        host.step();
        let session = host.poll_roster().unwrap().unwrap();
        assert!(session.participants.iter().all(|p| !p.incomplete));
    }

    #[test]
    fn test_round_has_impostors() {
        let host = DemoHost::new(10, Some(3));
        for _ in 0..=LOBBY_TICKS {
            host.step();
        }

        let session = host.poll_roster().unwrap().unwrap();
        let impostors = session.participants.iter().filter(|p| p.is_impostor()).count();
        assert_eq!(impostors, 2);

        let ids: Vec<u8> = session.participants.iter().map(|p| p.id).collect();
        assert_eq!(ids, (0..10).collect::<Vec<u8>>());
    }

    #[test]
    fn test_player_count_clamped() {
        let host = DemoHost::new(40, Some(1));
        for _ in 0..=LOBBY_TICKS {
            host.step();
        }
        assert_eq!(host.poll_roster().unwrap().unwrap().participants.len(), 15);
    }

    #[test]
    fn test_roles_include_meta_role() {
        let host = DemoHost::new(4, Some(1));
        let roles = host.poll_roles().unwrap();
        assert!(roles.iter().any(|r| r.name == "Strmiss"));
    }

    #[test]
    fn test_long_run_cycles_rounds() {
        let host = DemoHost::new(5, Some(11));
        for _ in 0..200_000 {
            host.step();
        }
        assert!(host.rounds() >= 2);
    }

    #[test]
    fn test_meeting_exile_kills_player() {
        let mut lobby = DemoHost::new(6, Some(5)).lobby.into_inner().unwrap();
        lobby.start_round();
        lobby.step();

        let target = lobby.alive(false)[0];
        lobby.phase = Phase::Meeting {
            remaining: 0,
            exiled: Some(target),
        };
        assert_eq!(lobby.session().unwrap().exiled, Some(target));

        lobby.step();
        let dead = lobby
            .participants
            .iter()
            .find(|p| p.id == target)
            .map(|p| p.is_dead);
        // Round may have ended if the exile decided it
        if !lobby.participants.is_empty() {
            assert_eq!(dead, Some(true));
        }
    }

    #[tokio::test]
    async fn test_run_host_sends_ticks() {
        let host = Arc::new(DemoHost::new(4, Some(2)));
        let (tx, mut rx) = mpsc::channel(4);
        let handle = tokio::spawn(run_host(host, 200, tx));

        assert_eq!(rx.recv().await, Some(1));
        assert_eq!(rx.recv().await, Some(2));

        drop(rx);
        handle.await.unwrap();
    }
}
