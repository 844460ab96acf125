use serde::{Deserialize, Serialize};

/// Published whenever no session is active.
pub const EMPTY_SNAPSHOT_JSON: &str = r#"{"players":[],"roles":[]}"#;

/// Meta-role that is never offered to the UI.
pub const HIDDEN_ROLE_NAME: &str = "Strmiss";

/// Tag value that removes a note instead of storing it.
pub const CLEAR_TAG: &str = "Clear";

pub const DEAD_NOTE: &str = "Dead";
pub const IMPOSTOR_NOTE: &str = "Imposter";

/// Team code the host uses for the adversarial team.
pub const IMPOSTOR_TEAM: i32 = 1;
pub const CREWMATE_TEAM: i32 = 0;

/// Returns true for the meta-role name, ignoring case.
pub fn is_hidden_role(name: &str) -> bool {
    name.eq_ignore_ascii_case(HIDDEN_ROLE_NAME)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Uppercase `#RRGGBBAA`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

/// One participant as the UI sees it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: u8,
    pub name: String,
    pub color: String,
    pub color_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoleView {
    pub name: String,
    pub team_type: i32,
}

/// Everything published for one tick. Rebuilt wholesale, never patched.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct GameStateSnapshot {
    pub players: Vec<PlayerView>,
    pub roles: Vec<RoleView>,
}

impl GameStateSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty() && self.roles.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn player(&self, id: u8) -> Option<&PlayerView> {
        self.players.iter().find(|p| p.id == id)
    }
}

/// Body of `POST /api/tagplayer`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TagRequest {
    pub player_id: u8,
    pub tag: String,
}

impl TagRequest {
    pub fn new(player_id: u8, tag: impl Into<String>) -> Self {
        Self {
            player_id,
            tag: tag.into(),
        }
    }

    /// Rejects anything that is not an object with an integer `playerId`
    /// in 0..=255 and a string `tag`.
    pub fn parse(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(serde::de::Error::custom("tag body must be a JSON object"));
        }
        serde_json::from_value(value)
    }

    pub fn is_clear(&self) -> bool {
        self.tag.eq_ignore_ascii_case(CLEAR_TAG)
    }
}
