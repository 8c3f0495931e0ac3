use serde::{Deserialize, Serialize};

/// Current protocol version.  Bump this when the wire format changes in a
/// breaking way.  The client checks this on connect and can refuse to talk
/// to an incompatible server.
pub const PROTOCOL_VERSION: u32 = 1;

/// Play/pause state of the player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlayState {
    Playing,
    #[default]
    Paused,
}

/// The track the player is currently on.  Replaced wholesale when the
/// player moves to a new track; identity is compared by `id` only.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlaybackTrack {
    pub id: String,
    pub artist: String,
    pub name: String,
    pub duration_secs: u32,
}

/// Full playback snapshot pushed by the server.  Fields are compared
/// individually on the client to decide what to re-render.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlaybackState {
    pub position_secs: u32,
    pub play_state: PlayState,
    pub muted: bool,
    /// 0..=100
    pub volume: u8,
}

/// Messages sent from client to server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd")]
pub enum Command {
    Previous,
    Next,
    PlayPause,
    MuteUnmute,
    VolumeUp,
    VolumeDown,
    SetVolume { value: u8 },
    JumpTo { seconds: u32 },
    /// Ask the server to play a track by its catalog source id.
    PlayTrack { source: String },
}

/// Messages pushed from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum ServerEvent {
    CurrentTrack { track: PlaybackTrack },
    CurrentState { state: PlaybackState },
    /// Cover art as a base64-encoded PNG.
    CurrentArtwork { artwork: String },
}

/// Wrapper for socket communication
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    Command(Command),
    Event(ServerEvent),
}

impl Message {
    pub fn encode(&self) -> anyhow::Result<Vec<u8>> {
        let json = serde_json::to_vec(self)?;
        let len = json.len() as u32;
        let mut result = Vec::with_capacity(4 + json.len());
        result.extend_from_slice(&len.to_be_bytes());
        result.extend_from_slice(&json);
        Ok(result)
    }

    pub fn decode(data: &[u8]) -> anyhow::Result<(Self, usize)> {
        if data.len() < 4 {
            anyhow::bail!("Insufficient data for length header");
        }
        let len = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
        if data.len() < 4 + len {
            anyhow::bail!("Insufficient data for message");
        }
        let msg: Self = serde_json::from_slice(&data[4..4 + len])?;
        Ok((msg, 4 + len))
    }
}
