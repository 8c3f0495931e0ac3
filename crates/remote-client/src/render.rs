//! RenderCache — suppresses redundant view writes.
//!
//! The server pushes full snapshots at a steady clip; most of them change
//! nothing.  The cache keeps the last-rendered track and state and only
//! touches the surface for fields that actually differ.  Slider writes are
//! additionally guarded so a server echo never snaps a control out from
//! under the user's finger (see `arbiter`).

use remote_proto::protocol::{PlayState, PlaybackState, PlaybackTrack};

use crate::surface::{ids, Surface};

/// Which continuous controls the user is currently engaged with.  While a
/// flag is set, the matching slider (and its readouts) must not be written.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeldGuards {
    pub position: bool,
    pub volume: bool,
}

#[derive(Debug, Default)]
pub struct RenderCache {
    track: Option<PlaybackTrack>,
    state: Option<PlaybackState>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-render track metadata, but only when the track identity changed.
    pub fn apply_track<S: Surface>(&mut self, surface: &mut S, track: PlaybackTrack) {
        let same = self.track.as_ref().is_some_and(|t| t.id == track.id);
        if !same {
            surface.set_text(ids::ARTIST, &track.artist);
            surface.set_text(ids::NAME, &track.name);
            surface.set_text(ids::DURATION, &format_time(track.duration_secs));
            surface.set_range_max(ids::POSITION, track.duration_secs as f64);
        }
        // Cache is refreshed even when nothing was rendered.
        self.track = Some(track);
    }

    /// Re-render the three state groups independently: position, play/pause
    /// label, and volume/mute.  Held controls are skipped entirely.
    pub fn apply_state<S: Surface>(
        &mut self,
        surface: &mut S,
        state: PlaybackState,
        guards: HeldGuards,
    ) {
        let cached = self.state.as_ref();

        let position_changed = cached.map_or(true, |c| c.position_secs != state.position_secs);
        if position_changed && !guards.position {
            surface.set_text(ids::PLAYED_TIME, &format_time(state.position_secs));
            surface.set_value(ids::POSITION, state.position_secs as f64);
        }

        let play_state_changed = cached.map_or(true, |c| c.play_state != state.play_state);
        if play_state_changed {
            let label = match state.play_state {
                PlayState::Paused => "Play",
                PlayState::Playing => "Pause",
            };
            surface.set_text(ids::CURRENT_PLAY_STATE, label);
        }

        let volume_changed =
            cached.map_or(true, |c| c.muted != state.muted || c.volume != state.volume);
        if volume_changed && !guards.volume {
            surface.set_value(ids::CURRENT_VOLUME, state.volume as f64);
            surface.set_image(ids::MUTE_UNMUTE, mute_icon(&state));
        }

        // The cache always takes the freshest snapshot, including fields that
        // were not re-rendered above: the next comparison must run against
        // the latest known truth or a suppressed write would stick forever.
        self.state = Some(state);
    }

    pub fn apply_artwork<S: Surface>(&mut self, surface: &mut S, artwork: &str) {
        surface.set_image(ids::ARTWORK, &format!("data:image/png;base64,{artwork}"));
    }
}

fn mute_icon(state: &PlaybackState) -> &'static str {
    if state.muted {
        "mute-icon.png"
    } else if state.volume == 0 {
        "novolume-icon.png"
    } else {
        "volume-icon.png"
    }
}

/// mm:ss with zero padding, matching the player's own display.
pub fn format_time(total_secs: u32) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
