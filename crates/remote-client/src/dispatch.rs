//! Event dispatch table — (trigger kind, trigger key) → action.
//!
//! The original remote routed events through ad hoc lookup objects keyed by
//! element ids and keycodes.  Here the whole routing surface is one
//! declarative table, validated once at startup: a duplicate entry is a
//! programming error and refuses to boot.  Lookups that miss are normal
//! routing (the click landed somewhere uninteresting), not errors.

use std::collections::HashMap;

use remote_proto::protocol::Command;

use crate::surface::{Category, NavTarget};

/// Where a trigger key comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    /// A click/tap on an element, keyed by element id.
    Click,
    /// A key press outside an input field, keyed by key name.
    Key,
    /// A click on a search result, keyed by its `data-resulttype` value.
    ResultType,
    /// A page-switch affordance, keyed by its `data-showPage` value.
    ShowPage,
}

/// What a trigger resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Send a fixed command over the channel.
    Emit(Command),
    /// Fetch-and-navigate for a clicked result of this category.
    OpenResult(Category),
    /// Navigate via the page stack.
    Navigate(NavTarget),
}

pub struct DispatchTable {
    entries: HashMap<(TriggerKind, String), Action>,
}

impl DispatchTable {
    /// The remote's standard bindings.
    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_entries(vec![
            // Transport buttons.
            (TriggerKind::Click, "previous", Action::Emit(Command::Previous)),
            (TriggerKind::Click, "next", Action::Emit(Command::Next)),
            (
                TriggerKind::Click,
                "current-play-state",
                Action::Emit(Command::PlayPause),
            ),
            (
                TriggerKind::Click,
                "mute-unmute",
                Action::Emit(Command::MuteUnmute),
            ),
            // Keyboard, mirroring the click commands plus volume steps.
            (TriggerKind::Key, "space", Action::Emit(Command::PlayPause)),
            (TriggerKind::Key, "n", Action::Emit(Command::Next)),
            (TriggerKind::Key, "p", Action::Emit(Command::Previous)),
            (TriggerKind::Key, "+", Action::Emit(Command::VolumeUp)),
            (TriggerKind::Key, "-", Action::Emit(Command::VolumeDown)),
            // Result clicks by data-resulttype.
            (
                TriggerKind::ResultType,
                "tracks",
                Action::OpenResult(Category::Tracks),
            ),
            (
                TriggerKind::ResultType,
                "albums",
                Action::OpenResult(Category::Albums),
            ),
            (
                TriggerKind::ResultType,
                "artists",
                Action::OpenResult(Category::Artists),
            ),
            // Page switches by data-showPage.
            (
                TriggerKind::ShowPage,
                "search",
                Action::Navigate(NavTarget::Search),
            ),
            (
                TriggerKind::ShowPage,
                "remote",
                Action::Navigate(NavTarget::Remote),
            ),
            (
                TriggerKind::ShowPage,
                "artist-detail",
                Action::Navigate(NavTarget::ArtistDetail),
            ),
        ])
    }

    /// Build a table, rejecting duplicate (kind, key) pairs.
    pub fn from_entries(
        list: Vec<(TriggerKind, &'static str, Action)>,
    ) -> anyhow::Result<Self> {
        let mut entries = HashMap::with_capacity(list.len());
        for (kind, key, action) in list {
            if entries.insert((kind, key.to_string()), action).is_some() {
                anyhow::bail!("duplicate dispatch entry: {:?} {:?}", kind, key);
            }
        }
        Ok(Self { entries })
    }

    pub fn lookup(&self, kind: TriggerKind, key: &str) -> Option<&Action> {
        self.entries.get(&(kind, key.to_string()))
    }
}
