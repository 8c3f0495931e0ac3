//! Surface — the typed boundary between the client core and its markup.
//!
//! The original remote binds to the page through a handful of element ids and
//! data attributes.  Those stay the contract here, but they are asserted in
//! code: every id the core touches is a constant in [`ids`], every
//! data-attribute value is an enum, and every mutation goes through the
//! [`Surface`] trait so the core never reaches into a concrete view directly.

use std::fmt;

/// Element ids the core writes to.  These mirror the markup one-to-one.
pub mod ids {
    pub const ARTIST: &str = "artist";
    pub const NAME: &str = "name";
    pub const DURATION: &str = "duration";
    pub const PLAYED_TIME: &str = "played-time";
    pub const POSITION: &str = "position";
    pub const CURRENT_PLAY_STATE: &str = "current-play-state";
    pub const CURRENT_VOLUME: &str = "current-volume";
    pub const MUTE_UNMUTE: &str = "mute-unmute";
    pub const ARTWORK: &str = "artwork";
    pub const SEARCH_TERM: &str = "search-term";
    pub const ALBUM_DETAIL_ALBUM: &str = "album-detail-album";
    pub const ALBUM_DETAIL_TRACKS: &str = "album-detail-tracks";
    pub const ARTIST_DETAIL_ARTIST: &str = "artist-detail-artist";
    pub const ARTIST_DETAIL_ALBUMS: &str = "artist-detail-albums";
}

/// Placeholder text rendered when a search category comes back empty.
pub const NO_RESULTS_TEXT: &str = "Woah! No search results!";

/// The pages of the UI.  Exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Remote,
    Search,
    ArtistDetail,
    AlbumDetail,
}

impl Page {
    pub fn id(self) -> &'static str {
        match self {
            Page::Remote => "remote",
            Page::Search => "search",
            Page::ArtistDetail => "artist-detail",
            Page::AlbumDetail => "album-detail",
        }
    }
}

/// Values of the `data-showPage` attribute on page-switch affordances.
/// Note there is no album-detail target: the album page is only ever reached
/// through a result click, never a nav affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Search,
    Remote,
    ArtistDetail,
}

impl NavTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            NavTarget::Search => "search",
            NavTarget::Remote => "remote",
            NavTarget::ArtistDetail => "artist-detail",
        }
    }
}

/// Values of the `data-resulttype` attribute — the three catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Tracks,
    Albums,
    Artists,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Tracks, Category::Albums, Category::Artists];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Tracks => "tracks",
            Category::Albums => "albums",
            Category::Artists => "artists",
        }
    }

    /// Container id of this category's search-result pane.
    pub fn container_id(self) -> &'static str {
        match self {
            Category::Tracks => "tracks-search-results",
            Category::Albums => "albums-search-results",
            Category::Artists => "artists-search-results",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog search result as the rendering layer sees it: the category it
/// belongs to (`data-resulttype`), its opaque catalog source id
/// (`data-spotifyurl`), and the human-readable label.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultNode {
    pub category: Category,
    pub source: String,
    pub label: String,
}

/// One child of a freshly-built result container.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultChild {
    Result { node: ResultNode, visible: bool },
    ShowMore,
    NoResults,
    Error(String),
}

/// How a page's go-back affordance should navigate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackBinding {
    pub target: NavTarget,
    /// Clear the remembered last-visited page before navigating.
    pub delete_last: bool,
}

/// Everything the core is allowed to do to the view.
///
/// Implementations are dumb: they apply mutations and keep no logic of their
/// own.  All decisions about *whether* to touch an element live in the core
/// (render cache, paginator, nav stack).
pub trait Surface {
    fn set_text(&mut self, id: &str, text: &str);
    fn set_value(&mut self, id: &str, value: f64);
    fn set_range_max(&mut self, id: &str, max: f64);
    fn set_image(&mut self, id: &str, src: &str);
    fn blur(&mut self, id: &str);
    /// Hide every page except `page`.
    fn show_page(&mut self, page: Page);
    /// Swap the container's children wholesale.  The old children disappear
    /// and the new ones land in a single step, never incrementally.
    fn replace_results(&mut self, container: &str, children: &[ResultChild]);
    fn set_result_visible(&mut self, container: &str, index: usize, visible: bool);
    fn set_show_more_visible(&mut self, container: &str, visible: bool);
    fn rebind_back_button(&mut self, page: Page, binding: BackBinding);
}

// ── TraceSurface ──────────────────────────────────────────────────────────────

/// Reference surface for the `tonearm` binary: logs every mutation through
/// `tracing`.  A real frontend (web view, TUI) would translate these calls
/// into its own widget updates.
#[derive(Debug, Default)]
pub struct TraceSurface;

impl Surface for TraceSurface {
    fn set_text(&mut self, id: &str, text: &str) {
        tracing::info!(target: "surface", id, text, "set_text");
    }

    fn set_value(&mut self, id: &str, value: f64) {
        tracing::info!(target: "surface", id, value, "set_value");
    }

    fn set_range_max(&mut self, id: &str, max: f64) {
        tracing::info!(target: "surface", id, max, "set_range_max");
    }

    fn set_image(&mut self, id: &str, src: &str) {
        // Artwork payloads are large; log the length, not the data.
        tracing::info!(target: "surface", id, src_len = src.len(), "set_image");
    }

    fn blur(&mut self, id: &str) {
        tracing::info!(target: "surface", id, "blur");
    }

    fn show_page(&mut self, page: Page) {
        tracing::info!(target: "surface", page = page.id(), "show_page");
    }

    fn replace_results(&mut self, container: &str, children: &[ResultChild]) {
        tracing::info!(target: "surface", container, count = children.len(), "replace_results");
    }

    fn set_result_visible(&mut self, container: &str, index: usize, visible: bool) {
        tracing::info!(target: "surface", container, index, visible, "set_result_visible");
    }

    fn set_show_more_visible(&mut self, container: &str, visible: bool) {
        tracing::info!(target: "surface", container, visible, "set_show_more_visible");
    }

    fn rebind_back_button(&mut self, page: Page, binding: BackBinding) {
        tracing::info!(
            target: "surface",
            page = page.id(),
            target_page = binding.target.as_str(),
            delete_last = binding.delete_last,
            "rebind_back_button"
        );
    }
}

// ── Test fake ─────────────────────────────────────────────────────────────────

#[cfg(test)]
pub mod fake {
    //! Recording surface for unit tests: applies mutations to in-memory maps
    //! so tests can assert on the resulting "view" instead of on call logs.

    use std::collections::HashMap;

    use super::*;

    #[derive(Debug, Clone)]
    pub struct FakeChild {
        pub child: ResultChild,
        pub visible: bool,
    }

    #[derive(Debug, Default)]
    pub struct FakeSurface {
        pub texts: HashMap<String, String>,
        pub values: HashMap<String, f64>,
        pub maxes: HashMap<String, f64>,
        pub images: HashMap<String, String>,
        pub current_page: Option<Page>,
        pub containers: HashMap<String, Vec<FakeChild>>,
        pub show_more_visible: HashMap<String, bool>,
        pub back_bindings: Vec<(Page, BackBinding)>,
        pub blurred: Vec<String>,
        /// Every mutation in call order, for ordering/idempotence assertions.
        pub ops: Vec<String>,
    }

    impl FakeSurface {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn text(&self, id: &str) -> Option<&str> {
            self.texts.get(id).map(|s| s.as_str())
        }

        pub fn value(&self, id: &str) -> Option<f64> {
            self.values.get(id).copied()
        }

        pub fn visible_results(&self, container: &str) -> usize {
            self.containers
                .get(container)
                .map(|children| {
                    children
                        .iter()
                        .filter(|c| matches!(c.child, ResultChild::Result { .. }) && c.visible)
                        .count()
                })
                .unwrap_or(0)
        }

        pub fn container_children(&self, container: &str) -> &[FakeChild] {
            self.containers
                .get(container)
                .map(|v| v.as_slice())
                .unwrap_or(&[])
        }
    }

    impl Surface for FakeSurface {
        fn set_text(&mut self, id: &str, text: &str) {
            self.ops.push(format!("set_text:{id}"));
            self.texts.insert(id.to_string(), text.to_string());
        }

        fn set_value(&mut self, id: &str, value: f64) {
            self.ops.push(format!("set_value:{id}"));
            self.values.insert(id.to_string(), value);
        }

        fn set_range_max(&mut self, id: &str, max: f64) {
            self.ops.push(format!("set_range_max:{id}"));
            self.maxes.insert(id.to_string(), max);
        }

        fn set_image(&mut self, id: &str, src: &str) {
            self.ops.push(format!("set_image:{id}"));
            self.images.insert(id.to_string(), src.to_string());
        }

        fn blur(&mut self, id: &str) {
            self.ops.push(format!("blur:{id}"));
            self.blurred.push(id.to_string());
        }

        fn show_page(&mut self, page: Page) {
            self.ops.push(format!("show_page:{}", page.id()));
            self.current_page = Some(page);
        }

        fn replace_results(&mut self, container: &str, children: &[ResultChild]) {
            self.ops.push(format!("replace_results:{container}"));
            let built = children
                .iter()
                .map(|child| {
                    let visible = match child {
                        ResultChild::Result { visible, .. } => *visible,
                        _ => true,
                    };
                    FakeChild {
                        child: child.clone(),
                        visible,
                    }
                })
                .collect();
            self.containers.insert(container.to_string(), built);
            let has_show_more = children.iter().any(|c| matches!(c, ResultChild::ShowMore));
            self.show_more_visible
                .insert(container.to_string(), has_show_more);
        }

        fn set_result_visible(&mut self, container: &str, index: usize, visible: bool) {
            self.ops
                .push(format!("set_result_visible:{container}:{index}"));
            if let Some(children) = self.containers.get_mut(container) {
                if let Some(child) = children.get_mut(index) {
                    child.visible = visible;
                }
            }
        }

        fn set_show_more_visible(&mut self, container: &str, visible: bool) {
            self.ops.push(format!("set_show_more_visible:{container}"));
            self.show_more_visible.insert(container.to_string(), visible);
        }

        fn rebind_back_button(&mut self, page: Page, binding: BackBinding) {
            self.ops.push(format!("rebind_back_button:{}", page.id()));
            self.back_bindings.push((page, binding));
        }
    }
}
