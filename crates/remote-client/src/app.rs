//! App — single-owner event loop for all client state.
//!
//! Everything mutable lives here: the render cache, both slider arbiters,
//! the page stack, and the three result panes.  Background tasks (channel
//! reader, catalog fetches, the settle ticker, the input driver) only send
//! `AppMessage`s in; the loop applies them one at a time, so no state is
//! ever touched from two places.
//!
//! Outbound commands leave through a separate `cmd_tx` channel owned by the
//! `ControlChannel` loop.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{debug, warn};

use remote_proto::config::Config;
use remote_proto::protocol::{Command, ServerEvent};

use crate::arbiter::{ControlKind, SliderArbiter};
use crate::catalog::{self, AlbumDetail, ArtistDetail, USER_FACING_ERROR};
use crate::dispatch::{Action, DispatchTable, TriggerKind};
use crate::nav::PageStack;
use crate::render::{HeldGuards, RenderCache};
use crate::results::{self, ResultPane};
use crate::surface::{ids, BackBinding, Category, NavTarget, Page, ResultNode, Surface};

// ── Events ────────────────────────────────────────────────────────────────────

/// User interactions, as reported by the input driver / frontend.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Click/tap on an element, by id.
    Click { target: String },
    /// Key press outside an input field, by key name ("space", "n", ...).
    Key { key: String },
    SliderPress { control: ControlKind },
    SliderInput { control: ControlKind, value: f64 },
    SliderRelease { control: ControlKind },
    SubmitSearch { term: String },
    /// Click on a result element: its `data-resulttype` value and
    /// `data-spotifyurl` source id.
    OpenResult { value: String, source: String },
    /// Click on a page-switch affordance: its `data-showPage` value, plus
    /// whether it carries `data-deleteLastVisited`.
    ShowPage { value: String, delete_last: bool },
    /// Click on a show-more affordance, by result container id.
    ShowMore { container: String },
}

/// All inputs into the App loop.
#[derive(Debug)]
pub enum AppMessage {
    Server(ServerEvent),
    Ui(UiEvent),
    SearchLoaded {
        category: Category,
        items: Vec<ResultNode>,
    },
    SearchFailed {
        category: Category,
    },
    AlbumDetailLoaded(AlbumDetail),
    AlbumDetailFailed,
    ArtistDetailLoaded(ArtistDetail),
    ArtistDetailFailed,
    /// Periodic tick driving the slider settle windows.
    SettleTick,
    /// Stop the event loop.
    Quit,
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App<S: Surface> {
    surface: S,
    catalog_base: String,

    cache: RenderCache,
    volume: SliderArbiter,
    position: SliderArbiter,
    nav: PageStack,
    panes: Vec<ResultPane>,
    dispatch: DispatchTable,

    cmd_tx: mpsc::Sender<Command>,
    /// Clone handed to spawned catalog tasks so results flow back in.
    msg_tx: mpsc::Sender<AppMessage>,
}

impl<S: Surface> App<S> {
    pub fn new(
        surface: S,
        config: &Config,
        cmd_tx: mpsc::Sender<Command>,
        msg_tx: mpsc::Sender<AppMessage>,
    ) -> anyhow::Result<Self> {
        let dispatch = DispatchTable::builtin()?;
        let settle = Duration::from_millis(config.slider.settle_ms);
        let panes = Category::ALL
            .iter()
            .map(|&category| ResultPane::new(category, config.search.reveal_size))
            .collect();

        Ok(Self {
            surface,
            catalog_base: config.catalog.base_url.clone(),
            cache: RenderCache::new(),
            volume: SliderArbiter::new(settle),
            position: SliderArbiter::new(settle),
            nav: PageStack::new(),
            panes,
            dispatch,
            cmd_tx,
            msg_tx,
        })
    }

    /// Run until the message channel closes.
    pub async fn run(mut self, mut rx: mpsc::Receiver<AppMessage>) -> anyhow::Result<()> {
        // The remote page is the one visible on load.
        self.nav.show_remote(&mut self.surface);

        while let Some(msg) = rx.recv().await {
            if matches!(msg, AppMessage::Quit) {
                break;
            }
            self.handle(msg).await;
        }
        debug!("app loop ending");
        Ok(())
    }

    pub async fn handle(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Server(event) => self.handle_server_event(event),
            AppMessage::Ui(event) => self.handle_ui_event(event).await,
            AppMessage::SearchLoaded { category, items } => {
                if let Some(pane) = self.panes.iter_mut().find(|p| p.category() == category) {
                    pane.display(&mut self.surface, items);
                }
            }
            AppMessage::SearchFailed { category } => {
                if let Some(pane) = self.panes.iter_mut().find(|p| p.category() == category) {
                    pane.display_error(&mut self.surface, USER_FACING_ERROR);
                }
            }
            AppMessage::AlbumDetailLoaded(detail) => self.show_album_detail(detail),
            AppMessage::AlbumDetailFailed => {
                self.surface.set_text(ids::ALBUM_DETAIL_ALBUM, USER_FACING_ERROR);
                self.surface.replace_results(ids::ALBUM_DETAIL_TRACKS, &[]);
                self.nav.show_album_detail(&mut self.surface);
            }
            AppMessage::ArtistDetailLoaded(detail) => {
                let children = results::detail_children(detail.album_nodes());
                self.surface.replace_results(ids::ARTIST_DETAIL_ALBUMS, &children);
                self.surface.set_text(ids::ARTIST_DETAIL_ARTIST, &detail.name);
                self.nav.show_artist_detail(&mut self.surface);
            }
            AppMessage::ArtistDetailFailed => {
                self.surface.replace_results(
                    ids::ARTIST_DETAIL_ALBUMS,
                    &[crate::surface::ResultChild::Error(USER_FACING_ERROR.to_string())],
                );
                self.nav.show_artist_detail(&mut self.surface);
            }
            AppMessage::SettleTick => self.handle_settle_tick(Instant::now()).await,
            // Quit is consumed by the run loop before it reaches here.
            AppMessage::Quit => {}
        }
    }

    // ── Inbound state ─────────────────────────────────────────────────────────

    fn handle_server_event(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::CurrentTrack { track } => {
                self.cache.apply_track(&mut self.surface, track);
            }
            ServerEvent::CurrentState { state } => {
                let guards = HeldGuards {
                    position: self.position.is_engaged(),
                    volume: self.volume.is_engaged(),
                };
                self.cache.apply_state(&mut self.surface, state, guards);
            }
            ServerEvent::CurrentArtwork { artwork } => {
                self.cache.apply_artwork(&mut self.surface, &artwork);
            }
        }
    }

    // ── User input ────────────────────────────────────────────────────────────

    async fn handle_ui_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Click { target } => {
                match self.dispatch.lookup(TriggerKind::Click, &target).cloned() {
                    Some(Action::Emit(cmd)) => self.emit(cmd).await,
                    Some(other) => warn!(?other, element = %target, "click bound to non-command action"),
                    None => debug!(element = %target, "unbound click"),
                }
            }
            UiEvent::Key { key } => {
                match self.dispatch.lookup(TriggerKind::Key, &key).cloned() {
                    Some(Action::Emit(cmd)) => self.emit(cmd).await,
                    Some(other) => warn!(?other, key, "key bound to non-command action"),
                    None => debug!(key, "unbound key"),
                }
            }
            UiEvent::SliderPress { control } => self.arbiter_mut(control).press(),
            UiEvent::SliderInput { control, value } => self.arbiter_mut(control).input(value),
            UiEvent::SliderRelease { control } => {
                self.arbiter_mut(control).release(Instant::now())
            }
            UiEvent::SubmitSearch { term } => self.submit_search(term),
            UiEvent::OpenResult { value, source } => {
                match self.dispatch.lookup(TriggerKind::ResultType, &value).cloned() {
                    Some(Action::OpenResult(category)) => {
                        self.open_result(category, source).await
                    }
                    _ => debug!(value, "unbound result click"),
                }
            }
            UiEvent::ShowPage { value, delete_last } => {
                match self.dispatch.lookup(TriggerKind::ShowPage, &value).cloned() {
                    Some(Action::Navigate(target)) => {
                        if delete_last {
                            self.nav.clear_last();
                        }
                        self.nav.navigate(&mut self.surface, target);
                    }
                    _ => debug!(value, "unbound page switch"),
                }
            }
            UiEvent::ShowMore { container } => {
                match self
                    .panes
                    .iter_mut()
                    .find(|p| p.container_id() == container)
                {
                    Some(pane) => pane.reveal_more(&mut self.surface),
                    None => debug!(container, "show-more for unknown container"),
                }
            }
        }
    }

    fn arbiter_mut(&mut self, control: ControlKind) -> &mut SliderArbiter {
        match control {
            ControlKind::Volume => &mut self.volume,
            ControlKind::Position => &mut self.position,
        }
    }

    async fn handle_settle_tick(&mut self, now: Instant) {
        if let Some(value) = self.volume.tick(now) {
            let value = value.round().clamp(0.0, 100.0) as u8;
            self.emit(Command::SetVolume { value }).await;
        }
        if let Some(value) = self.position.tick(now) {
            let seconds = value.round().max(0.0) as u32;
            self.emit(Command::JumpTo { seconds }).await;
        }
    }

    // ── Search / details ──────────────────────────────────────────────────────

    fn submit_search(&mut self, term: String) {
        self.surface.blur(ids::SEARCH_TERM);
        if term.is_empty() {
            return;
        }

        // Three independent queries; each only ever touches its own pane, so
        // completions may interleave freely.
        for category in Category::ALL {
            let base = self.catalog_base.clone();
            let term = term.clone();
            let tx = self.msg_tx.clone();
            tokio::spawn(async move {
                let msg = match catalog::search(&base, category, &term).await {
                    Ok(items) => AppMessage::SearchLoaded { category, items },
                    Err(e) => {
                        warn!(%category, "search failed: {}", e);
                        AppMessage::SearchFailed { category }
                    }
                };
                let _ = tx.send(msg).await;
            });
        }
    }

    async fn open_result(&mut self, category: Category, source: String) {
        match category {
            Category::Tracks => {
                self.emit(Command::PlayTrack { source }).await;
                self.nav.show_remote(&mut self.surface);
            }
            Category::Albums => {
                let base = self.catalog_base.clone();
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let msg = match catalog::lookup_album(&base, &source).await {
                        Ok(detail) => AppMessage::AlbumDetailLoaded(detail),
                        Err(e) => {
                            warn!("album lookup failed: {}", e);
                            AppMessage::AlbumDetailFailed
                        }
                    };
                    let _ = tx.send(msg).await;
                });
            }
            Category::Artists => {
                let base = self.catalog_base.clone();
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let msg = match catalog::lookup_artist(&base, &source).await {
                        Ok(detail) => AppMessage::ArtistDetailLoaded(detail),
                        Err(e) => {
                            warn!("artist lookup failed: {}", e);
                            AppMessage::ArtistDetailFailed
                        }
                    };
                    let _ = tx.send(msg).await;
                });
            }
        }
    }

    fn show_album_detail(&mut self, detail: AlbumDetail) {
        let children = results::detail_children(detail.track_nodes());
        self.surface.replace_results(ids::ALBUM_DETAIL_TRACKS, &children);
        self.surface.set_text(ids::ALBUM_DETAIL_ALBUM, &detail.header());

        // When the album was opened from an artist page, its go-back
        // affordance returns there; otherwise it re-roots to plain search.
        let binding = if self.nav.last_visited() == Some(Page::ArtistDetail) {
            BackBinding {
                target: NavTarget::ArtistDetail,
                delete_last: false,
            }
        } else {
            BackBinding {
                target: NavTarget::Search,
                delete_last: true,
            }
        };
        self.surface.rebind_back_button(Page::AlbumDetail, binding);

        self.nav.show_album_detail(&mut self.surface);
    }

    // ── Outbound ──────────────────────────────────────────────────────────────

    async fn emit(&mut self, cmd: Command) {
        if self.cmd_tx.send(cmd).await.is_err() {
            warn!("command channel closed");
        }
    }
}
