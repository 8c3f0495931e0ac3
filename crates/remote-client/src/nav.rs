//! PageStack — single-slot page history.
//!
//! The UI keeps exactly one remembered page: the last one shown with
//! `save = true`.  "Show search" resolves to that slot so the user lands
//! back where they were browsing (search, artist detail, album detail)
//! rather than on the bare search form.  A go-back affordance may clear the
//! slot first, re-rooting subsequent navigation.

use crate::surface::{NavTarget, Page, Surface};

#[derive(Debug, Default)]
pub struct PageStack {
    last_visited: Option<Page>,
}

impl PageStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_visited(&self) -> Option<Page> {
        self.last_visited
    }

    /// Forget the remembered page.
    pub fn clear_last(&mut self) {
        self.last_visited = None;
    }

    /// Show `page`, hiding all others.  With `save`, the page becomes the
    /// remembered slot for later "show search" resolution.
    pub fn show<S: Surface>(&mut self, surface: &mut S, page: Page, save: bool) {
        if save {
            self.last_visited = Some(page);
        }
        surface.show_page(page);
    }

    /// The search affordance resolves to the remembered page when set.
    pub fn show_search<S: Surface>(&mut self, surface: &mut S) {
        let page = self.last_visited.unwrap_or(Page::Search);
        self.show(surface, page, true);
    }

    /// The remote page is transient: showing it never touches the slot.
    pub fn show_remote<S: Surface>(&mut self, surface: &mut S) {
        self.show(surface, Page::Remote, false);
    }

    pub fn show_artist_detail<S: Surface>(&mut self, surface: &mut S) {
        self.show(surface, Page::ArtistDetail, true);
    }

    pub fn show_album_detail<S: Surface>(&mut self, surface: &mut S) {
        self.show(surface, Page::AlbumDetail, true);
    }

    /// Dispatch a `data-showPage` navigation.
    pub fn navigate<S: Surface>(&mut self, surface: &mut S, target: NavTarget) {
        match target {
            NavTarget::Search => self.show_search(surface),
            NavTarget::Remote => self.show_remote(surface),
            NavTarget::ArtistDetail => self.show_artist_detail(surface),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::fake::FakeSurface;

    #[test]
    fn test_show_search_defaults_to_search_page() {
        let mut surface = FakeSurface::new();
        let mut nav = PageStack::new();

        nav.show_search(&mut surface);
        assert_eq!(surface.current_page, Some(Page::Search));
        assert_eq!(nav.last_visited(), Some(Page::Search));
    }

    #[test]
    fn test_remote_does_not_clobber_saved_page() {
        let mut surface = FakeSurface::new();
        let mut nav = PageStack::new();

        // Browse to an artist detail page (saved), peek at the remote
        // (unsaved), then hit search again: artist detail is restored.
        nav.show_artist_detail(&mut surface);
        nav.show_remote(&mut surface);
        assert_eq!(surface.current_page, Some(Page::Remote));

        nav.show_search(&mut surface);
        assert_eq!(surface.current_page, Some(Page::ArtistDetail));
    }

    #[test]
    fn test_clear_last_reroots_search() {
        let mut surface = FakeSurface::new();
        let mut nav = PageStack::new();

        nav.show_album_detail(&mut surface);
        nav.clear_last();
        nav.show_search(&mut surface);
        assert_eq!(surface.current_page, Some(Page::Search));
    }
}
