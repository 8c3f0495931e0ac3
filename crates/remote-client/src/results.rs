//! Search-result pagination — incremental reveal per category.
//!
//! Each of the three categories owns one result container.  A fresh search
//! builds the full child list up front (first K visible, the rest hidden)
//! and swaps it in atomically; "show more" then reveals K more contiguously
//! until nothing is hidden, at which point the affordance is hidden but kept
//! in place.  The typed model here is authoritative; the surface only
//! mirrors it.

use crate::surface::{Category, ResultChild, ResultNode, Surface};

#[derive(Debug)]
struct Entry {
    visible: bool,
}

#[derive(Debug)]
pub struct ResultPane {
    category: Category,
    reveal_size: usize,
    entries: Vec<Entry>,
    has_show_more: bool,
}

impl ResultPane {
    pub fn new(category: Category, reveal_size: usize) -> Self {
        Self {
            category,
            reveal_size,
            entries: Vec::new(),
            has_show_more: false,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn container_id(&self) -> &'static str {
        self.category.container_id()
    }

    /// Replace this category's results wholesale.  The container is swapped
    /// in one step so a re-search never shows a partially-built list.
    pub fn display<S: Surface>(&mut self, surface: &mut S, items: Vec<ResultNode>) {
        self.entries = (0..items.len())
            .map(|i| Entry {
                visible: i < self.reveal_size,
            })
            .collect();
        self.has_show_more = items.len() > self.reveal_size;

        let mut children: Vec<ResultChild> = items
            .into_iter()
            .enumerate()
            .map(|(i, node)| ResultChild::Result {
                node,
                visible: i < self.reveal_size,
            })
            .collect();

        if children.is_empty() {
            children.push(ResultChild::NoResults);
        } else if self.has_show_more {
            children.push(ResultChild::ShowMore);
        }

        surface.replace_results(self.container_id(), &children);
    }

    /// Replace this category's results with an inline error message.  Other
    /// categories are untouched.
    pub fn display_error<S: Surface>(&mut self, surface: &mut S, message: &str) {
        self.entries.clear();
        self.has_show_more = false;
        surface.replace_results(self.container_id(), &[ResultChild::Error(message.to_string())]);
    }

    /// Reveal up to `reveal_size` more hidden results, front to back.  When
    /// the pass leaves nothing hidden, the show-more affordance is hidden
    /// (not removed).
    pub fn reveal_more<S: Surface>(&mut self, surface: &mut S) {
        let mut revealed = 0;
        for (index, entry) in self.entries.iter_mut().enumerate() {
            if entry.visible {
                continue;
            }
            if revealed >= self.reveal_size {
                break;
            }
            entry.visible = true;
            surface.set_result_visible(self.category.container_id(), index, true);
            revealed += 1;
        }

        if self.has_show_more && self.entries.iter().all(|e| e.visible) {
            self.has_show_more = false;
            surface.set_show_more_visible(self.category.container_id(), false);
        }
    }

    /// How many results are currently revealed.
    pub fn visible_count(&self) -> usize {
        self.entries.iter().filter(|e| e.visible).count()
    }
}

/// Children for a detail page's nested list (album tracks, artist albums):
/// everything visible, no pagination.
pub fn detail_children(items: Vec<ResultNode>) -> Vec<ResultChild> {
    items
        .into_iter()
        .map(|node| ResultChild::Result {
            node,
            visible: true,
        })
        .collect()
}
