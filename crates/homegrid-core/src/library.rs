//! Library session -- search query and visibility of the app library.

use crate::app::AppEntry;
use crate::filter::{self, LibraryView};

/// Query text and visibility of the library overlay.
///
/// Hiding the library keeps the query; only [`clear_query`](Self::clear_query)
/// resets it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibrarySession {
    query: String,
    visible: bool,
}

impl LibrarySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn update_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
        log::debug!("Library query: {:?}", self.query);
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Project `catalog` through the current query.
    pub fn view<'a>(&self, catalog: &'a [AppEntry], display_cap: usize) -> LibraryView<'a> {
        filter::project(catalog, &self.query, display_cap)
    }
}

/// Detects the upward swipe on the home screen that opens the library.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeUp {
    threshold: f32,
    travel: Option<f32>,
}

impl SwipeUp {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            travel: None,
        }
    }

    pub fn start(&mut self) {
        self.travel = Some(0.0);
    }

    /// Feed a vertical pointer delta (screen coordinates, negative is up).
    /// Returns `true` once, when the upward travel passes the threshold.
    pub fn drag_by(&mut self, dy: f32) -> bool {
        let Some(travel) = self.travel.as_mut() else {
            return false;
        };
        *travel -= dy;
        if *travel > self.threshold {
            self.travel = None;
            return true;
        }
        false
    }

    pub fn end(&mut self) {
        self.travel = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.travel.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Category;

    fn catalog() -> Vec<AppEntry> {
        vec![
            AppEntry::new("com.android.camera", "Camera").with_category(Category::Photography),
            AppEntry::new("org.music", "Music").with_category(Category::Entertainment),
            AppEntry::new("org.cam.scanner", "CamScanner"),
        ]
    }

    #[test]
    fn new_session_is_hidden_and_empty() {
        let s = LibrarySession::new();
        assert!(!s.is_visible());
        assert_eq!(s.query(), "");
    }

    #[test]
    fn hide_keeps_query() {
        let mut s = LibrarySession::new();
        s.show();
        s.update_query("cam");
        s.hide();
        assert!(!s.is_visible());
        assert_eq!(s.query(), "cam");
        s.clear_query();
        assert_eq!(s.query(), "");
    }

    #[test]
    fn view_follows_query() {
        let cat = catalog();
        let mut s = LibrarySession::new();
        assert!(matches!(s.view(&cat, 8), LibraryView::Categorized(_)));
        s.update_query("cam");
        match s.view(&cat, 8) {
            LibraryView::Flat(apps) => assert_eq!(apps.len(), 2),
            other => panic!("expected flat view, got {other:?}"),
        }
        s.update_query("nothing");
        assert_eq!(s.view(&cat, 8), LibraryView::NoMatches);
    }

    #[test]
    fn swipe_up_past_threshold_fires_once() {
        let mut swipe = SwipeUp::new(100.0);
        swipe.start();
        assert!(!swipe.drag_by(-60.0));
        assert!(swipe.drag_by(-60.0));
        assert!(!swipe.is_tracking());
        assert!(!swipe.drag_by(-200.0));
    }

    #[test]
    fn swipe_down_does_not_fire() {
        let mut swipe = SwipeUp::new(100.0);
        swipe.start();
        assert!(!swipe.drag_by(300.0));
        assert!(!swipe.drag_by(-150.0));
        swipe.end();
        assert!(!swipe.is_tracking());
    }

    #[test]
    fn swipe_without_start_is_ignored() {
        let mut swipe = SwipeUp::new(100.0);
        assert!(!swipe.drag_by(-500.0));
    }
}
