//! Library projection: search filtering and category grouping.
//!
//! Pure functions over borrowed catalog slices. Nothing here reorders the
//! catalog; every projection is stable with respect to its input.

use crate::app::{AppEntry, Category};

/// Entries whose label contains `query`, case-insensitively, in catalog
/// order. An empty query matches everything.
pub fn filter<'a>(catalog: &'a [AppEntry], query: &str) -> Vec<&'a AppEntry> {
    if query.is_empty() {
        return catalog.iter().collect();
    }
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|a| a.label.to_lowercase().contains(&needle))
        .collect()
}

/// One library section: every app of a category plus its display cap.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBucket<'a> {
    pub category: Category,
    /// The full bucket, in input order. Never truncated.
    pub apps: Vec<&'a AppEntry>,
    display_cap: usize,
}

impl<'a> CategoryBucket<'a> {
    /// The apps shown inline (at most the display cap).
    pub fn visible(&self) -> &[&'a AppEntry] {
        &self.apps[..self.apps.len().min(self.display_cap)]
    }

    /// How many apps are hidden behind "See All".
    pub fn overflow(&self) -> usize {
        self.apps.len().saturating_sub(self.display_cap)
    }

    pub fn has_more(&self) -> bool {
        self.overflow() > 0
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

/// Group `apps` by category.
///
/// Buckets appear in first-seen order and keep the input order inside each
/// bucket, so the sum of bucket sizes always equals `apps.len()`.
pub fn group_by_category<'a>(apps: &[&'a AppEntry], display_cap: usize) -> Vec<CategoryBucket<'a>> {
    let mut buckets: Vec<CategoryBucket<'a>> = Vec::new();
    for &app in apps {
        match buckets.iter_mut().find(|b| b.category == app.category) {
            Some(bucket) => bucket.apps.push(app),
            None => buckets.push(CategoryBucket {
                category: app.category,
                apps: vec![app],
                display_cap,
            }),
        }
    }
    buckets
}

/// What the library shows for a given query.
#[derive(Debug, Clone, PartialEq)]
pub enum LibraryView<'a> {
    /// No query: the whole catalog grouped by category.
    Categorized(Vec<CategoryBucket<'a>>),
    /// Active query with matches: a flat grid, never grouped.
    Flat(Vec<&'a AppEntry>),
    /// Active query with no matches.
    NoMatches,
}

impl LibraryView<'_> {
    /// Total number of apps in the view (hidden overflow included).
    pub fn app_count(&self) -> usize {
        match self {
            Self::Categorized(buckets) => buckets.iter().map(CategoryBucket::len).sum(),
            Self::Flat(apps) => apps.len(),
            Self::NoMatches => 0,
        }
    }
}

/// Project the catalog into the library view for `query`.
pub fn project<'a>(catalog: &'a [AppEntry], query: &str, display_cap: usize) -> LibraryView<'a> {
    let matches = filter(catalog, query);
    if query.is_empty() {
        LibraryView::Categorized(group_by_category(&matches, display_cap))
    } else if matches.is_empty() {
        LibraryView::NoMatches
    } else {
        LibraryView::Flat(matches)
    }
}
