//! Placement store -- the catalog, dock and home slot sequences.
//!
//! A slot sequence is a dense `Vec<AppEntry>` whose index is the slot
//! position. The store owns all three sequences, is read by reference by the
//! renderer every frame, and is only mutated through its methods so the
//! invariants stay in one place:
//!
//! * no package appears twice in the same sequence;
//! * dock and home are independent of each other and of the catalog;
//! * the catalog keeps the catalog's own order and is never a move target.
//!
//! Every successful mutation bumps [`PlacementStore::version`].

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app::AppEntry;
use crate::error::{LauncherError, Result};

/// A mutable slot sequence. The catalog is deliberately not a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SequenceId {
    Dock,
    Home,
}

impl SequenceId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dock => "dock",
            Self::Home => "home",
        }
    }
}

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SequenceId {
    type Err = LauncherError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dock" => Ok(Self::Dock),
            "home" => Ok(Self::Home),
            _ => Err(LauncherError::UnknownSequence(s.to_string())),
        }
    }
}

/// Split a catalog into its initial dock and home sequences.
///
/// Dock-default entries fill the dock (catalog order) up to `dock_capacity`.
/// Everything else, including flagged entries that did not fit, fills home
/// in catalog order up to `home_capacity`. The rest stay reachable only
/// through the catalog.
pub fn partition_initial(
    catalog: &[AppEntry],
    dock_capacity: usize,
    home_capacity: usize,
) -> (Vec<AppEntry>, Vec<AppEntry>) {
    let dock: Vec<AppEntry> = catalog
        .iter()
        .filter(|a| a.dock_default)
        .take(dock_capacity)
        .cloned()
        .collect();
    let docked: HashSet<&str> = dock.iter().map(|a| a.package.as_str()).collect();
    let home = catalog
        .iter()
        .filter(|a| !docked.contains(a.package.as_str()))
        .take(home_capacity)
        .cloned()
        .collect();
    (dock, home)
}

/// Remove the item at `from` and reinsert it at `to`.
///
/// Both indices must lie in `[0, len)`. `to` is clamped to the end of the
/// shortened vector before reinsertion.
pub fn relocate<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<()> {
    let len = items.len();
    if from >= len {
        return Err(LauncherError::OutOfRange { index: from, len });
    }
    if to >= len {
        return Err(LauncherError::OutOfRange { index: to, len });
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
    Ok(())
}

/// Serializable view of the current layout, by package name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub version: u64,
    pub dock: Vec<String>,
    pub home: Vec<String>,
}

impl LayoutSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Owned, versioned snapshot of the launcher's slot sequences.
#[derive(Debug, Clone)]
pub struct PlacementStore {
    catalog: Vec<AppEntry>,
    dock: Vec<AppEntry>,
    home: Vec<AppEntry>,
    dock_capacity: usize,
    home_capacity: usize,
    version: u64,
}

impl PlacementStore {
    /// An empty store (no catalog loaded yet).
    pub fn new(dock_capacity: usize, home_capacity: usize) -> Self {
        Self {
            catalog: Vec::new(),
            dock: Vec::new(),
            home: Vec::new(),
            dock_capacity,
            home_capacity,
            version: 0,
        }
    }

    /// A store populated from `catalog` with the default partition.
    pub fn from_catalog(catalog: Vec<AppEntry>, dock_capacity: usize, home_capacity: usize) -> Self {
        let mut store = Self::new(dock_capacity, home_capacity);
        store.refresh(catalog);
        store
    }

    pub fn catalog(&self) -> &[AppEntry] {
        &self.catalog
    }

    pub fn dock(&self) -> &[AppEntry] {
        &self.dock
    }

    pub fn home(&self) -> &[AppEntry] {
        &self.home
    }

    pub fn sequence(&self, id: SequenceId) -> &[AppEntry] {
        match id {
            SequenceId::Dock => &self.dock,
            SequenceId::Home => &self.home,
        }
    }

    pub fn dock_capacity(&self) -> usize {
        self.dock_capacity
    }

    pub fn home_capacity(&self) -> usize {
        self.home_capacity
    }

    /// Bumped on every successful mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Package names of a sequence, in slot order.
    pub fn ids(&self, id: SequenceId) -> Vec<String> {
        self.sequence(id).iter().map(|a| a.package.clone()).collect()
    }

    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            version: self.version,
            dock: self.ids(SequenceId::Dock),
            home: self.ids(SequenceId::Home),
        }
    }

    /// Look up a catalog entry by package name.
    pub fn find(&self, package: &str) -> Option<&AppEntry> {
        self.catalog.iter().find(|a| a.package == package)
    }

    fn sequence_mut(&mut self, id: SequenceId) -> &mut Vec<AppEntry> {
        match id {
            SequenceId::Dock => &mut self.dock,
            SequenceId::Home => &mut self.home,
        }
    }

    /// Replace the catalog wholesale and rebuild dock/home with the default
    /// partition. Never merges with the previous state.
    pub fn refresh(&mut self, catalog: Vec<AppEntry>) {
        let (dock, home) = partition_initial(&catalog, self.dock_capacity, self.home_capacity);
        log::info!(
            "Catalog refreshed: {} apps, {} docked, {} on home",
            catalog.len(),
            dock.len(),
            home.len()
        );
        self.catalog = catalog;
        self.dock = dock;
        self.home = home;
        self.version += 1;
    }

    /// Move the entry at `from` to `to` within one sequence.
    ///
    /// Returns `true` if the sequence changed. Equal or out-of-range indices
    /// are a no-op with no observable side effect.
    pub fn move_entry(&mut self, id: SequenceId, from: usize, to: usize) -> bool {
        if from == to {
            return false;
        }
        match relocate(self.sequence_mut(id), from, to) {
            Ok(()) => {
                self.version += 1;
                log::debug!("Moved {id} slot {from} -> {to}");
                true
            },
            Err(e) => {
                log::debug!("Ignoring {id} move {from} -> {to}: {e}");
                false
            },
        }
    }

    /// Overwrite a sequence with `new_order`.
    ///
    /// Every entry must be a catalog app and appear at most once; otherwise
    /// the call fails with `InvalidLayout` and the sequence is untouched.
    pub fn replace(&mut self, id: SequenceId, new_order: Vec<AppEntry>) -> Result<()> {
        self.validate(&new_order)?;
        *self.sequence_mut(id) = new_order;
        self.version += 1;
        log::debug!("Replaced {id} layout");
        Ok(())
    }

    /// [`replace`](Self::replace) addressed by package names.
    pub fn replace_ids(&mut self, id: SequenceId, packages: &[String]) -> Result<()> {
        let mut new_order = Vec::with_capacity(packages.len());
        for package in packages {
            let app = self.find(package).ok_or_else(|| {
                LauncherError::InvalidLayout(format!("unknown app: {package}"))
            })?;
            new_order.push(app.clone());
        }
        self.replace(id, new_order)
    }

    fn validate(&self, entries: &[AppEntry]) -> Result<()> {
        let mut seen = HashSet::with_capacity(entries.len());
        for app in entries {
            if !seen.insert(app.package.as_str()) {
                return Err(LauncherError::InvalidLayout(format!(
                    "duplicate app: {}",
                    app.package
                )));
            }
            if self.find(&app.package).is_none() {
                return Err(LauncherError::InvalidLayout(format!(
                    "unknown app: {}",
                    app.package
                )));
            }
        }
        Ok(())
    }

    /// Seed dock and home from saved package-name lists.
    ///
    /// Each name is resolved against the live catalog; names that are no
    /// longer installed, or repeated within a list, are dropped. Results are
    /// capped at the dock/home capacities.
    pub fn rehydrate(&mut self, dock_ids: &[String], home_ids: &[String]) {
        let dock = self.resolve(dock_ids, self.dock_capacity);
        let home = self.resolve(home_ids, self.home_capacity);
        log::info!(
            "Restored layout: {}/{} dock, {}/{} home",
            dock.len(),
            dock_ids.len(),
            home.len(),
            home_ids.len()
        );
        self.dock = dock;
        self.home = home;
        self.version += 1;
    }

    fn resolve(&self, packages: &[String], cap: usize) -> Vec<AppEntry> {
        let mut seen = HashSet::new();
        packages
            .iter()
            .filter(|p| seen.insert(p.as_str()))
            .filter_map(|p| self.find(p).cloned())
            .take(cap)
            .collect()
    }

    /// Number of home pages needed at `page_size` icons per page (at least 1).
    pub fn page_count(&self, page_size: usize) -> usize {
        if page_size == 0 || self.home.is_empty() {
            return 1;
        }
        self.home.len().div_ceil(page_size)
    }

    /// Home apps on `page` (0-based).
    pub fn home_page(&self, page: usize, page_size: usize) -> &[AppEntry] {
        let start = page.saturating_mul(page_size);
        if start >= self.home.len() {
            return &[];
        }
        let end = (start + page_size).min(self.home.len());
        &self.home[start..end]
    }
}
