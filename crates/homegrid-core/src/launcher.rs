//! Launcher session -- the placement store plus everything that drives it.
//!
//! [`Launcher`] owns the injected collaborators (app catalog, layout
//! persistence), the [`PlacementStore`], the library session, one drag
//! controller per grid, and the current home page. Frontends call into it
//! from a single thread and read the store by reference to render.

use std::sync::Arc;

use crate::app::AppEntry;
use crate::catalog::AppCatalog;
use crate::config::LauncherConfig;
use crate::drag::{DragOutcome, DragReorderController};
use crate::error::Result;
use crate::filter::LibraryView;
use crate::input::DragEvent;
use crate::library::{LibrarySession, SwipeUp};
use crate::persistence::{LayoutKey, LayoutPersistence, encode_ids};
use crate::placement::{PlacementStore, SequenceId};
use crate::refresh::RefreshHandle;

pub struct Launcher {
    config: LauncherConfig,
    catalog: Arc<dyn AppCatalog>,
    persistence: Box<dyn LayoutPersistence>,
    store: PlacementStore,
    library: LibrarySession,
    home_drag: DragReorderController,
    dock_drag: DragReorderController,
    swipe: SwipeUp,
    page: usize,
    /// Last enumeration failure; cleared by a successful load/refresh.
    catalog_error: Option<String>,
    pending_refresh: Option<RefreshHandle>,
}

impl Launcher {
    /// Create an empty launcher. Nothing is fetched until [`load`](Self::load).
    pub fn new(
        config: LauncherConfig,
        catalog: Arc<dyn AppCatalog>,
        persistence: Box<dyn LayoutPersistence>,
    ) -> Self {
        let store = PlacementStore::new(config.dock_capacity, config.home_capacity);
        let home_drag = DragReorderController::new(SequenceId::Home, config.drag.clone());
        let dock_drag = DragReorderController::new(SequenceId::Dock, config.drag.clone());
        let swipe = SwipeUp::new(config.library_swipe_px);
        Self {
            config,
            catalog,
            persistence,
            store,
            library: LibrarySession::new(),
            home_drag,
            dock_drag,
            swipe,
            page: 0,
            catalog_error: None,
            pending_refresh: None,
        }
    }

    // -- Accessors --

    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    pub fn store(&self) -> &PlacementStore {
        &self.store
    }

    pub fn library(&self) -> &LibrarySession {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut LibrarySession {
        &mut self.library
    }

    pub fn drag_controller(&self, id: SequenceId) -> &DragReorderController {
        match id {
            SequenceId::Home => &self.home_drag,
            SequenceId::Dock => &self.dock_drag,
        }
    }

    /// The last catalog enumeration error, if the catalog is unavailable.
    pub fn catalog_error(&self) -> Option<&str> {
        self.catalog_error.as_deref()
    }

    pub fn is_refreshing(&self) -> bool {
        self.pending_refresh.is_some()
    }

    // -- Lifecycle --

    /// Fetch the catalog and build the layout.
    ///
    /// A saved layout is restored when one exists; otherwise (or when it
    /// cannot be read) the default partition is used. If the catalog cannot
    /// be enumerated the launcher comes up empty with
    /// [`catalog_error`](Self::catalog_error) set, and a later
    /// [`refresh`](Self::refresh) may recover.
    pub fn load(&mut self) {
        match self.catalog.list() {
            Ok(apps) => {
                self.catalog_error = None;
                self.install(apps);
                self.restore_layout();
            },
            Err(e) => {
                log::warn!("App catalog unavailable: {e}");
                self.catalog_error = Some(e.to_string());
                self.install(Vec::new());
            },
        }
    }

    /// Re-enumerate synchronously and rebuild dock and home from scratch.
    ///
    /// On failure the previous layout is kept and the error is recorded.
    pub fn refresh(&mut self) -> Result<()> {
        let result = self.catalog.list();
        self.apply_refresh(result)
    }

    /// Start a background refresh. Supersedes any refresh still running.
    pub fn begin_refresh(&mut self) {
        if self.pending_refresh.is_some() {
            log::debug!("Superseding in-flight catalog refresh");
        }
        self.pending_refresh = Some(RefreshHandle::spawn(Arc::clone(&self.catalog)));
    }

    /// Apply a finished background refresh. `None` while none has finished.
    pub fn poll_refresh(&mut self) -> Option<Result<()>> {
        let result = self.pending_refresh.as_mut()?.try_take()?;
        self.pending_refresh = None;
        Some(self.apply_refresh(result))
    }

    /// Block until the background refresh (if any) finishes and apply it.
    pub fn finish_refresh(&mut self) -> Option<Result<()>> {
        let handle = self.pending_refresh.take()?;
        Some(self.apply_refresh(handle.wait()))
    }

    fn apply_refresh(&mut self, result: Result<Vec<AppEntry>>) -> Result<()> {
        match result {
            Ok(apps) => {
                self.catalog_error = None;
                self.install(apps);
                Ok(())
            },
            Err(e) => {
                log::warn!("Catalog refresh failed: {e}");
                self.catalog_error = Some(e.to_string());
                Err(e)
            },
        }
    }

    /// Replace the store contents wholesale and drop any gesture state.
    fn install(&mut self, apps: Vec<AppEntry>) {
        self.store.refresh(apps);
        self.home_drag.reset();
        self.dock_drag.reset();
        self.clamp_page();
    }

    fn restore_layout(&mut self) {
        let (dock, home) = match self.read_layout() {
            Ok(saved) => saved,
            Err(e) => {
                log::warn!("Saved layout unreadable, using defaults: {e}");
                return;
            },
        };
        // An absent key and an empty list read back the same, so a saved
        // layout with nothing in dock or home is indistinguishable from none
        // and yields the default partition.
        if dock.is_empty() && home.is_empty() {
            log::debug!("No saved layout");
            return;
        }
        self.store.rehydrate(&dock, &home);
        self.clamp_page();
    }

    /// Read the dock and every home page up to the first empty one.
    fn read_layout(&self) -> Result<(Vec<String>, Vec<String>)> {
        let dock = self.persistence.load(LayoutKey::Dock)?;
        let max_pages = self
            .config
            .home_capacity
            .div_ceil(self.config.page_size.max(1))
            .max(1);
        let mut home = Vec::new();
        for page in 0..max_pages {
            let ids = self.persistence.load(LayoutKey::HomePage(page))?;
            if ids.is_empty() {
                break;
            }
            home.extend(ids);
        }
        Ok((dock, home))
    }

    // -- Layout --

    /// Move an app within the dock or home grid. Invalid indices are a no-op.
    pub fn move_app(&mut self, id: SequenceId, from: usize, to: usize) -> bool {
        self.store.move_entry(id, from, to)
    }

    /// Overwrite a whole sequence by package names.
    pub fn replace_layout(&mut self, id: SequenceId, packages: &[String]) -> Result<()> {
        self.store.replace_ids(id, packages)?;
        self.clamp_page();
        Ok(())
    }

    /// Feed a drag event to the controller of grid `id`.
    ///
    /// Home-grid indices are relative to the current page; a start outside
    /// the visible page is ignored.
    pub fn drag(&mut self, id: SequenceId, event: DragEvent) -> DragOutcome {
        let event = match (id, event) {
            (SequenceId::Home, DragEvent::Start { index }) => {
                let Some(index) = self.absolute_home_index(index) else {
                    log::debug!("Ignoring home drag at page slot {index}");
                    return DragOutcome::Pending;
                };
                DragEvent::Start { index }
            },
            (_, event) => event,
        };
        let controller = match id {
            SequenceId::Home => &mut self.home_drag,
            SequenceId::Dock => &mut self.dock_drag,
        };
        controller.handle(event, &mut self.store)
    }

    fn absolute_home_index(&self, page_slot: usize) -> Option<usize> {
        if page_slot >= self.current_page_apps().len() {
            return None;
        }
        self.page
            .checked_mul(self.config.page_size)?
            .checked_add(page_slot)
    }

    // -- Library --

    pub fn library_view(&self) -> LibraryView<'_> {
        self.library
            .view(self.store.catalog(), self.config.category_display_cap)
    }

    pub fn begin_swipe(&mut self) {
        self.swipe.start();
    }

    /// Track a vertical swipe on the home screen; opens the library once the
    /// upward travel passes the configured distance.
    pub fn swipe_by(&mut self, dy: f32) -> bool {
        let fired = self.swipe.drag_by(dy);
        if fired {
            self.library.show();
        }
        fired
    }

    pub fn end_swipe(&mut self) {
        self.swipe.end();
    }

    // -- Actions --

    /// Ask the platform to launch `package`. Failures are logged only.
    pub fn launch(&self, package: &str) {
        log::info!("Launching {package}");
        if let Err(e) = self.catalog.launch(package) {
            log::warn!("Launch of {package} failed: {e}");
        }
    }

    /// Persist the dock and every home page.
    ///
    /// The page after the last one is written empty so a shrunken home grid
    /// does not pick up stale pages on the next load.
    pub fn save_layout(&mut self) -> Result<()> {
        let dock = self.store.ids(SequenceId::Dock);
        let home = self.store.ids(SequenceId::Home);
        // Validate everything up front so a bad id does not leave a half
        // written layout.
        encode_ids(&dock)?;
        encode_ids(&home)?;

        let page_size = self.config.page_size.max(1);
        let pages: Vec<&[String]> = home.chunks(page_size).collect();
        let result = self
            .persistence
            .save(LayoutKey::Dock, &dock)
            .and_then(|()| {
                for (page, ids) in pages.iter().enumerate() {
                    self.persistence.save(LayoutKey::HomePage(page), ids)?;
                }
                self.persistence.save(LayoutKey::HomePage(pages.len()), &[])
            });
        match &result {
            Ok(()) => log::info!(
                "Saved layout: {} dock, {} home across {} page(s)",
                dock.len(),
                home.len(),
                pages.len()
            ),
            Err(e) => log::warn!("Saving layout failed: {e}"),
        }
        result
    }

    // -- Paging --

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.store.page_count(self.config.page_size)
    }

    /// Jump to `page`, clamped to the last page.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.page_count() - 1);
    }

    pub fn next_page(&mut self) -> bool {
        let before = self.page;
        self.set_page(self.page + 1);
        self.page != before
    }

    pub fn prev_page(&mut self) -> bool {
        let before = self.page;
        self.page = self.page.saturating_sub(1);
        self.page != before
    }

    pub fn current_page_apps(&self) -> &[AppEntry] {
        self.store.home_page(self.page, self.config.page_size)
    }

    fn clamp_page(&mut self) {
        self.set_page(self.page);
    }
}

impl std::fmt::Debug for Launcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Launcher")
            .field("apps", &self.store.catalog().len())
            .field("version", &self.store.version())
            .field("page", &self.page)
            .field("catalog_error", &self.catalog_error)
            .finish_non_exhaustive()
    }
}
