//! Background catalog refresh.
//!
//! Enumerating installed apps can be slow, so the launcher may run it on a
//! worker thread. The result comes back over a channel and is applied by the
//! owner of the store, which stays the only writer.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::JoinHandle;

use crate::app::AppEntry;
use crate::catalog::AppCatalog;
use crate::error::{LauncherError, Result};

/// An in-flight catalog enumeration.
#[derive(Debug)]
pub struct RefreshHandle {
    rx: Receiver<Result<Vec<AppEntry>>>,
    thread: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    /// Spawn a worker that calls [`AppCatalog::list`] once.
    pub fn spawn(catalog: Arc<dyn AppCatalog>) -> Self {
        let (tx, rx) = mpsc::channel();
        let thread = std::thread::spawn(move || {
            // Receiver gone means the refresh was superseded; nothing to do.
            let _ = tx.send(catalog.list());
        });
        log::debug!("Catalog refresh started");
        Self {
            rx,
            thread: Some(thread),
        }
    }

    /// Take the result if the worker has finished. `None` while running.
    pub fn try_take(&mut self) -> Option<Result<Vec<AppEntry>>> {
        match self.rx.try_recv() {
            Ok(result) => {
                self.join();
                Some(result)
            },
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.join();
                Some(Err(LauncherError::CatalogUnavailable(
                    "refresh worker exited without a result".into(),
                )))
            },
        }
    }

    /// Block until the worker finishes.
    pub fn wait(mut self) -> Result<Vec<AppEntry>> {
        let result = self.rx.recv().unwrap_or_else(|_| {
            Err(LauncherError::CatalogUnavailable(
                "refresh worker exited without a result".into(),
            ))
        });
        self.join();
        result
    }

    fn join(&mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::warn!("Catalog refresh worker panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;

    struct Broken;

    impl AppCatalog for Broken {
        fn list(&self) -> Result<Vec<AppEntry>> {
            Err(LauncherError::CatalogUnavailable("package manager down".into()))
        }

        fn launch(&self, _package: &str) -> Result<()> {
            Ok(())
        }
    }

    struct Panicking;

    impl AppCatalog for Panicking {
        fn list(&self) -> Result<Vec<AppEntry>> {
            panic!("enumeration crashed");
        }

        fn launch(&self, _package: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn wait_returns_catalog() {
        let catalog = Arc::new(StaticCatalog::new(vec![
            AppEntry::new("b", "Beta"),
            AppEntry::new("a", "Alpha"),
        ]));
        let apps = RefreshHandle::spawn(catalog).wait().unwrap();
        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].label, "Alpha");
    }

    #[test]
    fn wait_propagates_error() {
        let err = RefreshHandle::spawn(Arc::new(Broken)).wait().unwrap_err();
        assert!(matches!(err, LauncherError::CatalogUnavailable(_)));
    }

    #[test]
    fn try_take_eventually_yields() {
        let mut handle = RefreshHandle::spawn(Arc::new(StaticCatalog::new(Vec::new())));
        let result = loop {
            if let Some(r) = handle.try_take() {
                break r;
            }
            std::thread::yield_now();
        };
        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn panicking_worker_is_unavailable() {
        let err = RefreshHandle::spawn(Arc::new(Panicking)).wait().unwrap_err();
        assert!(matches!(err, LauncherError::CatalogUnavailable(_)));
    }
}
