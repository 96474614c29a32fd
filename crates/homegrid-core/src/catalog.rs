//! The installed-app catalog seam.
//!
//! The OS package catalog is an external collaborator: it enumerates
//! launchable apps and hands a package name to the system to launch. The
//! engine only sees it through [`AppCatalog`]. [`StaticCatalog`] is the
//! in-memory implementation used by tests and the demo binary.

use std::sync::Mutex;

use serde::Deserialize;

use crate::app::{AppEntry, Category};
use crate::error::{LauncherError, Result};

/// Number of leading apps (in label order) flagged as dock defaults when a
/// record does not say otherwise.
pub const DEFAULT_DOCK_COUNT: usize = 4;

/// Abstraction over the platform's installed-app enumeration.
pub trait AppCatalog: Send + Sync {
    /// All launchable apps, sorted by label (case-insensitive), excluding the
    /// launcher itself.
    fn list(&self) -> Result<Vec<AppEntry>>;

    /// Ask the platform to launch `package`. Best effort; the result is only
    /// used for logging.
    fn launch(&self, package: &str) -> Result<()>;
}

/// Sort apps by label, case-insensitively. Stable, so equal labels keep
/// their enumeration order.
pub fn sort_by_label(apps: &mut [AppEntry]) {
    apps.sort_by_cached_key(|a| a.label.to_lowercase());
}

/// One raw app as enumerated by a platform (or listed in a manifest).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogRecord {
    pub package: String,
    pub label: String,
    /// Explicit category; guessed from the package name when absent.
    #[serde(default)]
    pub category: Option<Category>,
    /// Explicit dock-default flag; the first [`DEFAULT_DOCK_COUNT`] apps in
    /// label order get it when absent.
    #[serde(default)]
    pub dock: Option<bool>,
}

impl CatalogRecord {
    pub fn new(package: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            label: label.into(),
            category: None,
            dock: None,
        }
    }
}

/// A catalog manifest file: a list of `[[app]]` tables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogManifest {
    #[serde(default, rename = "app")]
    pub apps: Vec<CatalogRecord>,
}

impl CatalogManifest {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

/// Turn raw records into catalog entries: drop the launcher's own package,
/// sort by label, assign position hints, categories and dock defaults.
pub fn enumerate(records: Vec<CatalogRecord>, self_package: &str) -> Vec<AppEntry> {
    let mut records: Vec<CatalogRecord> = records
        .into_iter()
        .filter(|r| r.package != self_package)
        .collect();
    records.sort_by_cached_key(|r| r.label.to_lowercase());

    let mut seen = std::collections::HashSet::new();
    let mut apps = Vec::with_capacity(records.len());
    for r in records {
        // A package with several launcher activities is listed once.
        if !seen.insert(r.package.clone()) {
            continue;
        }
        let index = apps.len();
        let category = r
            .category
            .unwrap_or_else(|| Category::from_package_name(&r.package));
        let dock_default = r.dock.unwrap_or(index < DEFAULT_DOCK_COUNT);
        apps.push(
            AppEntry::new(r.package, r.label)
                .with_category(category)
                .with_position(index as i32)
                .with_dock_default(dock_default),
        );
    }
    apps
}

/// In-memory catalog with a fixed app list.
///
/// `launch` succeeds for known packages and records them, so callers can
/// observe what was launched.
#[derive(Debug)]
pub struct StaticCatalog {
    apps: Vec<AppEntry>,
    launched: Mutex<Vec<String>>,
}

impl StaticCatalog {
    /// Wrap an already-prepared app list. The list is sorted by label.
    pub fn new(mut apps: Vec<AppEntry>) -> Self {
        sort_by_label(&mut apps);
        Self {
            apps,
            launched: Mutex::new(Vec::new()),
        }
    }

    /// Build from raw records using the enumeration rules of [`enumerate`].
    pub fn from_records(records: Vec<CatalogRecord>, self_package: &str) -> Self {
        Self {
            apps: enumerate(records, self_package),
            launched: Mutex::new(Vec::new()),
        }
    }

    /// Build from a TOML manifest of `[[app]]` tables.
    pub fn from_manifest_str(s: &str, self_package: &str) -> Result<Self> {
        let manifest = CatalogManifest::from_toml_str(s)?;
        Ok(Self::from_records(manifest.apps, self_package))
    }

    /// Packages launched so far, in order.
    pub fn launched(&self) -> Vec<String> {
        self.launched
            .lock()
            .map(|l| l.clone())
            .unwrap_or_default()
    }
}

impl AppCatalog for StaticCatalog {
    fn list(&self) -> Result<Vec<AppEntry>> {
        Ok(self.apps.clone())
    }

    fn launch(&self, package: &str) -> Result<()> {
        if !self.apps.iter().any(|a| a.package == package) {
            return Err(LauncherError::Launch(format!(
                "no launchable app for {package}"
            )));
        }
        if let Ok(mut launched) = self.launched.lock() {
            launched.push(package.to_string());
        }
        Ok(())
    }
}
