//! Catalog backed by a TOML manifest whose apps launch as host processes.

use std::collections::HashMap;
use std::path::Path;
use std::process::{Command, Stdio};

use serde::Deserialize;

use homegrid_core::app::AppEntry;
use homegrid_core::catalog::{AppCatalog, CatalogRecord, enumerate};
use homegrid_core::error::{LauncherError, Result};

#[derive(Debug, Deserialize)]
struct ManifestApp {
    #[serde(flatten)]
    record: CatalogRecord,
    /// Command line run on launch.
    #[serde(default)]
    exec: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default, rename = "app")]
    apps: Vec<ManifestApp>,
}

/// Apps listed in a manifest, launched by spawning their `exec` command.
#[derive(Debug)]
pub struct ProcessCatalog {
    apps: Vec<AppEntry>,
    exec: HashMap<String, String>,
}

impl ProcessCatalog {
    pub fn from_toml_str(s: &str, self_package: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(s)?;
        let mut exec = HashMap::new();
        let mut records = Vec::with_capacity(manifest.apps.len());
        for app in manifest.apps {
            if let Some(cmd) = app.exec {
                exec.insert(app.record.package.clone(), cmd);
            }
            records.push(app.record);
        }
        Ok(Self {
            apps: enumerate(records, self_package),
            exec,
        })
    }

    pub fn load(path: &Path, self_package: &str) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&text, self_package)?;
        log::info!(
            "Loaded {} apps from {}",
            catalog.apps.len(),
            path.display()
        );
        Ok(catalog)
    }
}

impl AppCatalog for ProcessCatalog {
    fn list(&self) -> Result<Vec<AppEntry>> {
        Ok(self.apps.clone())
    }

    fn launch(&self, package: &str) -> Result<()> {
        let cmd = self
            .exec
            .get(package)
            .ok_or_else(|| LauncherError::Launch(format!("{package} has no exec command")))?;
        let mut parts = cmd.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| LauncherError::Launch(format!("{package} has an empty exec command")))?;
        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|e| LauncherError::Launch(format!("{program}: {e}")))?;
        log::debug!("Spawned {package} as pid {}", child.id());
        // Reap in the background; the launcher never waits on apps.
        std::thread::spawn(move || {
            let _ = child.wait();
        });
        Ok(())
    }
}
