//! Launchable app entries and their library categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Library category an app is filed under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Photography,
    Entertainment,
    Communication,
    Games,
    Navigation,
    #[default]
    Other,
}

impl Category {
    /// All categories, in declaration order.
    pub const ALL: [Category; 6] = [
        Category::Photography,
        Category::Entertainment,
        Category::Communication,
        Category::Games,
        Category::Navigation,
        Category::Other,
    ];

    /// Display label shown as the library section header.
    pub fn label(self) -> &'static str {
        match self {
            Self::Photography => "Photography",
            Self::Entertainment => "Entertainment",
            Self::Communication => "Communication",
            Self::Games => "Games",
            Self::Navigation => "Navigation",
            Self::Other => "Other",
        }
    }

    /// Guess a category from a package name.
    ///
    /// Matches are substring checks in priority order; anything unmatched
    /// lands in `Other`.
    pub fn from_package_name(package: &str) -> Self {
        let p = package.to_lowercase();
        if p.contains("camera") {
            Self::Photography
        } else if p.contains("music") || p.contains("audio") {
            Self::Entertainment
        } else if p.contains("mail") || p.contains("messaging") {
            Self::Communication
        } else if p.contains("game") {
            Self::Games
        } else if p.contains("map") || p.contains("navigation") {
            Self::Navigation
        } else {
            Self::Other
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A launchable app as supplied by the catalog.
///
/// Entries are immutable for the session. The package name is the identity;
/// `position` is an advisory hint from enumeration order and is never used to
/// order a slot sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppEntry {
    pub package: String,
    pub label: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default = "unknown_position")]
    pub position: i32,
    #[serde(default)]
    pub dock_default: bool,
}

fn unknown_position() -> i32 {
    -1
}

impl AppEntry {
    /// Create an entry with the default category and no dock flag.
    pub fn new(package: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            label: label.into(),
            category: Category::Other,
            position: -1,
            dock_default: false,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    pub fn with_dock_default(mut self, dock_default: bool) -> Self {
        self.dock_default = dock_default;
        self
    }
}
