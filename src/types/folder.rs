use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::bookmark::Bookmark;

/// The fixed set of stored bookmark categories.
///
/// `General` is the default everywhere a record carries no category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[default]
    General,
    #[serde(rename = "Reading List")]
    ReadingList,
    Work,
    Personal,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "General",
            Category::ReadingList => "Reading List",
            Category::Work => "Work",
            Category::Personal => "Personal",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "General" => Ok(Category::General),
            "Reading List" => Ok(Category::ReadingList),
            "Work" => Ok(Category::Work),
            "Personal" => Ok(Category::Personal),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Error returned when parsing a category label that is not in the fixed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

/// Static sidebar folder entry: identifier, display label, icon tag.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Folder {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

/// The sidebar folder list. `all` is a view-only filter sentinel, never a
/// stored category value.
pub const FOLDERS: [Folder; 5] = [
    Folder { id: "all", label: "All Bookmarks", icon: "settings" },
    Folder { id: "General", label: "General", icon: "folder" },
    Folder { id: "Reading List", label: "Reading List", icon: "docs" },
    Folder { id: "Work", label: "Work", icon: "briefcase" },
    Folder { id: "Personal", label: "Personal", icon: "person" },
];

/// Folder selection applied by the projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FolderFilter {
    /// The `all` sentinel: no category filtering.
    #[default]
    All,
    Category(Category),
}

impl FolderFilter {
    /// Parses a sidebar folder id. Unknown ids fall back to `All`.
    pub fn parse(id: &str) -> Self {
        if id == "all" {
            FolderFilter::All
        } else {
            id.parse::<Category>()
                .map(FolderFilter::Category)
                .unwrap_or(FolderFilter::All)
        }
    }

    /// Whether a bookmark passes this folder selection. A record with no
    /// category counts as `General`.
    pub fn matches(&self, bookmark: &Bookmark) -> bool {
        match self {
            FolderFilter::All => true,
            FolderFilter::Category(c) => bookmark.effective_category() == *c,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FolderFilter::All => "all",
            FolderFilter::Category(c) => c.as_str(),
        }
    }
}
