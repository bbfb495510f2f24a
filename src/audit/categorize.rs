//! File categorization by path patterns.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Semantic category of a changed file.
///
/// Declaration order is the matching priority; `Code` is the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    /// Test sources and fixtures.
    Test,
    /// Documentation.
    Docs,
    /// Configuration files.
    Config,
    /// Continuous integration definitions.
    Ci,
    /// Stylesheets.
    Style,
    /// Build scripts and manifests.
    Build,
    /// Anything else.
    Code,
}

impl FileCategory {
    /// Pattern-backed categories in priority order.
    pub const MATCHED: [Self; 6] = [
        Self::Test,
        Self::Docs,
        Self::Config,
        Self::Ci,
        Self::Style,
        Self::Build,
    ];

    /// Returns the lowercase category name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Docs => "docs",
            Self::Config => "config",
            Self::Ci => "ci",
            Self::Style => "style",
            Self::Build => "build",
            Self::Code => "code",
        }
    }

    /// Case-insensitive patterns that claim a path for this category.
    const fn patterns(self) -> &'static [&'static str] {
        match self {
            Self::Test => &[
                r"test",
                r"spec",
                r"__tests__",
                r"_test\.",
                r"\.test\.",
                r"\.spec\.",
            ],
            Self::Docs => &[
                r"\.md$",
                r"\.rst$",
                r"\.txt$",
                r"README",
                r"CHANGELOG",
                r"LICENSE",
                r"docs/",
            ],
            Self::Config => &[
                r"\.json$",
                r"\.ya?ml$",
                r"\.toml$",
                r"\.ini$",
                r"\.cfg$",
                r"\.env",
                r"\.config",
            ],
            Self::Ci => &[r"\.github/", r"\.gitlab-ci", r"Jenkinsfile", r"\.circleci", r"\.travis"],
            Self::Style => &[r"\.css$", r"\.scss$", r"\.less$", r"\.styled\.", r"styles?/"],
            Self::Build => &[
                r"Makefile",
                r"Dockerfile",
                r"docker-compose",
                r"package\.json$",
                r"Cargo\.toml$",
            ],
            Self::Code => &[],
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[allow(clippy::unwrap_used)] // Compile-time constant regex patterns
static CATEGORY_PATTERNS: LazyLock<Vec<(FileCategory, Regex)>> = LazyLock::new(|| {
    FileCategory::MATCHED
        .into_iter()
        .map(|category| {
            let alternation = category.patterns().join("|");
            let regex = Regex::new(&format!("(?i)(?:{alternation})")).unwrap();
            (category, regex)
        })
        .collect()
});

/// Assigns a path to the first category (in priority order) with a matching pattern.
pub fn categorize(path: &str) -> FileCategory {
    CATEGORY_PATTERNS
        .iter()
        .find(|(_, regex)| regex.is_match(path))
        .map_or(FileCategory::Code, |(category, _)| *category)
}

/// Paths paired with their category, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Categorized {
    assignments: Vec<(String, FileCategory)>,
}

impl Categorized {
    /// Returns `true` if at least one path falls in `category`.
    pub fn contains(&self, category: FileCategory) -> bool {
        self.assignments.iter().any(|(_, c)| *c == category)
    }

    /// Paths in `category`, in input order.
    pub fn paths_in(&self, category: FileCategory) -> Vec<&str> {
        self.assignments
            .iter()
            .filter(|(_, c)| *c == category)
            .map(|(path, _)| path.as_str())
            .collect()
    }

    /// Paths outside `category`, in input order.
    pub fn paths_outside(&self, category: FileCategory) -> Vec<&str> {
        self.assignments
            .iter()
            .filter(|(_, c)| *c != category)
            .map(|(path, _)| path.as_str())
            .collect()
    }

    /// Paths grouped by category.
    pub fn by_category(&self) -> BTreeMap<FileCategory, Vec<&str>> {
        let mut grouped: BTreeMap<FileCategory, Vec<&str>> = BTreeMap::new();
        for (path, category) in &self.assignments {
            grouped.entry(*category).or_default().push(path);
        }
        grouped
    }

    /// Number of paths per non-empty category.
    pub fn counts(&self) -> BTreeMap<FileCategory, usize> {
        let mut counts = BTreeMap::new();
        for (_, category) in &self.assignments {
            *counts.entry(*category).or_insert(0) += 1;
        }
        counts
    }
}

/// Categorizes every path. Each path lands in exactly one category.
pub fn categorize_paths<'a>(paths: impl IntoIterator<Item = &'a str>) -> Categorized {
    Categorized {
        assignments: paths
            .into_iter()
            .map(|path| (path.to_string(), categorize(path)))
            .collect(),
    }
}
