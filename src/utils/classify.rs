//! Ignore rules, code classification, language detection and file icons.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Names and wildcard patterns ignored in every scan.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    "__pycache__",
    ".git",
    ".gitignore",
    ".ds_store",
    "node_modules",
    ".env",
    ".venv",
    "venv",
    "env",
    ".pytest_cache",
    ".mypy_cache",
    "dist",
    "build",
    ".idea",
    ".vscode",
    "*.pyc",
    "*.pyo",
    "*.pyd",
    ".coverage",
    "htmlcov",
    ".tox",
    ".cache",
    "eggs",
    "*.egg-info",
    "logs",
    "*.log",
    ".npm",
    ".yarn",
    "package-lock.json",
    "yarn.lock",
];

static CODE_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        ".py",
        ".js",
        ".ts",
        ".tsx",
        ".jsx",
        ".java",
        ".cpp",
        ".c",
        ".h",
        ".cs",
        ".php",
        ".rb",
        ".go",
        ".rs",
        ".swift",
        ".kt",
        ".scala",
        ".html",
        ".css",
        ".scss",
        ".sass",
        ".less",
        ".vue",
        ".svelte",
        ".sql",
        ".sh",
        ".bat",
        ".ps1",
        ".yml",
        ".yaml",
        ".json",
        ".xml",
        ".md",
        ".rst",
        ".txt",
        ".dockerfile",
        ".config",
        ".conf",
    ]
    .into_iter()
    .collect()
});

static LANGUAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (".py", "Python"),
        (".js", "JavaScript"),
        (".ts", "TypeScript"),
        (".tsx", "TypeScript"),
        (".jsx", "JavaScript"),
        (".java", "Java"),
        (".cpp", "C++"),
        (".c", "C"),
        (".cs", "C#"),
        (".php", "PHP"),
        (".rb", "Ruby"),
        (".go", "Go"),
        (".rs", "Rust"),
        (".swift", "Swift"),
        (".kt", "Kotlin"),
        (".scala", "Scala"),
        (".html", "HTML"),
        (".css", "CSS"),
        (".scss", "SCSS"),
        (".sql", "SQL"),
    ])
});

static ICONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (".py", "🐍"),
        (".js", "📜"),
        (".ts", "📘"),
        (".tsx", "⚛️"),
        (".jsx", "⚛️"),
        (".html", "🌐"),
        (".css", "🎨"),
        (".scss", "🎨"),
        (".json", "📋"),
        (".md", "📖"),
        (".txt", "📄"),
        (".yml", "⚙️"),
        (".yaml", "⚙️"),
        (".dockerfile", "🐳"),
        (".sql", "🗄️"),
        (".sh", "⚡"),
        (".bat", "⚡"),
        (".xml", "📄"),
        (".csv", "📊"),
        (".log", "📝"),
        (".env", "🔐"),
    ])
});

const DEFAULT_ICON: &str = "📄";

/// A single ignore rule. Exactly one match mode applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IgnoreRule {
    /// Whole-name match, e.g. `dist`.
    Exact(String),
    /// `*ext` matches names ending with `ext`.
    Suffix(String),
    /// `prefix*` matches names starting with `prefix`.
    Prefix(String),
}

impl IgnoreRule {
    /// Parse a pattern, lower-casing it. A leading `*` wins over a trailing one.
    pub fn parse(pattern: &str) -> Self {
        let pattern = pattern.trim().to_lowercase();
        if let Some(rest) = pattern.strip_prefix('*') {
            IgnoreRule::Suffix(rest.to_string())
        } else if let Some(rest) = pattern.strip_suffix('*') {
            IgnoreRule::Prefix(rest.to_string())
        } else {
            IgnoreRule::Exact(pattern)
        }
    }

    /// `name` must already be lower-cased.
    fn matches(&self, name: &str) -> bool {
        match self {
            IgnoreRule::Exact(exact) => name == exact,
            IgnoreRule::Suffix(suffix) => name.ends_with(suffix.as_str()),
            IgnoreRule::Prefix(prefix) => name.starts_with(prefix.as_str()),
        }
    }
}

/// Ordered, append-only set of ignore rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRules {
    rules: Vec<IgnoreRule>,
}

impl IgnoreRules {
    pub fn with_defaults() -> Self {
        Self { rules: DEFAULT_IGNORE_PATTERNS.iter().map(|p| IgnoreRule::parse(p)).collect() }
    }

    /// Append caller-supplied patterns. Defaults are never removed.
    pub fn extend<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            let pattern = pattern.as_ref();
            if pattern.trim().is_empty() {
                continue;
            }
            let rule = IgnoreRule::parse(pattern);
            if !self.rules.contains(&rule) {
                self.rules.push(rule);
            }
        }
    }

    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Check whether the final component of `path` matches any rule, case-insensitively.
pub fn should_ignore(path: &Path, rules: &IgnoreRules) -> bool {
    let name = path.file_name().map(|n| n.to_string_lossy().to_lowercase()).unwrap_or_default();
    if name.is_empty() {
        return false;
    }
    rules.rules.iter().any(|rule| rule.matches(&name))
}

/// Lower-cased extension with its leading dot, or an empty string.
pub fn extension_of(path: &Path) -> String {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!(".{}", ext.to_lowercase()),
        _ => String::new(),
    }
}

pub fn is_code(extension: &str) -> bool {
    CODE_EXTENSIONS.contains(extension.to_lowercase().as_str())
}

/// Language name for a code extension. `None` means "unclassified", which is
/// not the same as "not code".
pub fn detect_language(extension: &str) -> Option<&'static str> {
    LANGUAGES.get(extension.to_lowercase().as_str()).copied()
}

pub fn file_icon(extension: &str) -> &'static str {
    ICONS.get(extension.to_lowercase().as_str()).copied().unwrap_or(DEFAULT_ICON)
}
