//! Project scanner: builds the structural tree, flat file list and statistics.

use crate::domain::{
    DirectoryNode, FileNode, FileRecord, ProjectModel, Statistics, TreeNode, MAX_SCAN_FILES,
    PREVIEW_CHARS, PREVIEW_MAX_FILE_BYTES,
};
use crate::scan::ScanError;
use crate::utils::{
    detect_language, extension_of, is_code, normalize_path, read_preview, should_ignore,
    IgnoreRules,
};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Walks a project directory depth-first in name order.
pub struct ProjectScanner {
    root_path: PathBuf,
    ignore_rules: IgnoreRules,
    max_files: usize,
    follow_symlinks: bool,
}

/// Flat results collected during the walk.
#[derive(Debug, Default)]
struct ScanAccumulator {
    files: Vec<FileRecord>,
    directories: Vec<String>,
    stats: Statistics,
}

impl ScanAccumulator {
    /// Count one more file, failing once the ceiling is exceeded.
    fn admit_file(&mut self, limit: usize) -> Result<(), ScanError> {
        self.stats.total_files += 1;
        if self.stats.total_files > limit {
            return Err(ScanError::TooManyFiles { limit });
        }
        Ok(())
    }

    fn record_file(&mut self, record: FileRecord) {
        self.stats.total_size += record.size;
        if !record.extension.is_empty() {
            *self.stats.file_types.entry(record.extension.clone()).or_insert(0) += 1;
        }
        if record.is_code {
            self.stats.code_files += 1;
            if let Some(language) = detect_language(&record.extension) {
                self.stats.languages.insert(language.to_string());
            }
        }
        self.files.push(record);
    }

    fn record_directory(&mut self, relative_path: &str) {
        self.stats.total_directories += 1;
        self.directories.push(relative_path.to_string());
    }
}

/// Rebuilds the nested structure from a pre-order walk. `stack[d]` is the
/// open directory at depth `d`; the root is always `stack[0]`.
struct TreeBuilder {
    stack: Vec<DirectoryNode>,
}

impl TreeBuilder {
    fn new(root: DirectoryNode) -> Self {
        Self { stack: vec![root] }
    }

    /// Close open directories until the one at `depth - 1` is on top.
    fn unwind_to(&mut self, depth: usize) {
        while self.stack.len() > depth.max(1) {
            if let Some(done) = self.stack.pop() {
                if let Some(parent) = self.stack.last_mut() {
                    parent.items.push(TreeNode::Directory(done));
                }
            }
        }
    }

    fn open_directory(&mut self, depth: usize, node: DirectoryNode) {
        self.unwind_to(depth);
        self.stack.push(node);
    }

    fn add_file(&mut self, depth: usize, node: FileNode) {
        self.unwind_to(depth);
        if let Some(parent) = self.stack.last_mut() {
            parent.items.push(TreeNode::File(node));
        }
    }

    fn finish(mut self) -> DirectoryNode {
        self.unwind_to(1);
        self.stack.pop().unwrap_or_default()
    }
}

impl ProjectScanner {
    /// Create a scanner with the default ignore rules and file ceiling.
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            root_path,
            ignore_rules: IgnoreRules::with_defaults(),
            max_files: MAX_SCAN_FILES,
            follow_symlinks: false,
        }
    }

    /// Append ignore names on top of the defaults
    pub fn extra_ignores<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignore_rules.extend(names);
        self
    }

    /// Set the number of files after which the scan aborts
    pub fn max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    /// Set whether to follow symbolic links when scanning. Links that lead
    /// back to an ancestor directory are skipped.
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Scan the project. Entries are visited in lexicographic name order, so
    /// an unchanged tree always yields the same model.
    pub fn scan(&self) -> Result<ProjectModel, ScanError> {
        let root = self
            .root_path
            .canonicalize()
            .map_err(|_| ScanError::NotADirectory(self.root_path.clone()))?;
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(self.root_path.clone()));
        }

        let project_name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());

        let mut acc = ScanAccumulator::default();
        let mut tree = TreeBuilder::new(DirectoryNode {
            name: project_name.clone(),
            path: String::new(),
            items: Vec::new(),
        });

        let walker = WalkDir::new(&root)
            .min_depth(1)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !should_ignore(entry.path(), &self.ignore_rules));

        for entry_result in walker {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(err) => {
                    skip_walk_error(err)?;
                    continue;
                }
            };

            if entry.path_is_symlink() && !self.follow_symlinks {
                tracing::debug!("Skipping symlink {}", entry.path().display());
                continue;
            }

            let file_type = entry.file_type();
            let depth = entry.depth();
            let name = entry.file_name().to_string_lossy().into_owned();
            let relative_path = relative_key(&root, entry.path());

            if file_type.is_dir() {
                acc.record_directory(&relative_path);
                tree.open_directory(
                    depth,
                    DirectoryNode { name, path: relative_path, items: Vec::new() },
                );
            } else if file_type.is_file() {
                acc.admit_file(self.max_files)?;
                let record = build_file_record(&entry, name, relative_path);
                tree.add_file(
                    depth,
                    FileNode {
                        name: record.name.clone(),
                        path: record.relative_path.clone(),
                        size: record.size,
                        extension: record.extension.clone(),
                    },
                );
                acc.record_file(record);
            } else {
                tracing::debug!("Skipping special file {}", entry.path().display());
            }
        }

        tracing::info!(
            "Scanned {}: {} files in {} directories",
            root.display(),
            acc.stats.total_files,
            acc.stats.total_directories
        );

        Ok(ProjectModel {
            structure: tree.finish(),
            project_name,
            root_path: root,
            files: acc.files,
            directories: acc.directories,
            statistics: acc.stats,
        })
    }
}

/// Decide whether a walk error only costs a subtree or ends the scan.
fn skip_walk_error(err: walkdir::Error) -> Result<(), ScanError> {
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    if let Some(ancestor) = err.loop_ancestor() {
        tracing::debug!("Skipping {} (links back to {})", path.display(), ancestor.display());
        return Ok(());
    }
    match err.io_error().map(|io| io.kind()) {
        Some(ErrorKind::PermissionDenied) => {
            tracing::warn!("Permission denied, skipping {}", path.display());
            Ok(())
        }
        Some(ErrorKind::NotFound) => {
            tracing::debug!("Skipping broken link {}", path.display());
            Ok(())
        }
        _ => {
            let message = err.to_string();
            let source = err
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::new(ErrorKind::Other, message));
            Err(ScanError::Io { path, source })
        }
    }
}

/// `/`-separated path of `path` below `root`.
fn relative_key(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    normalize_path(&relative.to_string_lossy())
}

/// Build the record for one file, reading a preview only for small code files.
fn build_file_record(entry: &DirEntry, name: String, relative_path: String) -> FileRecord {
    let path = entry.path();
    let size = entry.metadata().map(|m| m.len()).unwrap_or_else(|err| {
        tracing::warn!("Cannot stat {}: {}", path.display(), err);
        0
    });
    let extension = extension_of(path);
    let is_code = is_code(&extension);

    let (content_preview, line_count) = if is_code && size < PREVIEW_MAX_FILE_BYTES {
        match read_preview(path, PREVIEW_CHARS) {
            Ok((preview, lines)) => (Some(preview), Some(lines)),
            Err(err) => {
                tracing::debug!("No preview for {}: {:#}", path.display(), err);
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    FileRecord {
        name,
        path: path.to_path_buf(),
        relative_path,
        size,
        extension,
        is_code,
        content_preview,
        line_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_files(root: &Path, count: usize) {
        for idx in 0..count {
            fs::write(root.join(format!("f{idx:04}.txt")), "x").unwrap();
        }
    }

    #[test]
    fn test_scanner_python_file_with_ignored_node_modules() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        let source: String = (0..200).map(|i| format!("print({i})\n")).collect();
        fs::write(root.join("a.py"), &source).unwrap();
        fs::create_dir_all(root.join("node_modules/react")).unwrap();
        fs::write(root.join("node_modules/react/index.js"), "module.exports = {}").unwrap();

        let model = ProjectScanner::new(root.to_path_buf()).scan().unwrap();
        let stats = &model.statistics;

        assert_eq!(stats.total_files, 1);
        assert_eq!(stats.code_files, 1);
        assert_eq!(stats.total_directories, 0);
        assert_eq!(stats.languages.iter().collect::<Vec<_>>(), vec!["Python"]);
        assert!(model.directories.is_empty());
        assert_eq!(model.structure.items.len(), 1);
        assert!(model.files.iter().all(|f| !f.relative_path.contains("node_modules")));

        let file = &model.files[0];
        assert_eq!(file.relative_path, "a.py");
        assert_eq!(file.line_count, Some(200));
        assert_eq!(file.content_preview.as_ref().unwrap().chars().count(), 500);
    }

    #[test]
    fn test_scanner_builds_nested_structure_in_name_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("src/api")).unwrap();
        fs::write(root.join("src/main.rs"), "fn main() {}").unwrap();
        fs::write(root.join("src/api/v1.rs"), "pub fn v1() {}").unwrap();
        fs::write(root.join("README.md"), "# Demo").unwrap();
        fs::write(root.join("Cargo.toml"), "[package]").unwrap();

        let model = ProjectScanner::new(root.to_path_buf()).scan().unwrap();

        let top: Vec<&str> = model.structure.items.iter().map(TreeNode::name).collect();
        assert_eq!(top, vec!["Cargo.toml", "README.md", "src"]);
        assert_eq!(model.directories, vec!["src".to_string(), "src/api".to_string()]);

        let paths: Vec<&str> = model.files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["Cargo.toml", "README.md", "src/api/v1.rs", "src/main.rs"]);

        assert_eq!(model.statistics.total_directories, 2);
        assert_eq!(model.statistics.file_types.get(".rs"), Some(&2));
        assert_eq!(model.statistics.file_types.get(".toml"), Some(&1));
        // .toml is not in the code allow-list
        assert_eq!(model.statistics.code_files, 3);
    }

    #[test]
    fn test_scanner_is_deterministic() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("b/c")).unwrap();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("b/c/z.py"), "z = 1").unwrap();
        fs::write(root.join("a/y.js"), "let y;").unwrap();
        fs::write(root.join("x.md"), "x").unwrap();

        let scanner = ProjectScanner::new(root.to_path_buf());
        let first = scanner.scan().unwrap();
        let second = scanner.scan().unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first.structure).unwrap(),
            serde_json::to_string(&second.structure).unwrap()
        );
    }

    #[test]
    fn test_scanner_accepts_exactly_the_file_ceiling() {
        let temp_dir = TempDir::new().unwrap();
        write_files(temp_dir.path(), 500);

        let model = ProjectScanner::new(temp_dir.path().to_path_buf()).scan().unwrap();
        assert_eq!(model.statistics.total_files, 500);
    }

    #[test]
    fn test_scanner_aborts_past_the_file_ceiling() {
        let temp_dir = TempDir::new().unwrap();
        write_files(temp_dir.path(), 501);

        let err = ProjectScanner::new(temp_dir.path().to_path_buf()).scan().unwrap_err();
        assert!(matches!(err, ScanError::TooManyFiles { limit: 500 }));
    }

    #[test]
    fn test_ignored_files_do_not_count_toward_ceiling() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_files(root, 3);
        for idx in 0..5 {
            fs::write(root.join(format!("run{idx}.log")), "log").unwrap();
        }

        let model = ProjectScanner::new(root.to_path_buf()).max_files(3).scan().unwrap();
        assert_eq!(model.statistics.total_files, 3);
    }

    #[test]
    fn test_preview_only_for_small_code_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("big.py"), "a".repeat(60_000)).unwrap();
        fs::write(root.join("image.png"), [0u8, 1, 2, 3]).unwrap();
        fs::write(root.join("small.py"), "print('hi')\n").unwrap();

        let model = ProjectScanner::new(root.to_path_buf()).scan().unwrap();
        for file in &model.files {
            assert_eq!(file.is_code, is_code(&file.extension));
            if file.content_preview.is_some() {
                assert!(file.is_code && file.size < PREVIEW_MAX_FILE_BYTES);
            }
        }

        let by_name = |name: &str| model.files.iter().find(|f| f.name == name).unwrap();
        assert!(by_name("big.py").content_preview.is_none());
        assert!(by_name("big.py").line_count.is_none());
        assert!(by_name("image.png").content_preview.is_none());
        assert!(!by_name("image.png").is_code);
        assert_eq!(by_name("small.py").content_preview.as_deref(), Some("print('hi')\n"));
    }

    #[test]
    fn test_extra_ignores_are_appended() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("fixtures")).unwrap();
        fs::write(root.join("fixtures/data.json"), "{}").unwrap();
        fs::create_dir_all(root.join("dist")).unwrap();
        fs::write(root.join("dist/bundle.js"), "").unwrap();
        fs::write(root.join("main.go"), "package main").unwrap();

        let model = ProjectScanner::new(root.to_path_buf())
            .extra_ignores(["Fixtures"])
            .scan()
            .unwrap();
        let paths: Vec<&str> = model.files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["main.go"]);
        assert!(model.directories.is_empty());
    }

    #[test]
    fn test_missing_root_is_not_a_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let err = ProjectScanner::new(missing).scan().unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory(_)));
    }

    #[test]
    fn test_file_root_is_not_a_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        let err = ProjectScanner::new(file).scan().unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_skipped_by_default() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("real.py"), "x = 1").unwrap();
        std::os::unix::fs::symlink(root.join("real.py"), root.join("link.py")).unwrap();
        std::os::unix::fs::symlink(root, root.join("loop")).unwrap();

        let model = ProjectScanner::new(root.to_path_buf()).scan().unwrap();
        assert_eq!(model.statistics.total_files, 1);

        let followed = ProjectScanner::new(root.to_path_buf()).follow_symlinks(true).scan().unwrap();
        assert_eq!(followed.statistics.total_files, 2);
        // the link back to the root is never entered
        assert!(followed.directories.is_empty());
        let top: Vec<&str> = followed.structure.items.iter().map(TreeNode::name).collect();
        assert_eq!(top, vec!["link.py", "real.py"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_followed_directory_link_is_nested() {
        let temp_dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("shared.rs"), "pub fn shared() {}").unwrap();
        std::os::unix::fs::symlink(outside.path(), temp_dir.path().join("vendor")).unwrap();

        let model = ProjectScanner::new(temp_dir.path().to_path_buf())
            .follow_symlinks(true)
            .scan()
            .unwrap();
        assert_eq!(model.directories, vec!["vendor".to_string()]);
        assert_eq!(model.files[0].relative_path, "vendor/shared.rs");
        match &model.structure.items[0] {
            TreeNode::Directory(dir) => assert_eq!(dir.items.len(), 1),
            other => panic!("expected directory, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_special_files_are_skipped() {
        use std::os::unix::net::UnixListener;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("main.py"), "print(1)").unwrap();
        let _socket = UnixListener::bind(root.join("server.py")).unwrap();

        let model = ProjectScanner::new(root.to_path_buf()).scan().unwrap();
        assert_eq!(model.statistics.total_files, 1);
        assert_eq!(model.files[0].name, "main.py");
        assert_eq!(model.structure.items.len(), 1);
    }

    #[test]
    fn test_nested_tree_closes_directories_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a/b/c")).unwrap();
        fs::write(root.join("a/b/c/deep.rs"), "").unwrap();
        fs::write(root.join("a/top.rs"), "").unwrap();
        fs::write(root.join("z.rs"), "").unwrap();

        let model = ProjectScanner::new(root.to_path_buf()).scan().unwrap();
        let rendered = crate::scan::render_tree(&model.structure);
        assert_eq!(rendered, "├─ a\n│  ├─ b\n│  │  └─ c\n│  │     └─ deep.rs\n│  └─ top.rs\n└─ z.rs\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_permission_denied_subtree_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("locked")).unwrap();
        fs::write(root.join("locked/secret.py"), "x").unwrap();
        fs::write(root.join("open.py"), "y").unwrap();
        fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o000)).unwrap();

        // privileged users can list the directory anyway
        let denied = fs::read_dir(root.join("locked")).is_err();
        let result = ProjectScanner::new(root.to_path_buf()).scan();
        fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o755)).unwrap();

        let model = result.unwrap();
        assert_eq!(model.directories, vec!["locked".to_string()]);
        if denied {
            assert_eq!(model.statistics.total_files, 1);
            assert_eq!(model.files[0].relative_path, "open.py");
        }
    }
}
