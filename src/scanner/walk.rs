//! Depth-first traversal with per-directory failure isolation
//!
//! Built on the ignore crate's walker. A directory that cannot be listed is
//! reported and skipped; siblings and ancestors continue. Roots are
//! independent of each other: an error under one root never aborts another.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::core::model::{Finding, Report, ScanError, ScanSummary};
use crate::core::paths::normalize_path;
use crate::scanner::detect;

/// Traversal configuration
///
/// The default is a raw scan that visits every file. Hidden-file and
/// gitignore filtering are opt-in.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanConfig {
    /// Skip hidden files and directories (dotfiles)
    pub skip_hidden: bool,
    /// Respect .gitignore, .ignore and global ignore rules
    pub respect_gitignore: bool,
}

/// Receiver for findings and recovered errors as the walk produces them
///
/// Callers choose how output is surfaced: the CLI streams lines, tests and
/// structured formats collect into a Report.
pub trait ScanSink {
    fn finding(&mut self, finding: Finding);
    fn error(&mut self, error: ScanError);
}

impl ScanSink for Report {
    fn finding(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    fn error(&mut self, error: ScanError) {
        self.errors.push(error);
    }
}

/// Scan a single root, emitting findings and errors to the sink
///
/// Findings are emitted in traversal order, which is unspecified. A root
/// that does not exist is reported as a walk error, not a panic.
pub fn scan_root(root: &Path, config: &ScanConfig, sink: &mut dyn ScanSink) -> ScanSummary {
    let mut summary = ScanSummary::default();

    if !root.exists() {
        summary.errors += 1;
        sink.error(ScanError::walk(
            normalize_path(root),
            "no such file or directory",
        ));
        return summary;
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(config.skip_hidden)
        .ignore(config.respect_gitignore)
        .parents(config.respect_gitignore)
        .git_ignore(config.respect_gitignore)
        .git_global(config.respect_gitignore)
        .git_exclude(config.respect_gitignore)
        .require_git(false)
        .follow_links(false);

    for entry in builder.build() {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                // The walker reports the failed listing and carries on with
                // siblings.
                summary.errors += 1;
                sink.error(walk_error(root, &err));
                continue;
            }
        };

        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }

        summary.files_seen += 1;

        let path = entry.path();
        if !detect::is_candidate(path) {
            continue;
        }
        summary.candidates += 1;

        match detect::inspect(path) {
            Ok(true) => {
                summary.findings += 1;
                sink.finding(Finding::new(normalize_path(path)));
            }
            Ok(false) => {}
            Err(err) => {
                summary.errors += 1;
                sink.error(err);
            }
        }
    }

    summary
}

/// Convert a walker error, attributing it to the path that failed
///
/// Falls back to the root when the error carries no path.
fn walk_error(root: &Path, err: &ignore::Error) -> ScanError {
    let path = error_path(err)
        .map(normalize_path)
        .unwrap_or_else(|| normalize_path(root));
    ScanError::walk(path, err.to_string())
}

fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path),
        ignore::Error::WithLineNumber { err, .. } => error_path(err),
        ignore::Error::WithDepth { err, .. } => error_path(err),
        ignore::Error::Loop { child, .. } => Some(child),
        ignore::Error::Partial(errs) => errs.iter().find_map(error_path),
        _ => None,
    }
}

/// Scan each root in turn, merging the per-root summaries
pub fn scan_roots(roots: &[PathBuf], config: &ScanConfig, sink: &mut dyn ScanSink) -> ScanSummary {
    let mut summary = ScanSummary::default();
    for root in roots {
        summary.merge(scan_root(root, config, sink));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::ErrorKind;
    use std::fs;
    use tempfile::tempdir;

    const BOTH: &str = "<Link href=\"/\">a</Link>\n<a href=\"/\">b</a>\n";
    const LINK_ONLY: &str = "<Link href=\"/\">a</Link>\n";

    fn scan_into_report(root: &Path, config: &ScanConfig) -> (Report, ScanSummary) {
        let mut report = Report::new();
        let summary = scan_root(root, config, &mut report);
        report.sort();
        (report, summary)
    }

    #[test]
    fn test_empty_tree() {
        let temp = tempdir().unwrap();
        let (report, summary) = scan_into_report(temp.path(), &ScanConfig::default());
        assert!(report.is_empty());
        assert_eq!(summary, ScanSummary::default());
    }

    #[test]
    fn test_extension_and_marker_filtering() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.tsx"), BOTH).unwrap();
        fs::write(temp.path().join("b.jsx"), LINK_ONLY).unwrap();
        fs::write(temp.path().join("c.txt"), BOTH).unwrap();

        let (report, summary) = scan_into_report(temp.path(), &ScanConfig::default());

        assert_eq!(report.findings.len(), 1);
        assert!(report.findings[0].path.ends_with("a.tsx"));
        assert!(report.errors.is_empty());
        assert_eq!(summary.files_seen, 3);
        assert_eq!(summary.candidates, 2);
        assert_eq!(summary.findings, 1);
    }

    #[test]
    fn test_recursion_into_subdirectories() {
        let temp = tempdir().unwrap();
        let nested = temp.path().join("src").join("pages");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("index.tsx"), BOTH).unwrap();
        fs::write(temp.path().join("top.js"), BOTH).unwrap();

        let (report, _) = scan_into_report(temp.path(), &ScanConfig::default());

        assert_eq!(report.findings.len(), 2);
        assert!(report
            .findings
            .iter()
            .any(|f| f.path.ends_with("src/pages/index.tsx")));
    }

    #[test]
    fn test_missing_root_is_reported_not_fatal() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("does-not-exist");

        let (report, summary) = scan_into_report(&missing, &ScanConfig::default());

        assert!(report.findings.is_empty());
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, ErrorKind::Walk);
        assert_eq!(summary.errors, 1);
    }

    #[test]
    fn test_roots_are_independent() {
        let temp = tempdir().unwrap();
        let good = temp.path().join("good");
        fs::create_dir(&good).unwrap();
        fs::write(good.join("ok.js"), BOTH).unwrap();

        let roots = vec![temp.path().join("missing"), good];
        let mut report = Report::new();
        let summary = scan_roots(&roots, &ScanConfig::default(), &mut report);

        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(summary.findings, 1);
        assert_eq!(summary.errors, 1);
    }

    #[test]
    fn test_rescan_is_deterministic_as_a_set() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.tsx"), BOTH).unwrap();
        fs::write(temp.path().join("b.js"), BOTH).unwrap();

        let (first, _) = scan_into_report(temp.path(), &ScanConfig::default());
        let (second, _) = scan_into_report(temp.path(), &ScanConfig::default());

        assert_eq!(first.findings, second.findings);
    }

    #[test]
    fn test_hidden_files_visited_by_default() {
        let temp = tempdir().unwrap();
        let hidden = temp.path().join(".cache");
        fs::create_dir(&hidden).unwrap();
        fs::write(hidden.join("nav.jsx"), BOTH).unwrap();

        let (report, _) = scan_into_report(temp.path(), &ScanConfig::default());
        assert_eq!(report.findings.len(), 1);

        let config = ScanConfig {
            skip_hidden: true,
            ..Default::default()
        };
        let (report, _) = scan_into_report(temp.path(), &config);
        assert!(report.findings.is_empty());
    }

    #[test]
    fn test_respect_gitignore() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(".gitignore"), "dist/\n").unwrap();
        let dist = temp.path().join("dist");
        fs::create_dir(&dist).unwrap();
        fs::write(dist.join("bundle.js"), BOTH).unwrap();
        fs::write(temp.path().join("app.jsx"), BOTH).unwrap();

        let (report, _) = scan_into_report(temp.path(), &ScanConfig::default());
        assert_eq!(report.findings.len(), 2);

        let config = ScanConfig {
            respect_gitignore: true,
            ..Default::default()
        };
        let (report, _) = scan_into_report(temp.path(), &config);
        assert_eq!(report.findings.len(), 1);
        assert!(report.findings[0].path.ends_with("app.jsx"));
    }

    #[test]
    fn test_walk_error_prefers_embedded_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err = ignore::Error::WithPath {
            path: PathBuf::from("root/sub/locked"),
            err: Box::new(ignore::Error::Io(io)),
        };
        let scan_err = walk_error(Path::new("root"), &err);
        assert_eq!(scan_err.path, "root/sub/locked");
        assert_eq!(scan_err.kind, ErrorKind::Walk);
    }

    #[test]
    fn test_walk_error_falls_back_to_root() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let scan_err = walk_error(Path::new("root"), &ignore::Error::Io(io));
        assert_eq!(scan_err.path, "root");
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_is_isolated() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let locked = temp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(temp.path().join("ok.js"), BOTH).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not bind privileged users; nothing to assert then.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let (report, summary) = scan_into_report(temp.path(), &ScanConfig::default());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(report.findings.len(), 1);
        assert!(report.findings[0].path.ends_with("ok.js"));
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, ErrorKind::Walk);
        // The structured path must name the failed directory, not the root.
        assert!(report.errors[0].path.ends_with("locked"));
        assert_eq!(summary.errors, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_candidate_is_skipped_and_logged() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let secret = temp.path().join("secret.tsx");
        fs::write(&secret, BOTH).unwrap();
        fs::write(temp.path().join("ok.tsx"), BOTH).unwrap();
        fs::set_permissions(&secret, fs::Permissions::from_mode(0o000)).unwrap();

        if fs::read_to_string(&secret).is_ok() {
            return;
        }

        let (report, _) = scan_into_report(temp.path(), &ScanConfig::default());

        assert_eq!(report.findings.len(), 1);
        assert!(report.findings[0].path.ends_with("ok.tsx"));
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, ErrorKind::Read);
    }
}
