//! Publication of the generated text.
use std::{
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, info};

use crate::error::{TblgenError, TblgenResult, io_error};

/// What happens to an existing output file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Replace the file unconditionally.
    #[default]
    Always,

    /// Leave the file (and its timestamp) alone when the content is unchanged.
    IfChanged,

    /// Never write; fail when the file differs from the generated text.
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Published {
    Stdout,
    Written,
    Unchanged,
}

/// Publish `contents` to `path`, or to stdout when no path is given.
///
/// Files are written to a temporary sibling first and renamed over the target,
/// so readers never observe a partially written output.
pub fn publish(path: Option<&Path>, contents: &str, mode: WriteMode) -> TblgenResult<Published> {
    let Some(path) = path else {
        if mode == WriteMode::Check {
            return Err(TblgenError::CheckWithoutOutput);
        }
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(contents.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(io_error(Path::new("<stdout>")))?;
        return Ok(Published::Stdout);
    };

    if mode != WriteMode::Always {
        let existing = read_existing(path)?;
        if existing.as_deref() == Some(contents) {
            debug!("'{}' is up to date", path.display());
            return Ok(Published::Unchanged);
        }
        if mode == WriteMode::Check {
            return Err(TblgenError::OutputDiffers {
                path: path.display().to_string(),
            });
        }
    }

    write_atomic(path, contents)?;
    info!("Wrote '{}' ({} bytes)", path.display(), contents.len());
    Ok(Published::Written)
}

fn read_existing(path: &Path) -> TblgenResult<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(io_error(path)(error)),
    }
}

fn write_atomic(path: &Path, contents: &str) -> TblgenResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(&dir).map_err(io_error(&dir))?;
    if let Err(error) = file.write_all(contents.as_bytes()) {
        return Err(io_error(file.path())(error));
    }
    file.persist(path).map_err(|source| TblgenError::Persist {
        path: path.display().to_string(),
        source,
    })?;
    Ok(())
}

/// Render a make-style dependency rule `target: dep...`.
pub fn depfile_rule(target: &Path, deps: &[&Path]) -> String {
    let mut rule = escape_make_path(target);
    rule.push(':');
    for dep in deps {
        rule.push(' ');
        rule.push_str(&escape_make_path(dep));
    }
    rule.push('\n');
    rule
}

fn escape_make_path(path: &Path) -> String {
    path.display().to_string().replace(' ', "\\ ")
}

/// Write the dependency file for `target`.
pub fn write_depfile(depfile: &Path, target: &Path, deps: &[&Path]) -> TblgenResult<()> {
    write_atomic(depfile, &depfile_rule(target, deps))?;
    debug!("Wrote dependency file '{}'", depfile.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Attributes.inc");

        let published = publish(Some(&path), "text\n", WriteMode::Always).unwrap();
        assert_eq!(published, Published::Written);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "text\n");
    }

    #[test]
    fn write_if_changed_skips_identical_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Attributes.inc");
        std::fs::write(&path, "same\n").unwrap();

        assert_eq!(
            publish(Some(&path), "same\n", WriteMode::IfChanged).unwrap(),
            Published::Unchanged
        );
        assert_eq!(
            publish(Some(&path), "other\n", WriteMode::IfChanged).unwrap(),
            Published::Written
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "other\n");
    }

    #[test]
    fn check_mode_never_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Attributes.inc");

        let error = publish(Some(&path), "text\n", WriteMode::Check).unwrap_err();
        assert!(matches!(error, TblgenError::OutputDiffers { .. }), "{error}");
        assert!(!path.exists(), "check mode must not create the output");

        std::fs::write(&path, "stale\n").unwrap();
        let error = publish(Some(&path), "text\n", WriteMode::Check).unwrap_err();
        assert!(matches!(error, TblgenError::OutputDiffers { .. }), "{error}");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "stale\n");

        std::fs::write(&path, "text\n").unwrap();
        assert_eq!(
            publish(Some(&path), "text\n", WriteMode::Check).unwrap(),
            Published::Unchanged
        );
    }

    #[test]
    fn check_mode_without_path_fails() {
        let error = publish(None, "text\n", WriteMode::Check).unwrap_err();
        assert!(matches!(error, TblgenError::CheckWithoutOutput), "{error}");
    }

    #[test]
    fn no_temporary_files_are_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Attributes.inc");
        publish(Some(&path), "text\n", WriteMode::Always).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn depfile_lists_the_input() {
        let rule = depfile_rule(
            Path::new("out/Attributes.inc"),
            &[Path::new("defs/My Attributes.toml")],
        );
        assert_eq!(rule, "out/Attributes.inc: defs/My\\ Attributes.toml\n");
    }
}
