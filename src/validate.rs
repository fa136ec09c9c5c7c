//! PDF path validation
//!
//! Pure checks with no side effects; callers re-validate before every use
//! rather than assuming an earlier result still holds.

use std::path::{Path, PathBuf};

use crate::error::{ExtractError, Result};

/// Expand `~` shorthand and make the path absolute (against the current
/// working directory). No filesystem access; purely lexical.
pub fn absolutize(path: &str) -> PathBuf {
    let expanded = expand_home(path);
    if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    }
}

fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Validate that `path` names an existing, readable PDF file.
///
/// Checks run in a fixed order (existence, file type, extension,
/// readability) and the first failure wins; the returned reason names
/// exactly that condition.
pub fn validate_pdf_path(path: &str) -> Result<PathBuf> {
    let abs = absolutize(path);
    tracing::debug!(path = %abs.display(), "Validating PDF path");

    if !abs.exists() {
        return Err(ExtractError::Validation(format!(
            "Path does not exist: {}",
            abs.display()
        )));
    }
    if !abs.is_file() {
        return Err(ExtractError::Validation(format!(
            "Path is not a file: {}",
            abs.display()
        )));
    }
    if !has_pdf_extension(&abs) {
        return Err(ExtractError::Validation(format!(
            "File is not a PDF: {}",
            abs.display()
        )));
    }
    if std::fs::File::open(&abs).is_err() {
        return Err(ExtractError::Validation(format!(
            "File is not readable: {}",
            abs.display()
        )));
    }

    Ok(abs)
}

/// Case-insensitive `.pdf` suffix check
pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// The PDF's file name with the extension stripped; used to match the
/// external tool's output filenames.
pub fn pdf_base_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_pdf(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"%PDF-1.4\n").unwrap();
        path
    }

    #[test]
    fn valid_pdf_returns_absolute_path() {
        let dir = TempDir::new().unwrap();
        let pdf = write_pdf(&dir, "paper.pdf");

        let resolved = validate_pdf_path(pdf.to_str().unwrap()).unwrap();
        assert!(resolved.is_absolute());
        assert_eq!(resolved, pdf);
    }

    #[test]
    fn uppercase_extension_is_accepted() {
        let dir = TempDir::new().unwrap();
        let pdf = write_pdf(&dir, "PAPER.PDF");

        assert!(validate_pdf_path(pdf.to_str().unwrap()).is_ok());
    }

    #[test]
    fn missing_path_names_existence() {
        let err = validate_pdf_path("/definitely/not/here.pdf").unwrap_err();
        assert!(err.to_string().starts_with("Path does not exist"));
    }

    #[test]
    fn directory_names_file_type() {
        let dir = TempDir::new().unwrap();
        let err = validate_pdf_path(dir.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().starts_with("Path is not a file"));
    }

    #[test]
    fn wrong_extension_names_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let err = validate_pdf_path(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().starts_with("File is not a PDF"));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_names_readability() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let pdf = write_pdf(&dir, "secret.pdf");
        std::fs::set_permissions(&pdf, std::fs::Permissions::from_mode(0o000)).unwrap();

        if std::fs::File::open(&pdf).is_ok() {
            // Permission bits are not enforced for root; nothing to assert.
            return;
        }

        let err = validate_pdf_path(pdf.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().starts_with("File is not readable"));

        // restore so TempDir cleanup succeeds
        std::fs::set_permissions(&pdf, std::fs::Permissions::from_mode(0o644)).unwrap();
    }

    #[test]
    fn check_order_is_existence_first() {
        // A nonexistent path with the wrong extension still reports
        // nonexistence, never the extension.
        let err = validate_pdf_path("/definitely/not/here.txt").unwrap_err();
        assert!(err.to_string().starts_with("Path does not exist"));
    }

    #[test]
    fn tilde_expands_to_home() {
        let abs = absolutize("~/paper.pdf");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(abs, home.join("paper.pdf"));
        }
    }

    #[test]
    fn base_name_strips_extension() {
        assert_eq!(pdf_base_name(Path::new("/tmp/paper.pdf")), "paper");
        assert_eq!(pdf_base_name(Path::new("paper.v2.pdf")), "paper.v2");
    }
}
