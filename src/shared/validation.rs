use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating client-supplied file names.
    /// Must start with an alphanumeric character and may contain alphanumerics,
    /// dots, underscores, hyphens and spaces. Path separators and leading dots
    /// are excluded, which rules out traversal sequences and hidden files.
    /// - Valid: "report.pdf", "test.bin", "my file 1.txt", "a-b_c.tar.gz"
    /// - Invalid: "../etc/passwd", ".hidden", "a/b", "a\\b", ""
    pub static ref FILE_NAME_REGEX: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ._-]{0,254}$").unwrap();
}

/// Check whether a name is safe to use verbatim inside the store directory
pub fn is_valid_file_name(name: &str) -> bool {
    FILE_NAME_REGEX.is_match(name)
}
