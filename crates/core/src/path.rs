//! Path normalization.

/// Path separator used by every route path.
pub const SEPARATOR: char = '/';

/// Join path segments into one canonical absolute path.
///
/// Every segment is trimmed of leading/trailing separators, empty segments are
/// dropped, and the survivors are joined with a single separator. The result
/// always starts with exactly one separator; joining nothing yields `/`.
///
/// ```
/// use advance_api_core::join_paths;
///
/// assert_eq!(join_paths(["/api/", "//users/", "/"]), "/api/users");
/// assert_eq!(join_paths(Vec::<&str>::new()), "/");
/// ```
pub fn join_paths<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();

    for segment in segments {
        // Inner runs of separators collapse too, so `a//b` is never emitted.
        for part in segment.as_ref().split(SEPARATOR).filter(|p| !p.is_empty()) {
            out.push(SEPARATOR);
            out.push_str(part);
        }
    }

    if out.is_empty() {
        out.push(SEPARATOR);
    }

    out
}
