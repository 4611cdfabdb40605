//! Helpers for `package::sub::name` style paths.

/// Separator between package segments and the element name.
pub const PATH_SEPARATOR: &str = "::";

/// Splits a path into its package (if any) and its simple name.
///
/// `"model::domain::Person"` → `(Some("model::domain"), "Person")`,
/// `"Person"` → `(None, "Person")`.
pub fn split_path(path: &str) -> (Option<&str>, &str) {
    match path.rsplit_once(PATH_SEPARATOR) {
        Some((package, name)) => (Some(package), name),
        None => (None, path),
    }
}

/// Joins a package and a name back into a path. An empty package yields the bare name.
pub fn join_path(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{package}{PATH_SEPARATOR}{name}")
    }
}

/// Returns true if every segment is an identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_valid_path(path: &str) -> bool {
    !path.is_empty() && path.split(PATH_SEPARATOR).all(is_identifier)
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
