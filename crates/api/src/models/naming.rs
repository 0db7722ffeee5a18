/// Separator used by internal (class-file) names, e.g. `com/acme/Bench`.
pub const INTERNAL_SEPARATOR: char = '/';
/// Separator used by qualified names, e.g. `com.acme.Bench`.
pub const QUALIFIED_SEPARATOR: char = '.';

/// Converts an internal name to its dotted qualified form. Dotted input is
/// returned unchanged.
pub fn to_qualified_name(name: &str) -> String {
    name.replace(INTERNAL_SEPARATOR, ".")
}

/// Splits a qualified name at its last separator into `(package, nested name)`.
/// Returns `None` for a name without a package.
pub fn split_qualified_name(qualified: &str) -> Option<(&str, &str)> {
    qualified
        .rfind(QUALIFIED_SEPARATOR)
        .map(|idx| (&qualified[..idx], &qualified[idx + 1..]))
}
