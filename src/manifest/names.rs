/// Resolve a component class name from the manifest into a fully qualified name.
///
/// - `com.app.Main` is already qualified and returned unchanged
/// - `.Main` is relative to the package: `com.app` + `.Main`
/// - `Login` has no separator: `com.app` + `.` + `Login`
///
/// Trailing empty segments do not count as parts. A name like `a.b` counts
/// as qualified even when it is really a nested package of the app.
pub fn resolve_class_name(package: &str, name: &str) -> String {
    let mut parts = name.trim_end_matches('.').split('.');
    let first = parts.next().unwrap_or_default();
    let qualified = parts.next().is_some() && !first.is_empty();

    if qualified {
        name.to_string()
    } else if name.contains('.') {
        format!("{}{}", package, name)
    } else {
        format!("{}.{}", package, name)
    }
}

/// Last dot-separated segment of an action or category name
pub(crate) fn last_segment(name: &str) -> &str {
    let trimmed = name.trim_end_matches('.');
    trimmed.rsplit('.').next().unwrap_or(trimmed)
}
