//! Filename sanitization and extension handling.

/// Extract the lowercased extension of a filename, if it has one.
///
/// Hidden files like `.bashrc` and names without a dot have no extension.
pub fn extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Reduce a client-supplied filename to a safe path component.
///
/// Keeps ASCII alphanumerics, `.`, `-` and `_`; everything else (path
/// separators included) becomes `_`. The result is only ever used as the
/// tail of a generated storage name, never as a lookup key.
pub fn sanitize(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
