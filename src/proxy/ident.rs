//! Identifier generation for providers and endpoints

/// Lowercase a display name and replace spaces with hyphens.
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Derive an identifier from `name` that `is_taken` does not reject.
///
/// The bare slug is tried first, then `slug-0`, `slug-1`, ... in order.
pub fn unique_identifier(name: &str, is_taken: impl Fn(&str) -> bool) -> String {
    let base = slugify(name);
    if !is_taken(&base) {
        return base;
    }

    let mut suffix = 0usize;
    loop {
        let candidate = format!("{}-{}", base, suffix);
        if !is_taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
