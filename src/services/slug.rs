use rusqlite::Connection;

use crate::db::queries;

/// Lowercase, alphanumerics kept, everything else collapsed to single
/// hyphens.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_hyphen = true;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        "business".to_string()
    } else {
        slug
    }
}

/// Base slug, or base slug plus an incrementing numeric suffix on
/// collision. Globally unique across all businesses.
pub fn unique_slug(conn: &Connection, name: &str) -> anyhow::Result<String> {
    let base = slugify(name);

    if !queries::slug_exists(conn, &base)? {
        return Ok(base);
    }

    let mut n = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if !queries::slug_exists(conn, &candidate)? {
            return Ok(candidate);
        }
        n += 1;
    }
}
