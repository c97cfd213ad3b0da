//! URL-safe slug generation
//!
//! Lowercases the input, turns runs of whitespace, dashes and underscores
//! into single dashes, and drops every other non-alphanumeric character
//! outright (so `14:05` becomes `1405`, not `14-05`).

pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_separator = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('-');
            }
            pending_separator = false;
            out.push(c.to_ascii_lowercase());
        } else if c == '-' || c == '_' || c.is_whitespace() {
            pending_separator = true;
        }
        // Everything else (':', '.', punctuation, symbols) is removed.
    }

    out
}
