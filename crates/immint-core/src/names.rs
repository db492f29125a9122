//! Creator name normalization
//!
//! DSpace contributor fields typically arrive as "Lastname, Firstname".
//! DataCite wants display order plus an explicit given/family split.

/// Placeholder used when a record has no contributors at all
pub const UNKNOWN_CREATOR: &str = "Unknown";

/// Reorder a "Lastname, Firstname" name into "Firstname Lastname".
///
/// Trailing periods are stripped from each comma part. Only a name with
/// exactly two comma parts is reordered; anything else comes back trimmed
/// with trailing periods stripped.
pub fn reverse_name_order(name: &str) -> String {
    let parts: Vec<&str> = name
        .split(',')
        .map(|part| part.trim().trim_end_matches('.'))
        .collect();
    if parts.len() == 2 {
        format!("{} {}", parts[1], parts[0])
    } else {
        name.trim().trim_end_matches('.').to_string()
    }
}

/// Split a display-order name into (given, family).
///
/// The last whitespace-delimited token is the family name and everything
/// before it joins into the given name. A single-token name has no given
/// name; an empty name yields two empty strings.
pub fn split_name(name: &str) -> (String, String) {
    let parts: Vec<&str> = name.split_whitespace().collect();
    if parts.len() > 1 {
        (
            parts[..parts.len() - 1].join(" "),
            parts[parts.len() - 1].to_string(),
        )
    } else {
        (String::new(), name.to_string())
    }
}
