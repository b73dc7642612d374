//! Breadcrumb trail derived from the current path

use once_cell::sync::Lazy;
use regex::Regex;

/// Numeric id or 24-hex object id
static OBJECT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[0-9a-fA-F]{24}|[0-9]+)$").expect("valid id pattern"));

/// Paths that show no trail
const HIDDEN_PATHS: [&str; 4] = ["/", "/logout", "/login", "/account/register"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub title: String,
    /// `None` for the last crumb, which is not a link
    pub href: Option<String>,
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_entity_id(segment: &str) -> bool {
    OBJECT_ID.is_match(segment)
}

/// Home, section, then leaf. Empty for the pages that hide the trail.
pub fn breadcrumbs(path: &str) -> Vec<Crumb> {
    if HIDDEN_PATHS.contains(&path) {
        return Vec::new();
    }

    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .trim_end_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    let (first, last) = match (segments.first(), segments.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Vec::new(),
    };

    let leaf = if is_entity_id(last) {
        "Detail".to_string()
    } else if segments.len() == 1 {
        "List".to_string()
    } else {
        capitalize(&last.replace('-', " "))
    };

    vec![
        Crumb {
            title: "Home".to_string(),
            href: Some("/".to_string()),
        },
        Crumb {
            title: capitalize(first).replace('-', " "),
            href: Some(first.to_lowercase()),
        },
        Crumb {
            title: leaf,
            href: None,
        },
    ]
}
