//! Cuisine cleaning and disambiguation
//!
//! The second info block reads like `$$ · Mexican, Contemporary`. Price
//! symbols, the middle dot and all whitespace are dropped, the rest is split
//! on commas. Because whitespace goes too, multi-word cuisines come out
//! joined (`Traditional Cuisine` becomes `TraditionalCuisine`).

/// Characters removed besides whitespace
const STRIPPED: [char; 5] = ['$', '€', '£', '¥', '·'];

/// Marks the token the site sometimes places second instead of first
const LOCALE_MARKER: &str = "Mexican";

/// Collapses a two-token list with a generic leading category
struct Rewrite {
    first: &'static str,
    /// `None` matches any second token
    second: Option<&'static str>,
    canonical: &'static str,
}

static REWRITES: [Rewrite; 3] = [
    Rewrite {
        first: "Mexican",
        second: Some("TraditionalCuisine"),
        canonical: "Mexican",
    },
    Rewrite {
        first: "Mexican",
        second: Some("International"),
        canonical: "International",
    },
    Rewrite {
        first: "Italian",
        second: None,
        canonical: "Italian",
    },
];

/// Drops currency symbols, the middle dot and whitespace
pub fn clean_cuisine_text(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !STRIPPED.contains(c))
        .collect()
}

/// Applies the locale swap and first-token rewrite to split tokens
///
/// Lists with fewer than two tokens are returned unchanged.
pub fn normalize_tokens(mut tokens: Vec<String>) -> Vec<String> {
    if tokens.len() < 2 {
        return tokens;
    }

    if tokens[1].contains(LOCALE_MARKER) {
        tokens.reverse();
    }

    let rewrite = REWRITES.iter().find(|rule| {
        tokens[0] == rule.first && rule.second.map_or(true, |second| tokens[1] == second)
    });

    match rewrite {
        Some(rule) => vec![rule.canonical.to_string()],
        None => tokens,
    }
}

/// Full cuisine rule: clean, split, normalize, join with `", "`
///
/// ```
/// use restaurant_harvest::extract::normalize_cuisine;
///
/// assert_eq!(normalize_cuisine("$$ · Contemporary, Mexican"), "Mexican, Contemporary");
/// assert_eq!(normalize_cuisine("$ · Traditional Cuisine, Mexican"), "Mexican");
/// ```
pub fn normalize_cuisine(raw: &str) -> String {
    let tokens = clean_cuisine_text(raw)
        .split(',')
        .map(str::to_string)
        .collect();

    normalize_tokens(tokens).join(", ")
}
