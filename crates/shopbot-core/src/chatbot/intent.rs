//! Keyword-rule intent classification.
//!
//! An ordered table of (keywords, intent) pairs evaluated top to bottom,
//! first match wins. Matching is on whole words of the normalized input, not
//! substrings: "this" does not greet, and "cheapest laptop" falls through to
//! free-text search rather than the cheapest-products rule.

/// What the shopper is asking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Cheapest,
    FastestDelivery,
    BestRated,
    CartStatus,
    Category(&'static str),
    Browse,
    Help,
    /// No rule matched; the payload is the normalized input to search for.
    Search(String),
}

/// Rule table, evaluated in order. Earlier rules shadow later ones, so
/// "cheap and fast" resolves to `Cheapest`.
const RULES: &[(&[&str], Intent)] = &[
    (&["hello", "hi"], Intent::Greeting),
    (&["cheap", "budget"], Intent::Cheapest),
    (&["fast", "quick", "delivery"], Intent::FastestDelivery),
    (&["best", "rated", "top"], Intent::BestRated),
    (&["cart"], Intent::CartStatus),
    (&["electronics"], Intent::Category("electronics")),
    (&["sports"], Intent::Category("sports")),
    (&["browse", "show", "product", "products"], Intent::Browse),
    (&["help"], Intent::Help),
];

impl Intent {
    /// Classify free text into an intent.
    ///
    /// Input is trimmed and lowercased first; the normalized form is what a
    /// fallback search runs against.
    pub fn classify(input: &str) -> Intent {
        let normalized = input.trim().to_lowercase();
        let words: Vec<&str> = normalized
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        for (keywords, intent) in RULES {
            if keywords.iter().any(|k| words.contains(k)) {
                return intent.clone();
            }
        }

        Intent::Search(normalized)
    }
}
