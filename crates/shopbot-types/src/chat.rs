//! Chatbot reply types.

use serde::{Deserialize, Serialize};

use std::fmt;

use crate::product::Product;

/// Which catalog filter produced the products attached to a reply.
///
/// The storefront uses this tag to label the product strip and wire up its
/// "Show More" action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    Cheapest,
    Fastest,
    Best,
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterType::Cheapest => write!(f, "cheapest"),
            FilterType::Fastest => write!(f, "fastest"),
            FilterType::Best => write!(f, "best"),
        }
    }
}

/// A chatbot response: message text plus optional product suggestions and
/// quick-reply buttons.
///
/// Serialized with the camelCase keys the chat widget expects. All optional
/// fields are emitted as `null` when unset (the widget checks for null, not
/// absence).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotReply {
    pub content: String,
    pub products: Option<Vec<Product>>,
    #[serde(rename = "filterType")]
    pub filter_type: Option<FilterType>,
    #[serde(rename = "quickReplies")]
    pub quick_replies: Option<Vec<String>>,
}

impl BotReply {
    /// An empty reply: blank content, no products, no quick replies.
    pub fn empty() -> Self {
        Self {
            content: String::new(),
            products: None,
            filter_type: None,
            quick_replies: None,
        }
    }

    /// A text-only reply with quick-reply buttons.
    pub fn text(content: impl Into<String>, quick_replies: &[&str]) -> Self {
        Self {
            content: content.into(),
            products: None,
            filter_type: None,
            quick_replies: Some(quick_replies.iter().map(|s| s.to_string()).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_type_serde() {
        assert_eq!(
            serde_json::to_string(&FilterType::Cheapest).unwrap(),
            "\"cheapest\""
        );
        assert_eq!(FilterType::Best.to_string(), "best");
    }

    #[test]
    fn test_reply_wire_keys() {
        let reply = BotReply {
            filter_type: Some(FilterType::Fastest),
            ..BotReply::text("Fast ones:", &["Show More"])
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["filterType"], "fastest");
        assert_eq!(json["quickReplies"][0], "Show More");
        assert_eq!(json["products"], serde_json::Value::Null);
    }

    #[test]
    fn test_empty_reply() {
        let reply = BotReply::empty();
        assert_eq!(reply.content, "");
        assert!(reply.products.is_none());
        assert!(reply.quick_replies.is_none());
    }
}
