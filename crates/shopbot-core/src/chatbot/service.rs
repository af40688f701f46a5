//! Chatbot dispatcher: per-intent handlers over the catalog port.
//!
//! `respond` never fails: repository errors degrade into an apologetic reply
//! with fallback quick replies. This is the one intentional partial-failure
//! degradation in the system.

use shopbot_types::chat::{BotReply, FilterType};
use shopbot_types::error::RepositoryError;
use tracing::warn;

use crate::catalog::repository::CatalogRepository;
use crate::chatbot::intent::Intent;

/// How many products a reply carries at most.
const REPLY_PRODUCT_CAP: usize = 3;

/// Rule-based shop assistant.
pub struct ChatbotService<R: CatalogRepository> {
    catalog: R,
}

impl<R: CatalogRepository> ChatbotService<R> {
    pub fn new(catalog: R) -> Self {
        Self { catalog }
    }

    /// Produce a reply for free-text input.
    ///
    /// `cart_item_count` is the caller's current cart line count, used by the
    /// cart-status branch.
    pub async fn respond(&self, text: &str, cart_item_count: usize) -> BotReply {
        let intent = Intent::classify(text);
        match self.dispatch(intent, cart_item_count).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Chatbot dispatch failed, degrading to fallback reply");
                BotReply::text(
                    "I'm having trouble processing that request. Please try again!",
                    &["Browse Products", "Help"],
                )
            }
        }
    }

    async fn dispatch(
        &self,
        intent: Intent,
        cart_item_count: usize,
    ) -> Result<BotReply, RepositoryError> {
        match intent {
            Intent::Greeting => Ok(BotReply::text(
                "Hello! What are you looking for today?",
                &[
                    "Browse Products",
                    "Cheapest Items",
                    "Fastest Delivery",
                    "Best Rated",
                ],
            )),

            Intent::Cheapest => {
                let products = self.catalog.cheapest(REPLY_PRODUCT_CAP as i64).await?;
                // An empty catalog leaves the reply blank. Known quirk kept
                // for wire compatibility; the fallback branch still covers
                // the common path.
                let Some(first) = products.first() else {
                    return Ok(BotReply::empty());
                };
                let mut reply = BotReply::text(
                    format!(
                        "Here are our most affordable products. The cheapest is {} at ${}",
                        first.name, first.price
                    ),
                    &["Show More", "Chat with Seller"],
                );
                reply.filter_type = Some(FilterType::Cheapest);
                reply.products = Some(products);
                Ok(reply)
            }

            Intent::FastestDelivery => {
                let products = self
                    .catalog
                    .fastest_delivery("Cikarang", REPLY_PRODUCT_CAP as i64)
                    .await?;
                if products.is_empty() {
                    return Ok(BotReply::empty());
                }
                let mut reply = BotReply::text(
                    "These products can be delivered fastest from our Cikarang warehouse!",
                    &["Show More", "Chat with Seller"],
                );
                reply.filter_type = Some(FilterType::Fastest);
                reply.products = Some(products);
                Ok(reply)
            }

            Intent::BestRated => {
                let products = self.catalog.best_rated(REPLY_PRODUCT_CAP as i64).await?;
                let Some(first) = products.first() else {
                    return Ok(BotReply::empty());
                };
                let mut reply = BotReply::text(
                    format!(
                        "Here are our highest-rated products. Top rated is {} with {} stars!",
                        first.name, first.rating
                    ),
                    &["Show More", "Chat with Seller"],
                );
                reply.filter_type = Some(FilterType::Best);
                reply.products = Some(products);
                Ok(reply)
            }

            Intent::CartStatus => {
                if cart_item_count == 0 {
                    Ok(BotReply::text(
                        "Your cart is empty. Would you like to browse our products?",
                        &["Browse Products", "Cheapest Items"],
                    ))
                } else {
                    Ok(BotReply::text(
                        format!("You have {cart_item_count} item(s) in your cart."),
                        &["Chat with Seller", "Continue Shopping"],
                    ))
                }
            }

            Intent::Category(category) => {
                let products = self.catalog.by_category(category).await?;
                let content = match category {
                    "electronics" => "Here are our electronics:".to_string(),
                    other => format!("Here are our {other} products:"),
                };
                let mut reply = BotReply::text(content, &["Cheapest Items", "Best Rated"]);
                reply.products = Some(products);
                Ok(reply)
            }

            Intent::Browse => {
                let mut products = self.catalog.list_all().await?;
                products.truncate(REPLY_PRODUCT_CAP);
                let mut reply = BotReply::text(
                    "Here are some of our popular products:",
                    &["Cheapest Items", "Fastest Delivery", "Best Rated"],
                );
                reply.products = Some(products);
                Ok(reply)
            }

            Intent::Help => Ok(BotReply::text(
                "I can help you browse products, find the cheapest items, \
                 fastest delivery options, or best rated products!",
                &["Cheapest Items", "Fastest Delivery", "Best Rated"],
            )),

            Intent::Search(term) => {
                let mut results = self.catalog.search(&term).await?;
                if results.is_empty() {
                    return Ok(BotReply::text(
                        "I'm here to help! You can ask me to show products, \
                         find deals, or check delivery options.",
                        &["Cheapest Items", "Fastest Delivery", "Best Rated"],
                    ));
                }
                results.truncate(REPLY_PRODUCT_CAP);
                let mut reply = BotReply::text(
                    "I found some products matching your search:",
                    &["Show More", "Chat with Seller"],
                );
                reply.products = Some(results);
                Ok(reply)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chatbot::test_support::{sample_product, StubCatalog};

    fn catalog() -> StubCatalog {
        StubCatalog::with_products(vec![
            sample_product(1, "Gaming Laptop", "899.99", 4.8),
            sample_product(2, "Wireless Mouse", "12.99", 4.2),
            sample_product(3, "Yoga Mat", "19.99", 4.6),
            sample_product(4, "USB Cable", "3.50", 3.9),
        ])
    }

    #[tokio::test]
    async fn test_greeting_quick_replies() {
        let bot = ChatbotService::new(catalog());
        let reply = bot.respond("hi", 0).await;
        assert!(reply.content.contains("Hello"));
        let quick = reply.quick_replies.unwrap();
        assert_eq!(quick.len(), 4);
        assert!(quick.contains(&"Browse Products".to_string()));
    }

    #[tokio::test]
    async fn test_cheapest_names_the_cheapest() {
        let bot = ChatbotService::new(catalog());
        let reply = bot.respond("any cheap deals?", 0).await;
        assert!(reply.content.contains("USB Cable"));
        assert!(reply.content.contains("$3.50"));
        assert_eq!(reply.filter_type, Some(FilterType::Cheapest));
        assert_eq!(reply.products.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_cheapest_on_empty_catalog_leaves_content_blank() {
        let bot = ChatbotService::new(StubCatalog::empty());
        let reply = bot.respond("cheap", 0).await;
        assert_eq!(reply.content, "");
        assert!(reply.products.is_none());
    }

    #[tokio::test]
    async fn test_best_rated_mentions_stars() {
        let bot = ChatbotService::new(catalog());
        let reply = bot.respond("top rated", 0).await;
        assert!(reply.content.contains("Gaming Laptop"));
        assert!(reply.content.contains("4.8 stars"));
        assert_eq!(reply.filter_type, Some(FilterType::Best));
    }

    #[tokio::test]
    async fn test_cart_branches_on_count() {
        let bot = ChatbotService::new(catalog());

        let empty = bot.respond("cart", 0).await;
        assert!(empty.content.contains("empty"));

        let full = bot.respond("my cart", 2).await;
        assert!(full.content.contains("2 item(s)"));
    }

    #[tokio::test]
    async fn test_fallback_searches_catalog() {
        let bot = ChatbotService::new(catalog());
        // "laptop" matches no rule keyword; the search hits the Gaming
        // Laptop by name.
        let reply = bot.respond("laptop", 0).await;
        assert!(reply.content.contains("matching your search"));
        let products = reply.products.unwrap();
        assert_eq!(products[0].name, "Gaming Laptop");
    }

    #[tokio::test]
    async fn test_cheapest_laptop_reaches_search_branch() {
        let bot = ChatbotService::new(catalog());
        // "cheapest" is not the keyword "cheap": the whole phrase goes to
        // search, which matches nothing, so the generic help reply comes back.
        let reply = bot.respond("cheapest laptop", 0).await;
        assert!(reply.filter_type.is_none());
        assert!(reply.content.contains("I'm here to help"));
    }

    #[tokio::test]
    async fn test_fallback_without_results_offers_help() {
        let bot = ChatbotService::new(catalog());
        let reply = bot.respond("zzzz nonexistent", 0).await;
        assert!(reply.content.contains("I'm here to help"));
        assert!(reply.products.is_none());
    }

    #[tokio::test]
    async fn test_storage_error_degrades_to_apology() {
        let bot = ChatbotService::new(StubCatalog::failing());
        let reply = bot.respond("browse", 0).await;
        assert!(reply.content.contains("having trouble"));
        assert_eq!(
            reply.quick_replies.unwrap(),
            vec!["Browse Products".to_string(), "Help".to_string()]
        );
    }
}
