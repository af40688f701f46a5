//! Shared domain types for Shopbot.
//!
//! This crate contains the core domain types used across the Shopbot backend:
//! Product, CartLine, Conversation, Message, chatbot replies, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, rust_decimal,
//! thiserror.

pub mod cart;
pub mod chat;
pub mod config;
pub mod conversation;
pub mod error;
pub mod product;
