//! Business logic and repository trait definitions for Shopbot.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements. It depends only on `shopbot-types` -- never on
//! `shopbot-infra` or any database/IO crate.

pub mod cart;
pub mod catalog;
pub mod chatbot;
pub mod conversation;
