//! HTTP request handlers for the JSON API.

pub mod cart;
pub mod catalog;
pub mod chat;
pub mod conversation;
