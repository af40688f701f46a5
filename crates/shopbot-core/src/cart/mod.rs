//! Session-scoped shopping cart: repository port and service.

pub mod repository;
pub mod service;

pub use repository::CartRepository;
pub use service::CartService;
