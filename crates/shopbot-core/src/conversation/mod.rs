//! Buyer-seller conversations: repository port, service, and expiry sweeper.

pub mod repository;
pub mod service;
pub mod sweeper;

pub use repository::ConversationRepository;
pub use service::ConversationService;
pub use sweeper::ExpirySweeper;
