//! Discussions module - the append-only message board.

mod discussions_model;
mod discussions_service;
mod discussions_traits;

// Re-export the public interface
pub use discussions_model::{MessageWithAuthor, NewMessage};
pub use discussions_service::DiscussionService;
pub use discussions_traits::{DiscussionRepositoryTrait, DiscussionServiceTrait};
