mod model;
mod repository;

pub use model::MessageDB;
pub use repository::DiscussionRepository;
