mod model;
mod repository;

pub use model::{PositionDB, TransactionDB};
pub use repository::TradingRepository;
