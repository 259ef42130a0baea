pub mod history;
pub mod postgres;

pub use history::{HistoryStore, MemoryHistoryStore, PostgresHistoryStore};
pub use postgres::create_pool;
