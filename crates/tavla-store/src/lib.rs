pub mod service;
pub mod store;
pub mod traits;

pub use service::BoardService;
pub use store::{MemoryStore, SqliteStore};
pub use traits::{BoardStore, StoreTransaction};
