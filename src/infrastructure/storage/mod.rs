//! Storage traits and implementations
//!
//! Small string key-value stores backing the persisted client state
//! (auth session, refresh token, compare list).

mod file;
mod memory;
mod traits;

pub use file::FileStorage;
pub use memory::InMemoryStorage;
pub use traits::Storage;
