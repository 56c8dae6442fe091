pub mod api_client;
pub mod images;
pub mod storage;

pub use api_client::ApiClient;
pub use images::{ImagePolicy, PLACEHOLDER_IMAGE};
pub use storage::{FileStorage, InMemoryStorage, Storage};
