pub mod error;
pub mod storage;
pub mod types;

pub use error::StoreError;
pub use storage::{get_store_path, load_store, save_store};
pub use types::{ProductRecord, StoreState, User, STORE_VERSION};
