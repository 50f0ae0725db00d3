pub mod error;
pub mod export;
pub mod storage;
pub mod utils;
pub mod value;

pub use error::StorageError;
pub use storage::{Iter, Storage};
pub use value::Value;
