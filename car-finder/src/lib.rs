pub mod catalog;
pub mod config;
pub mod error;
pub mod finder;
pub mod pagination;
pub mod storage;
pub mod wishlist;

pub use error::{Error, FetchError, StorageError};
pub use finder::{CarFinder, FetchRequest, RequestId};
