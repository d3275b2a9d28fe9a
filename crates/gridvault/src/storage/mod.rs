pub mod content_store;

pub use content_store::{ContentStore, Partition};
