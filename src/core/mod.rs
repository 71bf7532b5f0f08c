pub mod agent;
pub mod catalog;
pub mod extract;
pub mod ingester;
pub mod reader;
pub mod render;
pub mod sitemap;
pub mod slug;
pub mod store;

pub use crate::domain::model::{Document, ServiceRecord, Source};
pub use crate::domain::ports::{SourceReader, Storage, TextGenerator};
pub use crate::utils::error::Result;
