//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod corpus;
pub mod reference;
pub mod storage;
pub mod tei;

pub use corpus::*;
pub use reference::FsReferenceArchive;
pub use storage::*;
pub use tei::{TeiDocumentExtractor, TeiExtractorConfig};
