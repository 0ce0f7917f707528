//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod extract_handlers;
mod import_handlers;
mod reference_handlers;
mod vocabulary_handlers;

pub use extract_handlers::*;
pub use import_handlers::*;
pub use reference_handlers::*;
pub use vocabulary_handlers::*;
