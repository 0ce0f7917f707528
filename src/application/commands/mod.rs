//! 应用层 - 命令（写操作）
//!
//! 抽取、导入、参考资料普查与演示数据写入

mod extract_commands;
mod import_commands;
mod reference_commands;
mod vocabulary_commands;

pub mod handlers;

pub use extract_commands::*;
pub use import_commands::*;
pub use reference_commands::*;
pub use vocabulary_commands::*;
