//! Reference Archive Adapter - 参考资料普查
//!
//! - records: 按记录元素收集字段的流式 sink
//! - archive: 文件系统实现（书目目录、形态分析、静态文本）

mod archive;
mod records;

pub use archive::FsReferenceArchive;
