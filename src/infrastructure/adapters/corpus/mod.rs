//! Corpus Adapters - 语料库目录遍历

mod walker;

pub use walker::{FsCorpusWalker, UNKNOWN_AUTHOR_NAME, UNKNOWN_WORK_TITLE};
