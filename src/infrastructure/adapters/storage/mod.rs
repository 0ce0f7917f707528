//! Storage Adapters - 抽取产物存储

mod json_artifacts;

pub use json_artifacts::{
    JsonArtifactStorage, SUMMARY_FILE_NAME, SURVEY_FILE_NAME, TEXT_METADATA_FILE_NAME,
};
