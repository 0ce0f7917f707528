//! Reference Command Handlers

use chrono::Utc;
use std::sync::Arc;

use crate::application::commands::{SurveyArchive, SurveyArchiveResponse};
use crate::application::error::ApplicationError;
use crate::application::ports::{ArtifactStoragePort, ReferenceArchivePort};
use crate::domain::reference::{ArchiveSurvey, MorphologicalData, MorphologyLanguage, MorphologySummary};

/// SurveyArchive Handler - 读取参考资料并写出书目条目与普查汇总
///
/// 参考资料读取失败只记警告，对应部分按空处理；产物写入失败为致命错误
pub struct SurveyArchiveHandler {
    archive: Arc<dyn ReferenceArchivePort>,
    artifacts: Arc<dyn ArtifactStoragePort>,
}

impl SurveyArchiveHandler {
    pub fn new(archive: Arc<dyn ReferenceArchivePort>, artifacts: Arc<dyn ArtifactStoragePort>) -> Self {
        Self { archive, artifacts }
    }

    pub async fn handle(&self, _command: SurveyArchive) -> Result<SurveyArchiveResponse, ApplicationError> {
        let entries = match self.archive.read_text_metadata().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read text catalog");
                Vec::new()
            }
        };
        let metadata_path = self.artifacts.save_text_metadata(&entries).await?;

        let morphological_data = MorphologicalData {
            greek: self.morphology(MorphologyLanguage::Greek).await,
            latin: self.morphology(MorphologyLanguage::Latin).await,
        };

        let files = match self.archive.list_static_texts().await {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!(error = %e, "Could not list static texts");
                Vec::new()
            }
        };

        let survey = ArchiveSurvey::new(&entries, morphological_data, &files, Utc::now());
        let summary_path = self.artifacts.save_survey(&survey).await?;

        tracing::info!(
            texts = survey.text_metadata.total,
            greek = survey.text_metadata.greek,
            latin = survey.text_metadata.latin,
            static_files = survey.text_files.total,
            summary = %summary_path.display(),
            "Archive survey complete"
        );

        Ok(SurveyArchiveResponse {
            summary_path,
            metadata_path,
            total_texts: survey.text_metadata.total,
            greek_texts: survey.text_metadata.greek,
            latin_texts: survey.text_metadata.latin,
            greek_analyses: survey.morphological_data.greek.as_ref().map(|m| m.count),
            latin_analyses: survey.morphological_data.latin.as_ref().map(|m| m.count),
            static_files: survey.text_files.total,
        })
    }

    async fn morphology(&self, language: MorphologyLanguage) -> Option<MorphologySummary> {
        match self.archive.read_morphology(language).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(language = language.as_str(), error = %e, "Could not read morphology");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::{FsReferenceArchive, JsonArtifactStorage};
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const CATALOG: &str = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <rdf:Description rdf:about="Perseus:text:1999.01.0133">
    <dc:title>Iliad</dc:title><dc:creator>Homer</dc:creator><dc:language>grc</dc:language>
  </rdf:Description>
  <rdf:Description rdf:about="Perseus:text:1999.02.0055">
    <dc:title>Aeneid</dc:title><dc:creator>Vergil</dc:creator><dc:language>latin</dc:language>
  </rdf:Description>
</rdf:RDF>"#;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn handler(root: &Path, out: &Path) -> SurveyArchiveHandler {
        SurveyArchiveHandler::new(
            Arc::new(FsReferenceArchive::new(root)),
            Arc::new(JsonArtifactStorage::new(out)),
        )
    }

    #[tokio::test]
    async fn test_surveys_archive() {
        let archive = tempdir().unwrap();
        let out = tempdir().unwrap();
        let root = archive.path();

        write(&root.join("xml/classics.xml"), CATALOG);
        write(
            &root.join("xml/data/latin.morph.xml"),
            "<analyses><analysis><form>arma</form><lemma>arma</lemma><pos>noun</pos></analysis></analyses>",
        );
        write(&root.join("reading/static/xml/hom.il_gk.xml"), "<TEI/>");

        let response = handler(root, out.path()).handle(SurveyArchive).await.unwrap();

        assert_eq!(response.total_texts, 2);
        assert_eq!(response.greek_texts, 1);
        assert_eq!(response.latin_texts, 1);
        assert_eq!(response.greek_analyses, None);
        assert_eq!(response.latin_analyses, Some(1));
        assert_eq!(response.static_files, 1);

        let metadata: Vec<serde_json::Value> =
            serde_json::from_str(&fs::read_to_string(&response.metadata_path).unwrap()).unwrap();
        assert_eq!(metadata[0]["title"], "Iliad");

        let survey: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&response.summary_path).unwrap()).unwrap();
        assert_eq!(survey["text_metadata"]["latin"], 1);
        assert!(survey["morphological_data"].get("greek").is_none());
        assert_eq!(survey["morphological_data"]["latin"]["sample"][0]["form"], "arma");
        assert_eq!(survey["text_files"]["files"][0]["name"], "hom.il_gk.xml");
    }

    #[tokio::test]
    async fn test_malformed_catalog_is_not_fatal() {
        let archive = tempdir().unwrap();
        let out = tempdir().unwrap();
        write(&archive.path().join("xml/classics.xml"), "<rdf:RDF><rdf:Description>");

        let response = handler(archive.path(), out.path()).handle(SurveyArchive).await.unwrap();

        assert_eq!(response.total_texts, 0);
        assert!(response.metadata_path.exists());
        assert!(response.summary_path.exists());
    }
}
