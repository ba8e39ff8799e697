use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::export;
use crate::fetch::Fetch;
use crate::nlp::TextNormalizer;
use crate::pipeline::{self, Pipeline, ScrapeConfig};

const PROCESSADOS_JSON: &str = "filmes_processados.json";

/// What the job hands back to its invoker, shaped like a lambda response.
#[derive(Debug, Serialize)]
pub struct JobStatus {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: JobBody,
}

#[derive(Debug, Serialize)]
pub struct JobBody {
    pub mensagem: String,
    pub filmes_csv: String,
    pub comentarios_csv: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processados_json: Option<String>,
}

/// Scrape and export. Errors other than tolerated per-card skips
/// propagate; there is no catch-all here.
pub async fn run_job<F: Fetch>(
    fetcher: F,
    config: ScrapeConfig,
    out_dir: &Path,
) -> Result<JobStatus> {
    let films = Pipeline::new(fetcher, config).run().await?;
    let paths = export::write_tables(&films, out_dir)?;

    Ok(JobStatus {
        status_code: 200,
        body: JobBody {
            mensagem: "Extração concluída".into(),
            filmes_csv: paths.filmes_csv.display().to_string(),
            comentarios_csv: paths.comentarios_csv.display().to_string(),
            processados_json: None,
        },
    })
}

/// Scrape, export, then run every summary and review through the
/// normalizer and dump the enriched records as JSON next to the tables.
pub async fn run_enriched_job<F: Fetch>(
    fetcher: F,
    config: ScrapeConfig,
    out_dir: &Path,
    normalizer: &TextNormalizer,
) -> Result<JobStatus> {
    let films = Pipeline::new(fetcher, config).run().await?;
    let paths = export::write_tables(&films, out_dir)?;

    let enriched = pipeline::enrich(films, normalizer);
    let json_path = out_dir.join(PROCESSADOS_JSON);
    let file = File::create(&json_path)
        .with_context(|| format!("creating {}", json_path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &enriched)?;

    Ok(JobStatus {
        status_code: 200,
        body: JobBody {
            mensagem: "Extração e processamento concluídos".into(),
            filmes_csv: paths.filmes_csv.display().to_string(),
            comentarios_csv: paths.comentarios_csv.display().to_string(),
            processados_json: Some(json_path.display().to_string()),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;
    use std::collections::HashMap;

    struct CannedFetcher(HashMap<String, String>);

    impl Fetch for CannedFetcher {
        async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
            self.0
                .get(url)
                .cloned()
                .ok_or_else(|| ScrapeError::Status {
                    url: url.to_string(),
                    status: reqwest::StatusCode::NOT_FOUND,
                })
        }
    }

    fn canned_site() -> CannedFetcher {
        let listing = r#"<a class="meta-title-link" href="/filmes/filme-1/">F</a>"#;
        let detail = r#"<div class="title">Filme Um</div>
                        <span class="note">4,0</span>
                        <p class="bo-p">Resumo do filme.</p>"#;
        let cards = r#"<div class="review-card">
                         <div class="meta-title"><span>Ana</span></div>
                         <span class="stareval-note">3,5</span>
                         <div class="review-card-content">Muito bom.</div>
                       </div>"#;
        CannedFetcher(
            [
                ("https://www.adorocinema.com/filmes/melhores/adorocinema/?page=1", listing),
                ("https://www.adorocinema.com/filmes/filme-1/criticas-adorocinema/", detail),
                ("https://www.adorocinema.com/filmes/filme-1/criticas/espectadores/", cards),
            ]
            .into_iter()
            .map(|(u, b)| (u.to_string(), b.to_string()))
            .collect(),
        )
    }

    fn one_page_config() -> ScrapeConfig {
        ScrapeConfig {
            pages: 1,
            max_reviews: 40,
        }
    }

    #[tokio::test]
    async fn run_job_writes_tables_and_reports_paths() {
        let dir = tempfile::tempdir().unwrap();
        let status = run_job(canned_site(), one_page_config(), dir.path())
            .await
            .unwrap();
        assert_eq!(status.status_code, 200);
        assert!(std::path::Path::new(&status.body.filmes_csv).exists());
        assert!(std::path::Path::new(&status.body.comentarios_csv).exists());
        assert!(status.body.processados_json.is_none());
    }

    #[tokio::test]
    async fn enriched_job_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let normalizer = TextNormalizer::new();
        let status = run_enriched_job(canned_site(), one_page_config(), dir.path(), &normalizer)
            .await
            .unwrap();
        let json_path = status.body.processados_json.unwrap();
        let raw = std::fs::read_to_string(json_path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed[0]["film"]["name"], "Filme Um");
        assert!(parsed[0]["summary_tokens"]["lemmas"].as_array().unwrap().len() > 0);
    }

    #[tokio::test]
    async fn upstream_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let empty = CannedFetcher(HashMap::new());
        assert!(run_job(empty, one_page_config(), dir.path()).await.is_err());
    }
}
