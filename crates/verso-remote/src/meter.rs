use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use verso_core::ports::{LineAnalysis, MeterAnalyzer, MeterError, MeterReport, WordAnalysis};

use crate::config::RemoteConfig;

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
  lines: &'a [String],
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
  original_lines: Vec<String>,
  word_details: Vec<LineDetails>,
}

#[derive(Debug, Deserialize)]
struct LineDetails {
  total_syllables: u32,
  details: Vec<WordDetail>,
}

#[derive(Debug, Deserialize)]
struct WordDetail {
  word: String,
  syllable_breakdown: String,
  scansion: String,
  syllable_count: u32,
}

impl AnalyzeResponse {
  /// `original_lines` y `word_details` van emparejados por índice.
  fn into_report(self) -> Result<MeterReport, MeterError> {
    if self.original_lines.len() != self.word_details.len() {
      return Err(MeterError::Malformed(format!(
        "{} lines but {} detail entries",
        self.original_lines.len(),
        self.word_details.len()
      )));
    }

    let lines = self
      .original_lines
      .into_iter()
      .zip(self.word_details)
      .map(|(original, d)| LineAnalysis {
        original,
        total_syllables: d.total_syllables,
        words: d
          .details
          .into_iter()
          .map(|w| WordAnalysis {
            word: w.word,
            syllable_breakdown: w.syllable_breakdown,
            scansion: w.scansion,
            syllable_count: w.syllable_count,
          })
          .collect(),
      })
      .collect();

    Ok(MeterReport { lines })
  }
}

/// Cliente del servicio de métrica (`POST {"lines": [...]}`).
pub struct HttpMeterAnalyzer {
  client: Client,
  url: String,
}

impl HttpMeterAnalyzer {
  pub fn new(config: &RemoteConfig) -> Result<Self, MeterError> {
    let client =
      Client::builder().timeout(config.timeout()).build().map_err(|e| MeterError::Unavailable(e.to_string()))?;
    Ok(Self { client, url: config.meter_url.clone() })
  }
}

#[async_trait]
impl MeterAnalyzer for HttpMeterAnalyzer {
  async fn analyze(&self, lines: &[String]) -> Result<MeterReport, MeterError> {
    let response = self.client.post(&self.url).json(&AnalyzeRequest { lines }).send().await.map_err(|e| {
      warn!(error = %e, url = %self.url, "meter service unreachable");
      MeterError::Unavailable(e.to_string())
    })?;

    let status = response.status();
    if !status.is_success() {
      warn!(%status, "meter service error");
      return Err(MeterError::Status(status.as_u16()));
    }

    let body: AnalyzeResponse = response.json().await.map_err(|e| MeterError::Malformed(e.to_string()))?;
    body.into_report()
  }
}
