//! LLM Batch Scorer: re-scores shortlisted postings through the chat-completion oracle.
//!
//! The oracle is advisory. Any failure for a batch becomes a neutral score for every
//! posting in it, so scoring never fails the pipeline.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::llm_client::{strip_json_fences, CallOptions, LlmClient, LlmError};
use crate::matching::prompts::batch_score_prompt;
use crate::models::{JobPosting, Profile};
use crate::sources::Pacing;

/// Score used for postings the oracle did not (or could not) score.
pub const NEUTRAL_SCORE: u8 = 50;
pub const LLM_BATCH_SIZE: usize = 15;
/// Default delay between consecutive batches.
pub const DEFAULT_PACING_MS: u64 = 600;
const SCORE_MAX_TOKENS: u32 = 200;

/// Anything that turns a prompt into a reply. `LlmClient` in production, fakes in tests.
#[async_trait]
pub trait ScoringOracle: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl ScoringOracle for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.call_text(prompt, CallOptions::precise(SCORE_MAX_TOKENS)).await
    }
}

/// Parses a reply into exactly `len` scores.
///
/// Returns `None` unless the reply is a JSON array. Short arrays are padded with
/// [`NEUTRAL_SCORE`], long ones truncated. Numbers are rounded and clamped to 0–100;
/// non-numeric entries count as neutral.
pub fn parse_scores(text: &str, len: usize) -> Option<Vec<u8>> {
    let value: Value = serde_json::from_str(strip_json_fences(text)).ok()?;
    let items = value.as_array()?;

    let mut scores: Vec<u8> = items
        .iter()
        .take(len)
        .map(|item| {
            item.as_f64()
                .map(|n| n.round().clamp(0.0, 100.0) as u8)
                .unwrap_or(NEUTRAL_SCORE)
        })
        .collect();
    scores.resize(len, NEUTRAL_SCORE);
    Some(scores)
}

/// Sends shortlisted postings to the oracle in fixed-size batches, strictly in order.
#[derive(Clone)]
pub struct OracleScorer {
    oracle: Arc<dyn ScoringOracle>,
    pacing: Pacing,
    batch_size: usize,
}

impl OracleScorer {
    pub fn new(oracle: Arc<dyn ScoringOracle>, pacing: Pacing) -> Self {
        Self {
            oracle,
            pacing,
            batch_size: LLM_BATCH_SIZE,
        }
    }

    /// Scores one batch. Never fails: errors and unparseable replies yield all-neutral scores.
    pub async fn score_batch(
        &self,
        batch: &[&JobPosting],
        profile: &Profile,
        years: u32,
    ) -> Vec<u8> {
        let prompt = batch_score_prompt(batch, profile, years);
        match self.oracle.complete(&prompt).await {
            Ok(reply) => parse_scores(&reply, batch.len()).unwrap_or_else(|| {
                warn!("LLM scoring failed: reply is not a JSON array");
                debug!("Unparseable scoring reply: {}", reply);
                vec![NEUTRAL_SCORE; batch.len()]
            }),
            Err(e) => {
                warn!("LLM scoring failed: {}", e);
                vec![NEUTRAL_SCORE; batch.len()]
            }
        }
    }

    /// Scores every posting; output index `i` belongs to `jobs[i]`.
    ///
    /// `on_batch` is called with the 1-based batch number and its size before each call.
    pub async fn score_all(
        &self,
        jobs: &[&JobPosting],
        profile: &Profile,
        years: u32,
        mut on_batch: impl FnMut(usize, usize) + Send,
    ) -> Vec<u8> {
        let mut scores = Vec::with_capacity(jobs.len());
        for (index, batch) in jobs.chunks(self.batch_size).enumerate() {
            self.pacing.before_call(index).await;
            on_batch(index + 1, batch.len());
            scores.extend(self.score_batch(batch, profile, years).await);
        }
        scores
    }
}
