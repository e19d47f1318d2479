use anyhow::Result;
use tracing::{info, warn};

use crate::io::parse_meeting_response;
use crate::llm::{
    build_summary_prompt, validate_meeting_data, AnthropicClient, ValidationConfig, SYSTEM_PROMPT,
};
use crate::models::MeetingData;

/// Configuration for Stage 1
#[derive(Debug, Clone)]
pub struct SummarizeConfig {
    /// Validation configuration
    pub validation: ValidationConfig,
    /// Maximum retries on an unusable response
    pub max_retries: u32,
}

impl Default for SummarizeConfig {
    fn default() -> Self {
        Self {
            validation: ValidationConfig::default(),
            max_retries: 2,
        }
    }
}

/// Result of Stage 1 processing
#[derive(Debug)]
pub struct SummarizeResult {
    pub meeting: MeetingData,
    /// Number of requests sent, including the one that produced `meeting`
    pub attempts: u32,
    /// Validation errors of `meeting`; empty when it passed validation
    pub validation_errors: Vec<String>,
}

impl SummarizeResult {
    pub fn is_validated(&self) -> bool {
        self.validation_errors.is_empty()
    }
}

/// Last response that parsed but failed validation
#[derive(Debug)]
struct RejectedMeeting {
    meeting: MeetingData,
    attempt: u32,
    errors: Vec<String>,
}

/// Execute Stage 1: LLM summarization
///
/// 1. Build the prompt from the transcript and optional chat info
/// 2. Ask the model for meeting JSON
/// 3. Parse and validate the response, retrying on failure
///
/// When retries run out, the last response that parsed is kept even if it
/// failed validation. An error is returned only if no response ever parsed.
pub async fn execute_summarize(
    client: &AnthropicClient,
    transcript: &str,
    chat_info: Option<&str>,
    config: &SummarizeConfig,
) -> Result<SummarizeResult> {
    let prompt = build_summary_prompt(transcript, chat_info);

    info!(
        "Stage 1: Summarizing {} chars of transcript with {}",
        transcript.len(),
        client.model()
    );

    let mut last_error = None;
    let mut rejected = None;

    for attempt in 0..=config.max_retries {
        if attempt > 0 {
            info!("Stage 1: retry {} of {}", attempt, config.max_retries);
        }

        let text = match client.send_message(SYSTEM_PROMPT, &prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Stage 1: request failed: {:#}", e);
                last_error = Some(e);
                continue;
            }
        };

        let meeting = match parse_meeting_response(&text) {
            Ok(meeting) => meeting,
            Err(e) => {
                warn!("Stage 1: unusable response: {}", e);
                last_error = Some(e.into());
                continue;
            }
        };

        let validation = validate_meeting_data(&meeting, &config.validation);
        if validation.is_valid {
            info!(
                "Stage 1: \"{}\" with {} speakers",
                meeting.title(),
                meeting.speakers.len()
            );
            return Ok(SummarizeResult {
                meeting,
                attempts: attempt + 1,
                validation_errors: vec![],
            });
        }

        warn!("Stage 1: validation failed: {:?}", validation.errors);
        rejected = Some(RejectedMeeting {
            meeting,
            attempt: attempt + 1,
            errors: validation.errors,
        });
    }

    settle_after_retries(rejected, last_error)
}

/// Decide the Stage 1 outcome once every attempt failed
fn settle_after_retries(
    rejected: Option<RejectedMeeting>,
    last_error: Option<anyhow::Error>,
) -> Result<SummarizeResult> {
    match rejected {
        Some(rejected) => {
            warn!(
                "Stage 1: keeping response from attempt {} despite validation errors: {:?}",
                rejected.attempt, rejected.errors
            );
            Ok(SummarizeResult {
                meeting: rejected.meeting,
                attempts: rejected.attempt,
                validation_errors: rejected.errors,
            })
        }
        None => Err(last_error.unwrap_or_else(|| anyhow::anyhow!("Unknown error"))),
    }
}
