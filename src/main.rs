use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use minutes::{
    evaluate_speaker_names, execute_render, execute_summarize, load_actual_names,
    load_meeting_data, read_transcript, AnthropicClient, AnthropicConfig, MeetingData, NameMap,
    RenderConfig, SpeakerAccuracy, SpeakerAccuracyReport, SummarizeConfig,
};

#[derive(Parser)]
#[command(name = "minutes")]
#[command(
    author,
    version,
    about = "Minutes-of-meeting reports with speaker name accuracy",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a transcript and write the minutes of meeting
    Report {
        /// Transcript text file (not needed with --meeting-data)
        #[arg(short, long, required_unless_present = "meeting_data")]
        transcript: Option<PathBuf>,

        /// Chat information to give the summarizer extra context
        #[arg(long)]
        chat_info: Option<PathBuf>,

        /// Ground-truth speaker names: a JSON file or an inline JSON object
        #[arg(long)]
        actual_names: Option<String>,

        /// Use existing meeting JSON instead of calling the LLM
        #[arg(long)]
        meeting_data: Option<PathBuf>,

        /// Output file for the machine-readable report (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Output file for the human-readable report (text)
        #[arg(long)]
        human_readable: Option<PathBuf>,

        /// Maximum retries on an unusable LLM response
        #[arg(long, default_value = "2")]
        max_retries: u32,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Score inferred speaker names against ground truth
    Evaluate {
        /// Ground-truth speaker names: a JSON file or an inline JSON object
        #[arg(short, long)]
        actual_names: String,

        /// Meeting JSON produced by the summarizer
        #[arg(short, long)]
        meeting: PathBuf,

        /// Output file for the metrics (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            transcript,
            chat_info,
            actual_names,
            meeting_data,
            output,
            human_readable,
            max_retries,
            verbose,
        } => {
            setup_logging(verbose);
            generate_report(
                transcript,
                chat_info,
                actual_names,
                meeting_data,
                output,
                human_readable,
                max_retries,
            )
            .await
        }
        Commands::Evaluate {
            actual_names,
            meeting,
            output,
            verbose,
        } => {
            setup_logging(verbose);
            evaluate(&actual_names, meeting, output)
        }
    }
}

fn setup_logging(verbose: bool) {
    if std::env::var_os("RUST_LOG").is_some() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
        return;
    }

    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn generate_report(
    transcript: Option<PathBuf>,
    chat_info: Option<PathBuf>,
    actual_names: Option<String>,
    meeting_data: Option<PathBuf>,
    output: PathBuf,
    human_readable: Option<PathBuf>,
    max_retries: u32,
) -> Result<()> {
    let actual = actual_names
        .as_deref()
        .map(load_actual_names)
        .transpose()
        .context("Failed to load actual names")?;

    // Stage 1: Summarization
    let meeting = match meeting_data {
        Some(path) => {
            info!("Stage 1: Using meeting data from {:?}", path);
            load_meeting_data(&path)?
        }
        None => {
            let transcript = transcript.context("--transcript is required without --meeting-data")?;
            info!("Loading transcript from {:?}", transcript);
            let transcript_text = read_transcript(&transcript)?;

            let chat_info = chat_info
                .map(|path| {
                    std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read file: {:?}", path))
                })
                .transpose()?;

            let api_config = AnthropicConfig::from_env()?;
            let client = AnthropicClient::new(api_config)?;
            let config = SummarizeConfig {
                max_retries,
                ..Default::default()
            };

            let result =
                execute_summarize(&client, &transcript_text, chat_info.as_deref(), &config)
                    .await
                    .context("Failed to summarize transcript")?;
            if result.is_validated() {
                info!("Stage 1: summarized in {} attempt(s)", result.attempts);
            } else {
                warn!(
                    "Stage 1: using unvalidated meeting data after {} attempt(s): {:?}",
                    result.attempts, result.validation_errors
                );
            }
            result.meeting
        }
    };

    // Stages 2 & 3: Reconciliation and scoring
    let accuracy = evaluate_speaker_names(actual.as_ref(), &meeting);

    // Stage 4: Rendering
    let render_result = execute_render(
        &meeting,
        &accuracy,
        Some(&output),
        human_readable.as_deref(),
        &RenderConfig::default(),
    )?;

    if let Some(path) = render_result.machine_path {
        info!("Report written to {:?}", path);
    }
    if let Some(path) = render_result.human_path {
        info!("Human-readable report written to {:?}", path);
    }

    log_outcome(&meeting, &accuracy);
    Ok(())
}

fn evaluate(actual_names: &str, meeting: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let actual: NameMap = load_actual_names(actual_names)?;
    let meeting_data = load_meeting_data(&meeting)?;

    let accuracy = evaluate_speaker_names(Some(&actual), &meeting_data);

    println!("Speaker Name Accuracy");
    println!("=====================");
    println!("{}", accuracy.section_text());

    if let Some(path) = output {
        let file = std::fs::File::create(&path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, &SpeakerAccuracyReport::from(&accuracy))
            .context("Failed to write JSON")?;
        match &accuracy {
            SpeakerAccuracy::Evaluated(_) => info!("Metrics written to {:?}", path),
            SpeakerAccuracy::Skipped(reason) => {
                info!("Evaluation skipped ({}), status written to {:?}", reason, path)
            }
        }
    }

    Ok(())
}

fn log_outcome(meeting: &MeetingData, accuracy: &SpeakerAccuracy) {
    info!("Complete: \"{}\", {}", meeting.title(), accuracy.summary_line());
}
