use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use tracing::info;

use crate::io::{HumanReport, MachineReport};
use crate::models::{MeetingData, SpeakerAccuracy};

/// Configuration for Stage 4 rendering
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Whether to generate machine-readable output
    pub generate_machine: bool,
    /// Whether to generate human-readable output
    pub generate_human: bool,
    /// Column at which report paragraphs wrap
    pub wrap_width: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            generate_machine: true,
            generate_human: true,
            wrap_width: 80,
        }
    }
}

/// Result of Stage 4 rendering
#[derive(Debug)]
pub struct RenderResult {
    /// Path to machine report (if generated)
    pub machine_path: Option<PathBuf>,
    /// Path to human report (if generated)
    pub human_path: Option<PathBuf>,
}

/// Execute Stage 4: Rendering
///
/// Produces two output views:
/// 1. Machine report: JSON with meeting fields, speakers and accuracy metrics
/// 2. Human report: the minutes of meeting as formatted text
pub fn execute_render(
    meeting: &MeetingData,
    accuracy: &SpeakerAccuracy,
    machine_output: Option<&Path>,
    human_output: Option<&Path>,
    config: &RenderConfig,
) -> Result<RenderResult> {
    let mut result = RenderResult {
        machine_path: None,
        human_path: None,
    };

    if config.generate_machine {
        if let Some(path) = machine_output {
            info!("Writing machine report to {:?}", path);
            let machine = MachineReport::new(meeting, accuracy, Utc::now());
            machine.write_json(path)?;
            result.machine_path = Some(path.to_path_buf());
        }
    }

    if config.generate_human {
        if let Some(path) = human_output {
            info!("Writing human report to {:?}", path);
            let human = HumanReport::new(meeting, accuracy).with_width(config.wrap_width);
            human.write_file(path)?;
            result.human_path = Some(path.to_path_buf());
        }
    }

    Ok(result)
}
