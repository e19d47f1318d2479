use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{
    coerce_to_string, Classification, KeyExtractions, MeetingData, SpeakerAccuracy,
    SpeakerAccuracyReport,
};
use crate::stages::normalize_key;

const NOT_AVAILABLE: &str = "N/A";

/// Machine-readable report
#[derive(Debug, Clone, Serialize)]
pub struct MachineReport {
    pub report_id: String,
    pub generated_at: String,
    pub meeting: MeetingSection,
    /// One entry per speaker the summarizer described
    pub speakers: Vec<SpeakerEntry>,
    pub speaker_accuracy: SpeakerAccuracyReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct MeetingSection {
    pub title: String,
    pub meeting_id: String,
    pub duration: String,
    pub members: String,
    pub summary: String,
    pub decisions: String,
    pub key_extractions: KeyExtractions,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpeakerEntry {
    pub label: String,
    pub summary: String,
    pub inferred_name: String,
    pub department: String,
    pub role: String,
}

impl MachineReport {
    pub fn new(
        meeting: &MeetingData,
        accuracy: &SpeakerAccuracy,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let speakers = meeting
            .speakers
            .iter()
            .map(|(label, summary)| {
                let class = find_classification(meeting, label);
                SpeakerEntry {
                    label: label.clone(),
                    summary: summary.clone(),
                    inferred_name: or_not_available(class.map(|c| c.predicted_name.as_str())),
                    department: or_not_available(class.map(|c| c.department.as_str())),
                    role: or_not_available(class.map(|c| c.role.as_str())),
                }
            })
            .collect();

        Self {
            report_id: uuid::Uuid::new_v4().to_string(),
            generated_at: generated_at.to_rfc3339(),
            meeting: MeetingSection {
                title: meeting.title().to_string(),
                meeting_id: meeting.meeting_id.clone(),
                duration: meeting.duration.clone(),
                members: meeting.members.clone(),
                summary: meeting.summary.clone(),
                decisions: meeting.decisions.clone(),
                key_extractions: meeting.key_extractions.clone(),
            },
            speakers,
            speaker_accuracy: SpeakerAccuracyReport::from(accuracy),
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}

/// Human-readable minutes of meeting
pub struct HumanReport<'a> {
    meeting: &'a MeetingData,
    accuracy: &'a SpeakerAccuracy,
    width: usize,
}

impl<'a> HumanReport<'a> {
    pub fn new(meeting: &'a MeetingData, accuracy: &'a SpeakerAccuracy) -> Self {
        Self {
            meeting,
            accuracy,
            width: 80,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Format the report as text
    pub fn format(&self) -> String {
        let meeting = self.meeting;
        let mut output = String::new();

        let title = meeting.title();
        output.push_str(title);
        output.push('\n');
        output.push_str(&"=".repeat(title.chars().count()));
        output.push_str("\n\n");

        output.push_str(&format!("Meeting ID: {}\n", meeting.meeting_id));
        output.push_str(&format!("Duration: {}\n", meeting.duration));
        output.push_str(&format!("Members: {}\n\n", meeting.members));

        push_section(
            &mut output,
            "Summary of Meeting",
            &wrap_paragraphs(&meeting.summary, self.width),
        );

        if !meeting.decisions.trim().is_empty() {
            push_section(
                &mut output,
                "Decisions Made",
                &wrap_paragraphs(&meeting.decisions, self.width),
            );
        }

        if !meeting.key_extractions.is_empty() {
            push_section(
                &mut output,
                "Key Extractions",
                &format_key_extractions(&meeting.key_extractions),
            );
        }

        if meeting.has_speaker_identification() {
            push_section(
                &mut output,
                "Speaker Identification",
                &self.format_speakers(),
            );
        }

        push_section(
            &mut output,
            "Speaker Name Accuracy",
            &self.accuracy.section_text(),
        );

        output
    }

    fn format_speakers(&self) -> String {
        let mut blocks = Vec::new();

        for (label, summary) in &self.meeting.speakers {
            let class = find_classification(self.meeting, label);
            let mut block = wrap_text(&format!("{}: {}", label, summary), self.width);
            block.push_str(&format!(
                "\nInferred Name: {}",
                or_not_available(class.map(|c| c.predicted_name.as_str()))
            ));
            block.push_str(&format!(
                "\nDepartment: {}",
                or_not_available(class.map(|c| c.department.as_str()))
            ));
            block.push_str(&format!(
                "\nRole: {}",
                or_not_available(class.map(|c| c.role.as_str()))
            ));
            blocks.push(block);
        }

        blocks.join("\n\n")
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

/// Classification for a speaker label, falling back to a normalized-key match
fn find_classification<'a>(meeting: &'a MeetingData, label: &str) -> Option<&'a Classification> {
    meeting.classification.get(label).or_else(|| {
        let key = normalize_key(label);
        meeting
            .classification
            .iter()
            .find(|(other, _)| normalize_key(other) == key)
            .map(|(_, class)| class)
    })
}

fn or_not_available(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn push_section(output: &mut String, title: &str, body: &str) {
    let header = format!("{}:", title);
    output.push_str(&header);
    output.push('\n');
    output.push_str(&"-".repeat(header.chars().count()));
    output.push('\n');
    output.push_str(body);
    output.push_str("\n\n");
}

fn format_key_extractions(extractions: &KeyExtractions) -> String {
    match extractions {
        KeyExtractions::None => String::new(),
        KeyExtractions::Text(text) => text.clone(),
        KeyExtractions::Fields(fields) => format_fields(fields.iter(), ""),
        KeyExtractions::List(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let body = match item {
                    serde_json::Value::Object(fields) => format_fields(fields.iter(), "  "),
                    other => format!("  {}", coerce_to_string(other)),
                };
                format!("Extraction #{}:\n{}", i + 1, body)
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

fn format_fields<'a>(
    fields: impl Iterator<Item = (&'a String, &'a serde_json::Value)>,
    indent: &str,
) -> String {
    fields
        .map(|(key, value)| {
            let text = coerce_to_string(value);
            format!(
                "{}{}: {}",
                indent,
                key,
                if text.is_empty() { NOT_AVAILABLE } else { text.as_str() }
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap each line of a multi-line text independently
fn wrap_paragraphs(text: &str, width: usize) -> String {
    text.lines()
        .map(|line| wrap_text(line, width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap text at approximately the given width
fn wrap_text(text: &str, width: usize) -> String {
    let mut result = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len + word_len + 1 > width && line_len > 0 {
            result.push('\n');
            line_len = 0;
        }
        if line_len > 0 {
            result.push(' ');
            line_len += 1;
        }
        result.push_str(word);
        line_len += word_len;
    }

    result
}
