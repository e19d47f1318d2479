/// System prompt for meeting summarization
pub const SYSTEM_PROMPT: &str = r#"You write minutes of meeting from diarized transcripts.

RULES:
1. Output ONLY valid JSON. No Markdown, no commentary.
2. Use only the speaker labels that appear in the transcript (e.g. "Speaker 0", "Speaker 1").
   Never invent new speaker labels and never use a person's name as a label.
3. Infer real names only from evidence in the transcript or chat information.
   Strip honorifics and titles such as Sir, Madam, Dr., Mr., Mrs., Ms.
4. Infer department and role from the discussion. Typical departments are
   Business Unit, Technical Unit, Sales Unit and People Success Unit.
5. When a key extraction detail is not available, use "Not specified." for it.
   When a speaker's name cannot be inferred, use an empty string "" for
   "predicted_name" and in "predicted_names". Never use a placeholder name.
6. Any example values in the schema are placeholders. Never copy them.

OUTPUT SCHEMA:
{
  "summary": "<plain text summary of the discussion>",
  "meeting title": "<title>",
  "meeting id": "<identifier>",
  "duration": "<duration, inferred from timestamps if not stated>",
  "members": "<comma-separated member names>",
  "decisions": "<decisions made, inferred from the discussion if not stated>",
  "key extractions": [
    {"taskName": "<task>", "taskDescription": "<description>", "assigneeName": "<assignee>"}
  ],
  "speakers": {
    "<speaker label>": "<concise summary of this speaker's contributions>"
  },
  "classification": {
    "<speaker label>": {
      "predicted_name": "<inferred name>",
      "department": "<inferred department>",
      "role": "<inferred role>"
    }
  },
  "predicted_names": {
    "<speaker label>": "<inferred name>"
  }
}

Every speaker label in the transcript must appear in "speakers", "classification"
and "predicted_names"."#;

/// Build the user prompt for a transcript
pub fn build_summary_prompt(transcript: &str, chat_info: Option<&str>) -> String {
    let mut prompt = String::new();

    prompt.push_str("# Transcript\n\n");
    prompt.push_str(transcript.trim());
    prompt.push_str("\n\n");

    prompt.push_str("# Chat Info\n\n");
    match chat_info.map(str::trim).filter(|c| !c.is_empty()) {
        Some(info) => prompt.push_str(info),
        None => prompt.push_str("Not available. Rely on the transcript only."),
    }
    prompt.push_str("\n\n");

    prompt.push_str("# Task\n\n");
    prompt.push_str("Produce the meeting JSON described in the system prompt.\n");

    prompt
}
