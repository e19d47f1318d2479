pub mod io;
pub mod llm;
pub mod models;
pub mod stages;

pub use io::{
    load_actual_names, load_meeting_data, parse_actual_names, parse_meeting_response,
    read_transcript, try_parse_name_map, HumanReport, MachineReport, MeetingDataError,
    NameInputError,
};
pub use llm::{AnthropicClient, AnthropicConfig, ValidationConfig};
pub use models::{
    MeetingData, Metrics, NameMap, NameValue, SkipReason, SpeakerAccuracy,
    SpeakerAccuracyReport, Tally,
};
pub use stages::{
    compute_metrics, evaluate_speaker_names, execute_render, execute_summarize, extract_name,
    normalize_key, reconcile, RenderConfig, SummarizeConfig,
};
