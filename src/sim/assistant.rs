//! Assistant console state: transcript, attachments, canned content.
//!
//! The "assistant" is a mock. Replies are drawn uniformly from a fixed
//! response set and delivered after a fixed delay by
//! [`super::responder::Responder`]; nothing here ever calls a model.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;

/// Canned replies the mock assistant picks from.
pub const CANNED_RESPONSES: &[&str] = &[
    "Based on the medical data provided, I can see several key indicators. The patient's vitals show stable readings with heart rate within normal range. I recommend continuing current treatment protocol and monitoring for any changes.",
    "I've analyzed the uploaded medical document. The lab results indicate normal white blood cell count and hemoglobin levels. However, I notice slightly elevated blood sugar levels that may require dietary adjustments.",
    "The MRI scan shows no significant abnormalities in the brain structure. All major regions appear healthy with normal tissue density. This is consistent with the patient's reported symptoms.",
    "After reviewing the EHR data, I've identified a pattern in the patient's medication history. There appears to be good compliance with prescribed medications, and vital trends show improvement over the past month.",
    "The CT scan reveals clear lung fields with no signs of pneumonia or other respiratory complications. The cardiac silhouette is within normal limits. Patient can continue with current recovery plan.",
];

/// Greeting pre-seeded into every transcript.
pub const GREETING: &str = "Hello! I'm your AI medical assistant. I can analyze medical documents, MRI scans, CT scans, EHR data, and answer clinical questions. How can I help you today?";

/// Selectable model entries. Selection only changes the header caption.
#[derive(Debug, Clone, Copy)]
pub struct ModelEntry {
    pub name: &'static str,
    pub description: &'static str,
}

pub const MODELS: &[ModelEntry] = &[
    ModelEntry {
        name: "GPT-4 Turbo",
        description: "Advanced reasoning for complex medical analysis",
    },
    ModelEntry {
        name: "Claude 3.5",
        description: "Detailed medical document analysis",
    },
    ModelEntry {
        name: "Gemini Pro",
        description: "Multi-modal medical imaging analysis",
    },
];

pub const SAMPLE_QUERIES: &[&str] = &[
    "Analyze recent lab results",
    "Review MRI scan findings",
    "Explain medication interactions",
    "Summarize patient history",
];

/// Extensions the upload filter advertises. Advisory only: other
/// extensions still attach, they just surface a notice.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png", "dcm", "txt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// File metadata captured at attach time. Contents are never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub name: String,
    pub kind: &'static str,
    pub size: String,
}

impl Attachment {
    /// Capture name, kind and size for a file on disk.
    ///
    /// Only `fs::metadata` is consulted; the file is never opened.
    pub fn from_path(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path)
            .with_context(|| format!("cannot stat {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            kind: kind_for(&name),
            size: format!("{:.2} KB", meta.len() as f64 / 1024.0),
            name,
        })
    }

    /// Whether the extension is on the advertised accept list.
    pub fn is_recognized(&self) -> bool {
        extension(&self.name)
            .map(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }
}

fn extension(name: &str) -> Option<String> {
    Path::new(name).extension().map(|e| e.to_string_lossy().to_lowercase())
}

fn kind_for(name: &str) -> &'static str {
    match extension(name).as_deref() {
        Some("pdf") => "application/pdf",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("dcm") => "application/dicom",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// One transcript entry.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: u64,
    pub role: Role,
    pub content: String,
    /// HH:MM:SS wall-clock label.
    pub timestamp: String,
    pub attachments: Vec<Attachment>,
}

/// The assistant tab's mutable state.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub messages: Vec<Message>,
    /// Text being composed in the input line.
    pub input: String,
    /// Attachments staged for the next send.
    pub staged: Vec<Attachment>,
    pub selected_model: usize,
    sample_cursor: usize,
    next_id: u64,
}

impl Transcript {
    /// Fresh transcript holding only the greeting.
    pub fn new(now: DateTime<Local>) -> Self {
        let mut transcript = Self {
            messages: Vec::new(),
            input: String::new(),
            staged: Vec::new(),
            selected_model: 0,
            sample_cursor: 0,
            next_id: 1,
        };
        transcript.push(Role::Assistant, GREETING.to_string(), Vec::new(), now);
        transcript
    }

    fn push(&mut self, role: Role, content: String, attachments: Vec<Attachment>, now: DateTime<Local>) {
        self.messages.push(Message {
            id: self.next_id,
            role,
            content,
            timestamp: now.format("%H:%M:%S").to_string(),
            attachments,
        });
        self.next_id += 1;
    }

    /// A send is allowed when there is trimmed text or at least one
    /// staged attachment.
    pub fn can_send(&self) -> bool {
        !self.input.trim().is_empty() || !self.staged.is_empty()
    }

    /// Consume the input line and staged attachments into a user message.
    ///
    /// Returns `false` without appending anything when [`can_send`] is
    /// not satisfied.
    ///
    /// [`can_send`]: Transcript::can_send
    pub fn submit(&mut self, now: DateTime<Local>) -> bool {
        if !self.can_send() {
            return false;
        }

        let content = self.input.trim().to_string();
        let attachments = std::mem::take(&mut self.staged);
        self.input.clear();
        self.push(Role::User, content, attachments, now);
        true
    }

    /// Append a delivered assistant reply.
    pub fn receive(&mut self, content: String, now: DateTime<Local>) {
        self.push(Role::Assistant, content, Vec::new(), now);
    }

    /// Cycle the model selection.
    pub fn next_model(&mut self) {
        self.selected_model = (self.selected_model + 1) % MODELS.len();
    }

    pub fn model(&self) -> ModelEntry {
        MODELS[self.selected_model]
    }

    /// Replace the input line with the next sample query.
    pub fn cycle_sample_query(&mut self) {
        self.input = SAMPLE_QUERIES[self.sample_cursor % SAMPLE_QUERIES.len()].to_string();
        self.sample_cursor += 1;
    }

    /// Drop the most recently staged attachment.
    pub fn pop_staged(&mut self) {
        self.staged.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_transcript_starts_with_greeting() {
        let transcript = Transcript::new(now());
        assert_eq!(transcript.messages.len(), 1);
        assert_eq!(transcript.messages[0].role, Role::Assistant);
        assert_eq!(transcript.messages[0].content, GREETING);
    }

    #[test]
    fn test_empty_submit_is_a_noop() {
        let mut transcript = Transcript::new(now());
        transcript.input = "   ".to_string();

        assert!(!transcript.submit(now()));
        assert_eq!(transcript.messages.len(), 1);
        assert_eq!(transcript.input, "   ", "no-op must not consume input");
    }

    #[test]
    fn test_submit_appends_exactly_one_user_message() {
        let mut transcript = Transcript::new(now());
        transcript.input = "  test  ".to_string();

        assert!(transcript.submit(now()));
        assert_eq!(transcript.messages.len(), 2);
        let msg = transcript.messages.last().unwrap();
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "test");
        assert!(transcript.input.is_empty());
    }

    #[test]
    fn test_attachment_only_submit_is_allowed() {
        let mut transcript = Transcript::new(now());
        transcript.staged.push(Attachment {
            name: "scan.dcm".to_string(),
            kind: "application/dicom",
            size: "1.00 KB".to_string(),
        });

        assert!(transcript.submit(now()));
        let msg = transcript.messages.last().unwrap();
        assert_eq!(msg.attachments.len(), 1);
        assert!(transcript.staged.is_empty(), "staged list must be consumed");
    }

    #[test]
    fn test_attachment_captures_metadata_only() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"sixteen bytes!!!").unwrap();

        let attachment = Attachment::from_path(file.path()).unwrap();
        assert_eq!(attachment.kind, "text/plain");
        assert_eq!(attachment.size, "0.02 KB");
        assert!(attachment.is_recognized());
    }

    #[test]
    fn test_attachment_missing_file_errors() {
        assert!(Attachment::from_path(Path::new("/nonexistent/report.pdf")).is_err());
    }

    #[test]
    fn test_unlisted_extension_is_flagged_but_usable() {
        let file = tempfile::Builder::new().suffix(".exe").tempfile().unwrap();
        let attachment = Attachment::from_path(file.path()).unwrap();
        assert!(!attachment.is_recognized());
        assert_eq!(attachment.kind, "application/octet-stream");
    }

    #[test]
    fn test_model_cycle_wraps() {
        let mut transcript = Transcript::new(now());
        for _ in 0..MODELS.len() {
            transcript.next_model();
        }
        assert_eq!(transcript.selected_model, 0);
    }

    #[test]
    fn test_sample_queries_cycle_into_input() {
        let mut transcript = Transcript::new(now());
        transcript.cycle_sample_query();
        assert_eq!(transcript.input, SAMPLE_QUERIES[0]);
        transcript.cycle_sample_query();
        assert_eq!(transcript.input, SAMPLE_QUERIES[1]);
    }
}
