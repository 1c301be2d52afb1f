//! In-dialog chat state. Lives only while the chat popup exists.

use crate::ai::ChatReply;

pub const GREETING: &str = "Hello! How can I help you with your finances today?";
pub const CHAT_ERROR_TEXT: &str =
    "Sorry, I encountered an error processing your request. Please try again.";
pub const VOICE_ERROR_TEXT: &str =
    "Sorry, I encountered an error processing your voice request. Please try again.";

pub const QUICK_QUESTIONS: [&str; 3] = [
    "How are my stocks doing?",
    "Should I buy or sell anything?",
    "What stock news should I know?",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    /// Placeholder rendered as the stock comparison chart.
    StockChart,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayMessage {
    pub text: String,
    pub is_user: bool,
    pub kind: MessageKind,
}

impl DisplayMessage {
    fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: true,
            kind: MessageKind::Text,
        }
    }

    fn assistant(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: false,
            kind: MessageKind::Text,
        }
    }

    fn chart() -> Self {
        Self {
            text: "stock-chart".to_string(),
            is_user: false,
            kind: MessageKind::StockChart,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnKind {
    Chat,
    Voice,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<DisplayMessage>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self {
            messages: vec![DisplayMessage::assistant(GREETING)],
        }
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[DisplayMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(DisplayMessage::user(text));
    }

    /// Append the assistant reply, followed by the chart when requested.
    pub fn push_reply(&mut self, reply: &ChatReply) {
        self.messages.push(DisplayMessage::assistant(reply.text.clone()));
        if reply.show_chart {
            self.messages.push(DisplayMessage::chart());
        }
    }

    pub fn push_error(&mut self, turn: TurnKind) {
        let text = match turn {
            TurnKind::Chat => CHAT_ERROR_TEXT,
            TurnKind::Voice => VOICE_ERROR_TEXT,
        };
        self.messages.push(DisplayMessage::assistant(text));
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatSession {
    pub transcript: Transcript,
    pub open: bool,
    pub loading: bool,
    pub recording: bool,
    epoch: u64,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closing the dialog discards the conversation.
    pub fn close(&mut self) {
        self.open = false;
        self.loading = false;
        self.recording = false;
        self.epoch += 1;
        self.transcript.reset();
    }

    /// Bumped on every close. Async turns capture it when they start.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// A turn begun in `epoch` may only write back if the dialog was not
    /// closed in the meantime.
    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch == epoch
    }

    pub fn can_send(&self) -> bool {
        !self.loading && !self.recording
    }

    /// Start a turn for `message`. Returns the trimmed text to send, or `None`
    /// when the input is blank or a turn is already in flight.
    pub fn begin_turn(&mut self, message: &str) -> Option<String> {
        let message = message.trim();
        if message.is_empty() || self.loading {
            return None;
        }
        self.transcript.push_user(message);
        self.loading = true;
        Some(message.to_string())
    }

    pub fn finish_turn(&mut self, reply: &ChatReply) {
        self.transcript.push_reply(reply);
        self.loading = false;
    }

    pub fn fail_turn(&mut self, turn: TurnKind) {
        self.transcript.push_error(turn);
        self.loading = false;
    }
}
