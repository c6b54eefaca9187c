//! Conversation state owned by the session controller.

use crate::completion::{Message, Role};

/// Display mirror of one [`Message`], labelled with a human role name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub role: String,
    pub content: String,
}

impl TranscriptEntry {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

impl From<&Message> for TranscriptEntry {
    fn from(message: &Message) -> Self {
        Self::new(message.role.as_str(), message.content.clone())
    }
}

/// The conversation: wire history, transcript, model and temperature.
///
/// `messages[0]` and `transcript[0]` always hold the system prompt. Fields
/// are private so every mutation goes through methods that keep both
/// sequences in step.
#[derive(Debug, Clone)]
pub struct Session {
    system_prompt: String,
    messages: Vec<Message>,
    transcript: Vec<TranscriptEntry>,
    current_model: String,
    temperature: f32,
}

impl Session {
    pub fn new(system_prompt: impl Into<String>, model: impl Into<String>, temperature: f32) -> Self {
        let system = Message::system(system_prompt);
        Self {
            system_prompt: system.content.clone(),
            transcript: vec![TranscriptEntry::from(&system)],
            messages: vec![system],
            current_model: model.into(),
            temperature,
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn current_model(&self) -> &str {
        &self.current_model
    }

    pub const fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Number of user turns since the last reset.
    pub fn user_turns(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.role == Role::User)
            .count()
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.transcript.push(TranscriptEntry::from(&message));
        self.messages.push(message);
    }

    pub(crate) fn set_model(&mut self, model: impl Into<String>) {
        self.current_model = model.into();
    }

    /// Drops everything but the system prompt. Idempotent.
    pub(crate) fn reset(&mut self) {
        self.messages.truncate(1);
        self.transcript.truncate(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_holds_only_system_prompt() {
        let session = Session::new("Be brief.", "openai/gpt-4.1-mini", 0.7);

        assert_eq!(session.messages(), [Message::system("Be brief.")]);
        assert_eq!(
            session.transcript(),
            [TranscriptEntry::new("system", "Be brief.")]
        );
        assert_eq!(session.current_model(), "openai/gpt-4.1-mini");
        assert_eq!(session.user_turns(), 0);
    }

    #[test]
    fn test_push_mirrors_into_transcript() {
        let mut session = Session::new("sys", "m", 0.7);
        session.push(Message::user("hi"));
        session.push(Message::assistant("hello"));

        assert_eq!(session.messages().len(), 3);
        assert_eq!(session.transcript()[1], TranscriptEntry::new("user", "hi"));
        assert_eq!(
            session.transcript()[2],
            TranscriptEntry::new("assistant", "hello")
        );
        assert_eq!(session.user_turns(), 1);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut session = Session::new("sys", "m", 0.7);
        session.push(Message::user("hi"));
        session.reset();
        session.reset();

        assert_eq!(session.messages(), [Message::system("sys")]);
        assert_eq!(session.transcript().len(), 1);
    }
}
