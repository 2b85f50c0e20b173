/// Who said a line of the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Speaker {
    User,
    Bot,
}

impl Speaker {
    /// Line prefix used for this speaker in the serialized transcript.
    pub fn prefix(self) -> &'static str {
        match self {
            Speaker::User => "User: ",
            Speaker::Bot => "Bot: ",
        }
    }

    /// Label shown in front of the bubble in line-oriented output.
    pub fn display_label(self) -> &'static str {
        match self {
            Speaker::User => "You",
            Speaker::Bot => "Bot",
        }
    }

    pub fn is_user(self) -> bool {
        self == Speaker::User
    }
}

/// One line of a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl Turn {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Speaker::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Speaker::Bot, text)
    }

    /// Parse a single transcript line. Lines without a known prefix yield `None`.
    pub fn from_line(line: &str) -> Option<Self> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        [Speaker::User, Speaker::Bot]
            .into_iter()
            .find_map(|speaker| {
                line.strip_prefix(speaker.prefix())
                    .map(|text| Turn::new(speaker, text))
            })
    }

    /// The transcript line for this turn, without the trailing newline.
    pub fn to_line(&self) -> String {
        format!("{}{}", self.speaker.prefix(), self.text)
    }
}
