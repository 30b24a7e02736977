//! Kinds of single-line command prompts.

/// Which operation a command-mode buffer will be committed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Go to a source line number.
    Jump,
    /// Move to rows containing a substring.
    Search,
    /// Restrict visible rows to a regex.
    Filter,
    /// Attach a comment to the current row.
    Comment,
    /// Pick a mark color with a single key.
    Mark,
}

/// Hint shown while no prompt is active.
pub const IDLE_HINT: &str = "/ search   f filter   : jump   m mark   # comment";

impl CommandKind {
    /// Prompt kind started by typing `prefix` in view mode.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            ':' => Some(Self::Jump),
            '/' => Some(Self::Search),
            '#' => Some(Self::Comment),
            _ => None,
        }
    }

    /// Badge shown in the footer mode pill.
    pub fn badge(self) -> &'static str {
        match self {
            Self::Jump => "JUMP",
            Self::Search => "SEARCH",
            Self::Filter => "FILTER",
            Self::Comment => "COMMENT",
            Self::Mark => "MARK",
        }
    }

    /// Text before the input buffer.
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Jump => "line: ",
            Self::Search => "search: ",
            Self::Filter => "filter: ",
            Self::Comment => "comment: ",
            Self::Mark => "mark: ",
        }
    }

    /// One-line key hint for this prompt.
    pub fn hint(self) -> &'static str {
        match self {
            Self::Mark => "r/g/a: mark   c: clear   esc: cancel",
            _ => "enter: apply   esc: cancel",
        }
    }

    /// Whether the prompt collects text (mark mode takes single keys).
    pub fn takes_text(self) -> bool {
        !matches!(self, Self::Mark)
    }
}
