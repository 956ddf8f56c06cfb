use std::fmt;

/// Errors surfaced by the interpreter, the task list, and the storage
/// layer. Every variant carries a user-facing message; `code` gives a
/// stable machine-readable identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Raw input contained the reserved field separator.
    InputRejected(String),
    /// No grammar entry other than the fallback matched.
    Unrecognized(String),
    /// A command that requires trailing text was given none.
    MissingArgument(String),
    /// The trailing text was not a parseable integer index.
    InvalidIndex(String),
    /// Index below 1.
    IndexTooLow(String),
    /// Index above the current list size.
    IndexTooHigh(String),
    /// A datetime string did not match the expected pattern.
    DateFormat(String),
    /// `/to` appeared before `/from` in an event command.
    KeywordOrder(String),
    /// An event ends before it starts.
    TimeRange(String),
    /// The command needs at least one task to work with.
    EmptyList(String),
    /// `filter` was given a category with no known alias.
    UnknownCategory(String),
    /// A persisted line could not be decoded.
    CorruptData(String),
    Io(String),
}

impl AppError {
    pub fn input_rejected<M: Into<String>>(message: M) -> Self {
        Self::InputRejected(message.into())
    }

    pub fn unrecognized<M: Into<String>>(message: M) -> Self {
        Self::Unrecognized(message.into())
    }

    pub fn missing_argument<M: Into<String>>(message: M) -> Self {
        Self::MissingArgument(message.into())
    }

    pub fn invalid_index<M: Into<String>>(message: M) -> Self {
        Self::InvalidIndex(message.into())
    }

    pub fn index_too_low<M: Into<String>>(message: M) -> Self {
        Self::IndexTooLow(message.into())
    }

    pub fn index_too_high<M: Into<String>>(message: M) -> Self {
        Self::IndexTooHigh(message.into())
    }

    pub fn date_format<M: Into<String>>(message: M) -> Self {
        Self::DateFormat(message.into())
    }

    pub fn keyword_order<M: Into<String>>(message: M) -> Self {
        Self::KeywordOrder(message.into())
    }

    pub fn time_range<M: Into<String>>(message: M) -> Self {
        Self::TimeRange(message.into())
    }

    pub fn empty_list<M: Into<String>>(message: M) -> Self {
        Self::EmptyList(message.into())
    }

    pub fn unknown_category<M: Into<String>>(message: M) -> Self {
        Self::UnknownCategory(message.into())
    }

    pub fn corrupt_data<M: Into<String>>(message: M) -> Self {
        Self::CorruptData(message.into())
    }

    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InputRejected(_) => "input_rejected",
            Self::Unrecognized(_) => "unrecognized_command",
            Self::MissingArgument(_) => "missing_argument",
            Self::InvalidIndex(_) => "invalid_argument",
            Self::IndexTooLow(_) | Self::IndexTooHigh(_) => "index_out_of_range",
            Self::DateFormat(_) => "date_format",
            Self::KeywordOrder(_) => "keyword_order",
            Self::TimeRange(_) => "time_range",
            Self::EmptyList(_) => "empty_list",
            Self::UnknownCategory(_) => "unknown_category",
            Self::CorruptData(_) => "corrupt_data",
            Self::Io(_) => "io_error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InputRejected(message)
            | Self::Unrecognized(message)
            | Self::MissingArgument(message)
            | Self::InvalidIndex(message)
            | Self::IndexTooLow(message)
            | Self::IndexTooHigh(message)
            | Self::DateFormat(message)
            | Self::KeywordOrder(message)
            | Self::TimeRange(message)
            | Self::EmptyList(message)
            | Self::UnknownCategory(message)
            | Self::CorruptData(message)
            | Self::Io(message) => message,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}
