//! The fixed command grammar: an ordered table of entries consulted
//! first-match-wins. Argument-taking commands list their spaced form
//! before the bare keyword so a missing argument is reported as such
//! instead of as an unknown command. The empty-prefix fallback at the
//! end always matches.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Bye,
    List,
    Mark,
    Unmark,
    Delete,
    Todo,
    Deadline,
    Event,
    Sort,
    Before,
    After,
    Filter,
    Find,
    MarkBare,
    UnmarkBare,
    DeleteBare,
    TodoBare,
    DeadlineBare,
    EventBare,
    BeforeBare,
    AfterBare,
    FilterBare,
    FindBare,
    NoMatch,
}

impl CommandKind {
    /// True for the bare entries: the keyword was recognized but its
    /// required argument was not given.
    pub fn is_bare(self) -> bool {
        matches!(
            self,
            Self::MarkBare
                | Self::UnmarkBare
                | Self::DeleteBare
                | Self::TodoBare
                | Self::DeadlineBare
                | Self::EventBare
                | Self::BeforeBare
                | Self::AfterBare
                | Self::FilterBare
                | Self::FindBare
        )
    }
}

#[derive(Debug)]
pub struct GrammarEntry {
    pub kind: CommandKind,
    pub prefix: &'static str,
    pub has_text: bool,
    pub needs_save: bool,
    pub lists_output: bool,
}

pub const GRAMMAR: &[GrammarEntry] = &[
    entry(CommandKind::Bye, "bye", false, false, false),
    entry(CommandKind::List, "list", false, false, true),
    entry(CommandKind::Mark, "mark ", true, true, false),
    entry(CommandKind::MarkBare, "mark", false, false, false),
    entry(CommandKind::Unmark, "unmark ", true, true, false),
    entry(CommandKind::UnmarkBare, "unmark", false, false, false),
    entry(CommandKind::Delete, "delete ", true, true, false),
    entry(CommandKind::DeleteBare, "delete", false, false, false),
    entry(CommandKind::Todo, "todo ", true, true, false),
    entry(CommandKind::TodoBare, "todo", false, false, false),
    entry(CommandKind::Deadline, "deadline ", true, true, false),
    entry(CommandKind::DeadlineBare, "deadline", false, false, false),
    entry(CommandKind::Event, "event ", true, true, false),
    entry(CommandKind::EventBare, "event", false, false, false),
    entry(CommandKind::Sort, "sort", false, true, true),
    entry(CommandKind::Before, "before ", true, false, true),
    entry(CommandKind::BeforeBare, "before", false, false, false),
    entry(CommandKind::After, "after ", true, false, true),
    entry(CommandKind::AfterBare, "after", false, false, false),
    entry(CommandKind::Filter, "filter ", true, false, true),
    entry(CommandKind::FilterBare, "filter", false, false, false),
    entry(CommandKind::Find, "find ", true, false, true),
    entry(CommandKind::FindBare, "find", false, false, false),
    entry(CommandKind::NoMatch, "", false, false, false),
];

const fn entry(
    kind: CommandKind,
    prefix: &'static str,
    has_text: bool,
    needs_save: bool,
    lists_output: bool,
) -> GrammarEntry {
    GrammarEntry {
        kind,
        prefix,
        has_text,
        needs_save,
        lists_output,
    }
}

impl GrammarEntry {
    /// Prefix match for text-taking entries (input strictly longer than
    /// the prefix), exact match for everything else.
    pub fn matches(&self, input: &str) -> bool {
        if self.has_text && input.len() > self.prefix.len() {
            input.starts_with(self.prefix)
        } else {
            input == self.prefix
        }
    }

    /// The trailing text after the prefix; empty for textless entries.
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        if self.has_text {
            &input[self.prefix.len()..]
        } else {
            ""
        }
    }

    pub fn missing_text(&self, input: &str) -> bool {
        self.has_text && self.text(input).trim().is_empty()
    }
}

/// Selects the grammar entry for one line of input. The fallback entry
/// matches everything, so this always succeeds.
pub fn match_entry(input: &str) -> &'static GrammarEntry {
    GRAMMAR
        .iter()
        .find(|entry| entry.matches(input))
        .unwrap_or(&GRAMMAR[GRAMMAR.len() - 1])
}
