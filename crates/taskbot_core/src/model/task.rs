use crate::error::AppError;
use crate::timefmt::{self, Timestamp};
use std::cmp::Ordering;
use std::fmt;

/// A tracked unit of work. Shared fields live here; the variant-specific
/// time fields live in [`TaskKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub description: String,
    pub done: bool,
    pub kind: TaskKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    Todo,
    Deadline { due: Timestamp },
    Event { start: Timestamp, end: Timestamp },
}

impl Task {
    pub fn todo<D: Into<String>>(description: D) -> Self {
        Self {
            description: description.into(),
            done: false,
            kind: TaskKind::Todo,
        }
    }

    pub fn deadline<D: Into<String>>(description: D, due: Timestamp) -> Self {
        Self {
            description: description.into(),
            done: false,
            kind: TaskKind::Deadline { due },
        }
    }

    /// Constructs an event. The start must not come after the end; that
    /// invariant is enforced here rather than at the parse site.
    pub fn event<D: Into<String>>(
        description: D,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Self, AppError> {
        if start > end {
            return Err(AppError::time_range(
                "an event has to start before it ends",
            ));
        }

        Ok(Self {
            description: description.into(),
            done: false,
            kind: TaskKind::Event { start, end },
        })
    }

    /// Variant tag used in displays, filters, and the save format.
    pub fn symbol(&self) -> char {
        match self.kind {
            TaskKind::Todo => 'T',
            TaskKind::Deadline { .. } => 'D',
            TaskKind::Event { .. } => 'E',
        }
    }

    pub fn has_time(&self) -> bool {
        self.time().is_some()
    }

    /// The primary timestamp: due date for deadlines, start for events.
    pub fn time(&self) -> Option<Timestamp> {
        match self.kind {
            TaskKind::Todo => None,
            TaskKind::Deadline { due } => Some(due),
            TaskKind::Event { start, .. } => Some(start),
        }
    }

    /// Sets the done flag; returns false if it was already set.
    pub fn set_done(&mut self) -> bool {
        let changed = !self.done;
        self.done = true;
        changed
    }

    /// Clears the done flag; returns false if it was already clear.
    pub fn set_undone(&mut self) -> bool {
        let changed = self.done;
        self.done = false;
        changed
    }

    /// Ordering used by `sort`: timed tasks compare by their primary
    /// timestamp, everything else compares equal so a stable sort
    /// leaves untimed tasks where they were.
    pub fn cmp_by_time(&self, other: &Task) -> Ordering {
        match (self.time(), other.time()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => Ordering::Equal,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = if self.done { 'X' } else { ' ' };
        write!(f, "[{}][{}] {}", self.symbol(), flag, self.description)?;

        match self.kind {
            TaskKind::Todo => Ok(()),
            TaskKind::Deadline { due } => {
                let due = timefmt::format_datetime(due).map_err(|_| fmt::Error)?;
                write!(f, " (by: {due})")
            }
            TaskKind::Event { start, end } => {
                let start = timefmt::format_datetime(start).map_err(|_| fmt::Error)?;
                let end = timefmt::format_datetime(end).map_err(|_| fmt::Error)?;
                write!(f, " ({start} - {end})")
            }
        }
    }
}
