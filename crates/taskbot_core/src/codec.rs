use crate::error::AppError;
use crate::model::{Task, TaskKind, TaskList};
use crate::timefmt;

/// Field separator for the save format. Raw input containing it is
/// rejected before parsing, so it can never appear in a description.
pub const SEP: &str = " | ";

/// One line per task: `symbol | done | description [| timestamps...]`.
/// No trailing newline; an empty list serializes to an empty string.
pub fn serialize(list: &TaskList) -> Result<String, AppError> {
    let mut lines = Vec::with_capacity(list.len());
    for task in list.tasks() {
        lines.push(encode_task(task)?);
    }
    Ok(lines.join("\n"))
}

/// Inverse of [`serialize`]. Malformed lines fail with a `corrupt_data`
/// error naming the 1-based line number.
pub fn deserialize(content: &str) -> Result<TaskList, AppError> {
    let mut list = TaskList::new();

    for (index, line) in content.lines().enumerate() {
        let task = decode_task(line).map_err(|err| {
            AppError::corrupt_data(format!("line {}: {}", index + 1, err.message()))
        })?;
        list.add(task);
    }

    Ok(list)
}

fn encode_task(task: &Task) -> Result<String, AppError> {
    let done = if task.done { "1" } else { "0" };
    let head = format!("{}{SEP}{}{SEP}{}", task.symbol(), done, task.description);

    match task.kind {
        TaskKind::Todo => Ok(head),
        TaskKind::Deadline { due } => {
            let due = timefmt::format_datetime(due)?;
            Ok(format!("{head}{SEP}{due}"))
        }
        TaskKind::Event { start, end } => {
            let start = timefmt::format_datetime(start)?;
            let end = timefmt::format_datetime(end)?;
            Ok(format!("{head}{SEP}{start}{SEP}{end}"))
        }
    }
}

fn decode_task(line: &str) -> Result<Task, AppError> {
    let fields: Vec<&str> = line.split(SEP).collect();
    if fields.len() < 3 {
        return Err(AppError::corrupt_data("too few fields"));
    }

    let done = match fields[1] {
        "1" => true,
        "0" => false,
        other => {
            return Err(AppError::corrupt_data(format!(
                "unreadable done flag \"{other}\""
            )));
        }
    };
    let description = fields[2];

    let mut task = match fields[0] {
        "T" => {
            expect_fields(&fields, 3)?;
            Task::todo(description)
        }
        "D" => {
            expect_fields(&fields, 4)?;
            let due = timefmt::parse_datetime(fields[3])
                .map_err(|err| AppError::corrupt_data(err.message().to_string()))?;
            Task::deadline(description, due)
        }
        "E" => {
            expect_fields(&fields, 5)?;
            let start = timefmt::parse_datetime(fields[3])
                .map_err(|err| AppError::corrupt_data(err.message().to_string()))?;
            let end = timefmt::parse_datetime(fields[4])
                .map_err(|err| AppError::corrupt_data(err.message().to_string()))?;
            Task::event(description, start, end)
                .map_err(|err| AppError::corrupt_data(err.message().to_string()))?
        }
        other => {
            return Err(AppError::corrupt_data(format!(
                "unknown task symbol \"{other}\""
            )));
        }
    };

    task.done = done;
    Ok(task)
}

fn expect_fields(fields: &[&str], expected: usize) -> Result<(), AppError> {
    if fields.len() != expected {
        return Err(AppError::corrupt_data(format!(
            "expected {expected} fields, found {}",
            fields.len()
        )));
    }
    Ok(())
}
