use crate::codec;
use crate::error::AppError;
use crate::grammar::{self, CommandKind, GrammarEntry};
use crate::model::{Task, TaskList};
use crate::timefmt;

/// Semantic result of one command. The caller decides how to render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Message(String),
    List { header: String, lines: Vec<String> },
}

/// One parsed line of input: the selected grammar entry plus its
/// trailing text. Stateless beyond that; every call to [`respond`]
/// works against the list it is handed.
///
/// [`respond`]: Parser::respond
#[derive(Debug)]
pub struct Parser {
    entry: &'static GrammarEntry,
    text: String,
}

/// Parses and dispatches one line in a single call.
pub fn interpret(line: &str, list: &mut TaskList) -> Result<Response, AppError> {
    Parser::parse(line)?.respond(list)
}

impl Parser {
    /// Matches one raw line against the grammar. Input carrying the
    /// reserved separator is rejected before any matching happens.
    pub fn parse(input: &str) -> Result<Self, AppError> {
        if input.contains(codec::SEP) {
            return Err(AppError::input_rejected(format!(
                "please avoid \"{}\" in your input",
                codec::SEP
            )));
        }

        let entry = grammar::match_entry(input);
        if entry.kind == CommandKind::NoMatch {
            return Err(AppError::unrecognized("sorry, I don't recognize that command"));
        }

        Ok(Self {
            entry,
            text: entry.text(input).to_string(),
        })
    }

    pub fn is_bye(&self) -> bool {
        self.entry.kind == CommandKind::Bye
    }

    /// Whether the caller should persist the list after a successful
    /// dispatch.
    pub fn needs_save(&self) -> bool {
        self.entry.needs_save
    }

    pub fn respond(&self, list: &mut TaskList) -> Result<Response, AppError> {
        if self.entry.kind.is_bare() || (self.entry.has_text && self.text.trim().is_empty()) {
            return Err(AppError::missing_argument("that command needs an input"));
        }

        let text = self.text.trim();

        match self.entry.kind {
            CommandKind::Bye => Ok(Response::Message("See you again!".to_string())),

            CommandKind::List => {
                if list.is_empty() {
                    Ok(Response::Message("You have no tasks!".to_string()))
                } else {
                    Ok(Response::List {
                        header: "Here's what you have:".to_string(),
                        lines: list.display_all(),
                    })
                }
            }

            CommandKind::Mark => {
                let (changed, task) = list.mark(parse_index(text)?)?;
                Ok(Response::Message(if changed {
                    format!("Nice, you've completed: {task}")
                } else {
                    format!("You had already done: {task}")
                }))
            }

            CommandKind::Unmark => {
                let (changed, task) = list.unmark(parse_index(text)?)?;
                Ok(Response::Message(if changed {
                    format!("Okay, unmarked: {task}")
                } else {
                    format!("You hadn't done this yet: {task}")
                }))
            }

            CommandKind::Delete => {
                let task = list.remove(parse_index(text)?)?;
                Ok(Response::Message(format!("Got it, deleted: {task}")))
            }

            CommandKind::Todo => {
                let task = Task::todo(text);
                list.add(task.clone());
                Ok(Response::Message(format!("Added: {task}")))
            }

            CommandKind::Deadline => {
                const BY: &str = "/by ";

                let Some(by_index) = text.find(BY) else {
                    return Err(AppError::missing_argument("missing \"/by\" keyword"));
                };
                let description = text[..by_index].trim();
                let due_text = text[by_index + BY.len()..].trim();

                if description.is_empty() {
                    return Err(AppError::missing_argument("missing deadline description"));
                }
                if due_text.is_empty() {
                    return Err(AppError::missing_argument("missing due date"));
                }

                let task = Task::deadline(description, timefmt::parse_datetime(due_text)?);
                list.add(task.clone());
                Ok(Response::Message(format!("Added: {task}")))
            }

            CommandKind::Event => {
                const FROM: &str = "/from ";
                const TO: &str = "/to ";

                let Some(from_index) = text.find(FROM) else {
                    return Err(AppError::missing_argument("missing \"/from\" keyword"));
                };
                let Some(to_index) = text.find(TO) else {
                    return Err(AppError::missing_argument("missing \"/to\" keyword"));
                };
                if to_index < from_index {
                    return Err(AppError::keyword_order("\"/from\" goes before \"/to\""));
                }

                let description = text[..from_index].trim();
                let start_text = text[from_index + FROM.len()..to_index].trim();
                let end_text = text[to_index + TO.len()..].trim();

                if description.is_empty() {
                    return Err(AppError::missing_argument("missing event description"));
                }
                if start_text.is_empty() {
                    return Err(AppError::missing_argument("missing start date"));
                }
                if end_text.is_empty() {
                    return Err(AppError::missing_argument("missing end date"));
                }

                let start = timefmt::parse_datetime(start_text)?;
                let end = timefmt::parse_datetime(end_text)?;
                let task = Task::event(description, start, end)?;
                list.add(task.clone());
                Ok(Response::Message(format!("Added: {task}")))
            }

            CommandKind::Sort => {
                if list.is_empty() {
                    return Err(AppError::empty_list("you have no tasks to sort"));
                }
                list.sort_by_time();
                Ok(Response::List {
                    header: "Tasks sorted by date:".to_string(),
                    lines: list.display_all(),
                })
            }

            CommandKind::Before => {
                if list.is_empty() {
                    return Err(AppError::empty_list("you have no tasks to filter"));
                }
                let moment = timefmt::parse_datetime(text)?;
                let lines = list.display_filter(|task| {
                    task.time().is_some_and(|time| time < moment)
                });
                if lines.is_empty() {
                    Ok(Response::Message(format!(
                        "You don't have any tasks before {text}"
                    )))
                } else {
                    Ok(Response::List {
                        header: format!("Your tasks before {text}:"),
                        lines,
                    })
                }
            }

            CommandKind::After => {
                if list.is_empty() {
                    return Err(AppError::empty_list("you have no tasks to filter"));
                }
                let moment = timefmt::parse_datetime(text)?;
                let lines = list.display_filter(|task| {
                    task.time().is_some_and(|time| time > moment)
                });
                if lines.is_empty() {
                    Ok(Response::Message(format!(
                        "You don't have any tasks after {text}"
                    )))
                } else {
                    Ok(Response::List {
                        header: format!("Your tasks after {text}:"),
                        lines,
                    })
                }
            }

            CommandKind::Filter => {
                if list.is_empty() {
                    return Err(AppError::empty_list("you have no tasks to filter"));
                }

                let category = text.to_lowercase();
                let (header, lines) = match category.as_str() {
                    "todo" | "td" | "t" => {
                        ("Your to-dos:", list.display_filter(|t| t.symbol() == 'T'))
                    }
                    "deadline" | "dl" | "d" => {
                        ("Your deadlines:", list.display_filter(|t| t.symbol() == 'D'))
                    }
                    "event" | "ev" | "e" => {
                        ("Your events:", list.display_filter(|t| t.symbol() == 'E'))
                    }
                    "complete" | "done" | "completed" | "x" => (
                        "Tasks you've completed:",
                        list.display_filter(|t| t.done),
                    ),
                    // "not done" keeps its space; it is a literal alias.
                    "incomplete" | "not done" | "!done" | "undone" => (
                        "Tasks you haven't completed yet:",
                        list.display_filter(|t| !t.done),
                    ),
                    _ => {
                        return Err(AppError::unknown_category(
                            "I'm not sure what task category that is",
                        ));
                    }
                };

                if lines.is_empty() {
                    Ok(Response::Message("You don't have any of those".to_string()))
                } else {
                    Ok(Response::List {
                        header: header.to_string(),
                        lines,
                    })
                }
            }

            CommandKind::Find => {
                if list.is_empty() {
                    return Err(AppError::empty_list("you have no tasks to search"));
                }

                let needle = text.to_lowercase();
                let lines = list
                    .display_filter(|task| task.description.to_lowercase().contains(&needle));

                if lines.is_empty() {
                    Ok(Response::Message(
                        "Nothing matches your search".to_string(),
                    ))
                } else {
                    Ok(Response::List {
                        header: "Here's what I found:".to_string(),
                        lines,
                    })
                }
            }

            // Bare variants are caught by the early check; the fallback
            // entry never reaches respond.
            _ => Err(AppError::missing_argument("that command needs an input")),
        }
    }
}

fn parse_index(text: &str) -> Result<i64, AppError> {
    text.parse::<i64>()
        .map_err(|_| AppError::invalid_index(format!("\"{text}\" is not a task number")))
}

#[cfg(test)]
mod tests {
    use super::{Parser, Response, interpret};
    use crate::model::{Task, TaskList};
    use time::macros::datetime;

    fn message(response: Response) -> String {
        match response {
            Response::Message(text) => text,
            Response::List { header, .. } => panic!("expected message, got list \"{header}\""),
        }
    }

    fn lines(response: Response) -> Vec<String> {
        match response {
            Response::List { lines, .. } => lines,
            Response::Message(text) => panic!("expected list, got message \"{text}\""),
        }
    }

    #[test]
    fn todo_on_empty_list_adds_and_lists() {
        let mut list = TaskList::new();

        let added = message(interpret("todo buy milk", &mut list).unwrap());
        assert!(added.contains("buy milk"));

        let listed = lines(interpret("list", &mut list).unwrap());
        assert_eq!(listed, vec!["1. [T][ ] buy milk"]);
    }

    #[test]
    fn list_on_empty_collection_is_a_message_not_a_list() {
        let mut list = TaskList::new();
        let response = interpret("list", &mut list).unwrap();
        assert!(matches!(response, Response::Message(_)));
    }

    #[test]
    fn unrecognized_input_fails_at_parse_time() {
        let err = Parser::parse("hello there").unwrap_err();
        assert_eq!(err.code(), "unrecognized_command");
    }

    #[test]
    fn separator_in_input_is_rejected_before_matching() {
        let err = Parser::parse("todo buy | milk").unwrap_err();
        assert_eq!(err.code(), "input_rejected");
    }

    #[test]
    fn bare_keyword_reports_missing_argument() {
        let mut list = TaskList::new();
        let err = interpret("todo", &mut list).unwrap_err();
        assert_eq!(err.code(), "missing_argument");

        let err = interpret("mark", &mut list).unwrap_err();
        assert_eq!(err.code(), "missing_argument");
    }

    #[test]
    fn whitespace_argument_reports_missing_argument() {
        let mut list = TaskList::new();
        let err = interpret("todo    ", &mut list).unwrap_err();
        assert_eq!(err.code(), "missing_argument");
    }

    #[test]
    fn mark_unmark_round_trip_with_distinct_messages() {
        let mut list = TaskList::new();
        list.add(Task::todo("demo"));

        let first = message(interpret("mark 1", &mut list).unwrap());
        assert!(first.contains("completed"));

        let again = message(interpret("mark 1", &mut list).unwrap());
        assert!(again.contains("already"));

        let undone = message(interpret("unmark 1", &mut list).unwrap());
        assert!(undone.contains("unmarked"));
        assert!(!list.tasks()[0].done);
    }

    #[test]
    fn mark_rejects_non_numeric_index() {
        let mut list = TaskList::new();
        list.add(Task::todo("demo"));

        let err = interpret("mark first", &mut list).unwrap_err();
        assert_eq!(err.code(), "invalid_argument");
    }

    #[test]
    fn mark_five_on_a_two_task_list_is_too_high() {
        let mut list = TaskList::new();
        list.add(Task::todo("a"));
        list.add(Task::todo("b"));

        let err = interpret("mark 5", &mut list).unwrap_err();
        assert_eq!(err.code(), "index_out_of_range");
        assert!(err.message().contains("that many"));
    }

    #[test]
    fn delete_returns_the_removed_task() {
        let mut list = TaskList::new();
        list.add(Task::todo("doomed"));

        let confirmation = message(interpret("delete 1", &mut list).unwrap());
        assert!(confirmation.contains("doomed"));
        assert!(list.is_empty());
    }

    #[test]
    fn deadline_with_before_and_after_filters_strictly() {
        let mut list = TaskList::new();
        message(interpret("deadline submit /by 2024-01-01 10:00", &mut list).unwrap());

        let before = lines(interpret("before 2024-06-01 00:00", &mut list).unwrap());
        assert_eq!(before.len(), 1);
        assert!(before[0].contains("submit"));

        let after = interpret("after 2024-06-01 00:00", &mut list).unwrap();
        assert!(matches!(after, Response::Message(_)));

        // Strict comparison: a task exactly at the bound matches neither.
        let at_bound = interpret("before 2024-01-01 10:00", &mut list).unwrap();
        assert!(matches!(at_bound, Response::Message(_)));
        let at_bound = interpret("after 2024-01-01 10:00", &mut list).unwrap();
        assert!(matches!(at_bound, Response::Message(_)));
    }

    #[test]
    fn deadline_without_by_keyword_is_missing_argument() {
        let mut list = TaskList::new();
        let err = interpret("deadline submit tomorrow", &mut list).unwrap_err();
        assert_eq!(err.code(), "missing_argument");
        assert!(err.message().contains("/by"));
    }

    #[test]
    fn deadline_with_empty_description_is_missing_argument() {
        let mut list = TaskList::new();
        let err = interpret("deadline /by 2024-01-01 10:00", &mut list).unwrap_err();
        assert_eq!(err.code(), "missing_argument");
    }

    #[test]
    fn deadline_with_bad_date_is_a_date_format_error() {
        let mut list = TaskList::new();
        let err = interpret("deadline submit /by tomorrow", &mut list).unwrap_err();
        assert_eq!(err.code(), "date_format");
    }

    #[test]
    fn event_with_end_before_start_is_a_range_error() {
        let mut list = TaskList::new();
        let err = interpret(
            "event trip /from 2024-03-10 09:00 /to 2024-03-05 09:00",
            &mut list,
        )
        .unwrap_err();
        assert_eq!(err.code(), "time_range");
        assert!(list.is_empty());
    }

    #[test]
    fn event_with_to_before_from_is_a_keyword_order_error() {
        let mut list = TaskList::new();
        let err = interpret(
            "event trip /to 2024-03-10 09:00 /from 2024-03-05 09:00",
            &mut list,
        )
        .unwrap_err();
        assert_eq!(err.code(), "keyword_order");
    }

    #[test]
    fn event_happy_path_appends_and_confirms() {
        let mut list = TaskList::new();
        let confirmation = message(
            interpret(
                "event trip /from 2024-03-05 09:00 /to 2024-03-10 09:00",
                &mut list,
            )
            .unwrap(),
        );

        assert!(confirmation.contains("trip"));
        assert_eq!(list.len(), 1);
        assert_eq!(list.tasks()[0].time(), Some(datetime!(2024-03-05 09:00)));
    }

    #[test]
    fn event_missing_pieces_report_missing_argument() {
        let mut list = TaskList::new();

        let err = interpret("event trip /from 2024-03-05 09:00", &mut list).unwrap_err();
        assert!(err.message().contains("/to"));

        let err = interpret("event trip /to 2024-03-10 09:00", &mut list).unwrap_err();
        assert!(err.message().contains("/from"));
    }

    #[test]
    fn sort_requires_a_non_empty_list() {
        let mut list = TaskList::new();
        let err = interpret("sort", &mut list).unwrap_err();
        assert_eq!(err.code(), "empty_list");
    }

    #[test]
    fn sort_lists_tasks_in_time_order() {
        let mut list = TaskList::new();
        list.add(Task::deadline("late", datetime!(2024-12-01 00:00)));
        list.add(Task::deadline("early", datetime!(2024-01-01 00:00)));

        let sorted = lines(interpret("sort", &mut list).unwrap());
        assert!(sorted[0].contains("early"));
        assert!(sorted[1].contains("late"));
    }

    #[test]
    fn filter_resolves_category_aliases() {
        let mut list = TaskList::new();
        list.add(Task::todo("plain"));
        list.add(Task::deadline("due", datetime!(2024-01-01 00:00)));

        let todos = lines(interpret("filter td", &mut list).unwrap());
        assert_eq!(todos.len(), 1);
        assert!(todos[0].contains("plain"));

        let deadlines = lines(interpret("filter DEADLINE", &mut list).unwrap());
        assert_eq!(deadlines.len(), 1);
        assert!(deadlines[0].contains("due"));
    }

    #[test]
    fn filter_not_done_alias_keeps_its_space() {
        let mut list = TaskList::new();
        list.add(Task::todo("open"));
        list.add(Task::todo("closed"));
        interpret("mark 2", &mut list).unwrap();

        let open = lines(interpret("filter not done", &mut list).unwrap());
        assert_eq!(open.len(), 1);
        assert!(open[0].contains("open"));

        let closed = lines(interpret("filter x", &mut list).unwrap());
        assert_eq!(closed.len(), 1);
        assert!(closed[0].contains("closed"));
    }

    #[test]
    fn filter_unknown_category_is_rejected() {
        let mut list = TaskList::new();
        list.add(Task::todo("x"));

        let err = interpret("filter chores", &mut list).unwrap_err();
        assert_eq!(err.code(), "unknown_category");
    }

    #[test]
    fn find_matches_case_insensitively() {
        let mut list = TaskList::new();
        list.add(Task::todo("Buy Milk"));
        list.add(Task::todo("walk dog"));

        let found = lines(interpret("find milk", &mut list).unwrap());
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("Buy Milk"));

        let none = interpret("find cheese", &mut list).unwrap();
        assert!(matches!(none, Response::Message(_)));
    }

    #[test]
    fn filters_on_empty_lists_fail_uniformly() {
        let mut list = TaskList::new();
        for line in ["before 2024-01-01 00:00", "after 2024-01-01 00:00", "filter todo", "find x"] {
            let err = interpret(line, &mut list).unwrap_err();
            assert_eq!(err.code(), "empty_list", "for {line}");
        }
    }

    #[test]
    fn bye_is_flagged_and_does_not_save() {
        let parser = Parser::parse("bye").unwrap();
        assert!(parser.is_bye());
        assert!(!parser.needs_save());

        let parser = Parser::parse("todo x").unwrap();
        assert!(!parser.is_bye());
        assert!(parser.needs_save());
    }

    #[test]
    fn read_only_commands_do_not_request_a_save() {
        for line in ["list", "find x", "filter todo", "before 2024-01-01 00:00"] {
            assert!(!Parser::parse(line).unwrap().needs_save(), "for {line}");
        }
        for line in ["mark 1", "delete 1", "todo x", "sort"] {
            assert!(Parser::parse(line).unwrap().needs_save(), "for {line}");
        }
    }
}
