use crate::error::AppError;
use crate::model::task::Task;

/// An ordered, exclusively-owned collection of tasks. User-facing
/// indices are 1-based; anything outside `1..=len` is rejected with a
/// direction-specific error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Marks task `num` done. Returns the updated task and whether the
    /// flag actually changed, so callers can phrase the confirmation.
    pub fn mark(&mut self, num: i64) -> Result<(bool, Task), AppError> {
        let index = self.position(num)?;
        let changed = self.tasks[index].set_done();
        Ok((changed, self.tasks[index].clone()))
    }

    /// Mirror of [`mark`](Self::mark).
    pub fn unmark(&mut self, num: i64) -> Result<(bool, Task), AppError> {
        let index = self.position(num)?;
        let changed = self.tasks[index].set_undone();
        Ok((changed, self.tasks[index].clone()))
    }

    /// Removes task `num`, shifting everything after it down by one.
    pub fn remove(&mut self, num: i64) -> Result<Task, AppError> {
        let index = self.position(num)?;
        Ok(self.tasks.remove(index))
    }

    /// Stable sort by primary timestamp. Untimed tasks compare equal to
    /// everything, so only the timed slots are reordered; every untimed
    /// task stays exactly where it was.
    pub fn sort_by_time(&mut self) {
        let slots: Vec<usize> = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.has_time())
            .map(|(index, _)| index)
            .collect();

        let mut timed: Vec<Task> = slots.iter().map(|&i| self.tasks[i].clone()).collect();
        timed.sort_by(|a, b| a.cmp_by_time(b));

        for (&slot, task) in slots.iter().zip(timed) {
            self.tasks[slot] = task;
        }
    }

    /// All tasks as `"<1-based index>. <display>"` lines.
    pub fn display_all(&self) -> Vec<String> {
        self.display_filter(|_| true)
    }

    /// Matching tasks as numbered lines. Numbering follows the task's
    /// position in the full list, not its position among the matches.
    pub fn display_filter<P: Fn(&Task) -> bool>(&self, pred: P) -> Vec<String> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| pred(task))
            .map(|(index, task)| format!("{}. {}", index + 1, task))
            .collect()
    }

    fn position(&self, num: i64) -> Result<usize, AppError> {
        if num < 1 {
            return Err(AppError::index_too_low("that index is too small"));
        }
        if num as usize > self.tasks.len() {
            return Err(AppError::index_too_high("you don't have that many tasks"));
        }
        Ok(num as usize - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::TaskList;
    use crate::model::task::Task;
    use time::macros::datetime;

    fn sample_list() -> TaskList {
        let mut list = TaskList::new();
        list.add(Task::todo("alpha"));
        list.add(Task::deadline("beta", datetime!(2024-06-01 10:00)));
        list.add(Task::todo("gamma"));
        list
    }

    #[test]
    fn mark_then_unmark_restores_not_done() {
        let mut list = sample_list();

        let (changed, task) = list.mark(2).unwrap();
        assert!(changed);
        assert!(task.done);

        let (changed, task) = list.unmark(2).unwrap();
        assert!(changed);
        assert!(!task.done);
    }

    #[test]
    fn mark_is_idempotent_but_reports_no_change() {
        let mut list = sample_list();

        list.mark(1).unwrap();
        let (changed, task) = list.mark(1).unwrap();

        assert!(!changed);
        assert!(task.done);
    }

    #[test]
    fn zero_and_negative_indices_are_too_low() {
        let mut list = sample_list();
        assert_eq!(list.mark(0).unwrap_err().code(), "index_out_of_range");
        assert!(list.mark(-3).unwrap_err().message().contains("too small"));
    }

    #[test]
    fn index_past_the_end_is_too_high() {
        let mut list = sample_list();
        let err = list.mark(4).unwrap_err();
        assert_eq!(err.code(), "index_out_of_range");
        assert!(err.message().contains("that many"));
    }

    #[test]
    fn remove_shifts_later_tasks_down() {
        let mut list = sample_list();

        let removed = list.remove(2).unwrap();

        assert_eq!(removed.description, "beta");
        assert_eq!(list.len(), 2);
        assert_eq!(list.tasks()[0].description, "alpha");
        assert_eq!(list.tasks()[1].description, "gamma");
    }

    #[test]
    fn sort_orders_timed_tasks_and_leaves_untimed_in_place() {
        let mut list = TaskList::new();
        list.add(Task::todo("first untimed"));
        list.add(Task::deadline("late", datetime!(2024-12-01 00:00)));
        list.add(Task::todo("second untimed"));
        list.add(Task::deadline("early", datetime!(2024-01-01 00:00)));

        list.sort_by_time();

        let names: Vec<&str> = list
            .tasks()
            .iter()
            .map(|t| t.description.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["first untimed", "early", "second untimed", "late"]
        );
    }

    #[test]
    fn sort_is_idempotent() {
        let mut once = sample_list();
        once.add(Task::deadline("zeta", datetime!(2023-01-01 00:00)));
        let mut twice = once.clone();

        once.sort_by_time();
        twice.sort_by_time();
        twice.sort_by_time();

        assert_eq!(once, twice);
    }

    #[test]
    fn display_lines_are_one_based() {
        let list = sample_list();
        let lines = list.display_all();

        assert_eq!(lines[0], "1. [T][ ] alpha");
        assert_eq!(lines[2], "3. [T][ ] gamma");
    }

    #[test]
    fn filtered_display_keeps_original_numbering() {
        let list = sample_list();
        let lines = list.display_filter(|task| task.has_time());

        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("2. "));
    }
}
