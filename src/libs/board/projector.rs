//! Board projection: partitions a flat task list into status columns.

use crate::libs::task::{Task, TaskStatus};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Three-column view of a task list.
///
/// Columns borrow the tasks of the list they were projected from, so a
/// board is as cheap to rebuild as it is to read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board<'a> {
    todo: Vec<&'a Task>,
    in_progress: Vec<&'a Task>,
    done: Vec<&'a Task>,
    unmapped: usize,
}

/// Projects `tasks` onto the board columns.
///
/// `None` is treated as an empty list. Each task lands in the column of its
/// status, in input order. Tasks whose status is not one of the three
/// columns appear in no column; they are only counted in [`Board::unmapped`].
pub fn project(tasks: Option<&[Task]>) -> Board<'_> {
    let mut board = Board::default();

    for task in tasks.unwrap_or_default() {
        match &task.status {
            TaskStatus::Todo => board.todo.push(task),
            TaskStatus::InProgress => board.in_progress.push(task),
            TaskStatus::Done => board.done.push(task),
            TaskStatus::Unknown(status) => {
                tracing::debug!(task_id = %task.id, status = %status, "task with unknown status left off the board");
                board.unmapped += 1;
            }
        }
    }

    board
}

impl<'a> Board<'a> {
    pub fn todo(&self) -> &[&'a Task] {
        &self.todo
    }

    pub fn in_progress(&self) -> &[&'a Task] {
        &self.in_progress
    }

    pub fn done(&self) -> &[&'a Task] {
        &self.done
    }

    /// Column for `status`; an unknown status has no column and yields an empty slice.
    pub fn column(&self, status: &TaskStatus) -> &[&'a Task] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
            TaskStatus::Unknown(_) => &[],
        }
    }

    /// Columns in board order: `todo`, `in-progress`, `done`.
    pub fn columns(&self) -> impl Iterator<Item = (TaskStatus, &[&'a Task])> + '_ {
        TaskStatus::COLUMNS.into_iter().map(move |status| {
            let column = self.column(&status);
            (status, column)
        })
    }

    /// Number of tasks placed in a column.
    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of input tasks dropped because of an unrecognized status.
    pub fn unmapped(&self) -> usize {
        self.unmapped
    }
}

/// Serializes as `{"todo": [...], "in-progress": [...], "done": [...]}`.
impl Serialize for Board<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(TaskStatus::COLUMNS.len()))?;
        for (status, column) in self.columns() {
            map.serialize_entry(status.as_str(), column)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, status: TaskStatus) -> Task {
        Task::new(id, &format!("task {}", id)).with_status(status)
    }

    fn ids(column: &[&Task]) -> Vec<String> {
        column.iter().map(|task| task.id.clone()).collect()
    }

    #[test]
    fn scenario_todo_and_done() {
        let tasks = vec![task("1", TaskStatus::Todo), task("2", TaskStatus::Done)];

        let board = project(Some(&tasks));

        assert_eq!(ids(board.todo()), vec!["1"]);
        assert!(board.in_progress().is_empty());
        assert_eq!(ids(board.done()), vec!["2"]);
    }

    #[test]
    fn empty_and_missing_input_give_three_empty_columns() {
        let empty: Vec<Task> = Vec::new();

        for board in [project(Some(&empty)), project(None)] {
            assert_eq!(board.columns().count(), 3);
            assert!(board.columns().all(|(_, column)| column.is_empty()));
            assert_eq!(
                serde_json::to_value(&board).unwrap(),
                serde_json::json!({ "todo": [], "in-progress": [], "done": [] })
            );
        }
    }

    #[test]
    fn columns_keep_input_order_and_drop_unknown_statuses() {
        let tasks = vec![
            task("a", TaskStatus::Done),
            task("b", TaskStatus::Todo),
            task("c", TaskStatus::Unknown("blocked".into())),
            task("d", TaskStatus::InProgress),
            task("e", TaskStatus::Todo),
            task("f", TaskStatus::Done),
        ];

        let board = project(Some(&tasks));

        assert_eq!(ids(board.todo()), vec!["b", "e"]);
        assert_eq!(ids(board.in_progress()), vec!["d"]);
        assert_eq!(ids(board.done()), vec!["a", "f"]);
        assert_eq!(board.len(), 5);
        assert_eq!(board.unmapped(), 1);
    }

    #[test]
    fn concatenated_columns_are_the_known_tasks_each_once() {
        let tasks = vec![
            task("1", TaskStatus::Todo),
            task("2", TaskStatus::InProgress),
            task("3", TaskStatus::Unknown("".into())),
            task("4", TaskStatus::Todo),
        ];

        let board = project(Some(&tasks));
        let concatenated: Vec<String> = board.columns().flat_map(|(_, column)| ids(column)).collect();

        assert_eq!(concatenated, vec!["1", "4", "2"]);
    }

    #[test]
    fn projection_is_idempotent_and_borrows_the_input() {
        let tasks = vec![task("1", TaskStatus::InProgress), task("2", TaskStatus::Todo)];

        let first = project(Some(&tasks));
        let second = project(Some(&tasks));

        assert_eq!(first, second);
        assert!(std::ptr::eq(first.in_progress()[0], &tasks[0]));
        assert!(std::ptr::eq(second.todo()[0], &tasks[1]));
    }

    #[test]
    fn column_lookup_for_unknown_status_is_empty() {
        let tasks = vec![task("1", TaskStatus::Unknown("archived".into()))];
        let board = project(Some(&tasks));

        assert!(board.column(&TaskStatus::Unknown("archived".into())).is_empty());
        assert!(board.is_empty());
    }
}
