//! Terminal tables for boards, projects and comments.

use super::board::Board;
use super::project::Project;
use super::task::{Comment, Member, Task};
use prettytable::{format, row, Cell, Row, Table};

pub const EMPTY_COLUMN: &str = "No tasks in this column";
pub const UNASSIGNED: &str = "Unassigned";

pub struct View {}

impl View {
    pub fn board(board: &Board<'_>) {
        Self::board_table(board).printstd();
    }

    /// Three columns side by side, one card per cell, headed by the column
    /// title and its task count.
    pub fn board_table(board: &Board<'_>) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        let columns: Vec<_> = board.columns().collect();
        table.set_titles(Row::new(
            columns
                .iter()
                .map(|(status, tasks)| Cell::new(&format!("{} ({})", status.title(), tasks.len())).style_spec("bc"))
                .collect(),
        ));

        let depth = columns.iter().map(|(_, tasks)| tasks.len()).max().unwrap_or(0).max(1);
        for index in 0..depth {
            table.add_row(Row::new(
                columns
                    .iter()
                    .map(|(_, tasks)| match tasks.get(index) {
                        Some(task) => Cell::new(&Self::card(task)),
                        None if index == 0 => Cell::new(EMPTY_COLUMN).style_spec("i"),
                        None => Cell::new(""),
                    })
                    .collect(),
            ));
        }
        table
    }

    /// Card text: id and title, then priority, due date and assignee.
    pub fn card(task: &Task) -> String {
        let mut lines = vec![format!("#{} {}", task.id, task.title)];

        let mut details = Vec::new();
        if let Some(priority) = task.priority {
            details.push(format!("priority: {}", priority));
        }
        if let Some(due_date) = task.due_date {
            details.push(format!("due: {}", due_date.format("%Y-%m-%d")));
        }
        if !details.is_empty() {
            lines.push(details.join(", "));
        }

        lines.push(format!("@ {}", assignee_name(task.assignee.as_ref())));
        if !task.tags.is_empty() {
            lines.push(task.tags.iter().map(|tag| format!("[{}]", tag)).collect::<Vec<_>>().join(" "));
        }
        lines.join("\n")
    }

    pub fn projects(projects: &[Project]) {
        Self::projects_table(projects).printstd();
    }

    pub fn projects_table(projects: &[Project]) -> Table {
        let mut table = Table::new();
        table.set_titles(row!["ID", "NAME", "DESCRIPTION", "MEMBERS"]);
        for project in projects {
            table.add_row(row![
                project.id,
                project.name,
                project.description.as_deref().unwrap_or(""),
                project.members.len()
            ]);
        }
        table
    }

    pub fn members(members: &[Member]) {
        let mut table = Table::new();
        table.set_titles(row!["NAME", "EMAIL", "ROLE"]);
        for member in members {
            table.add_row(row![
                member.display_name().unwrap_or("Unknown"),
                member.email.as_deref().unwrap_or(""),
                member.role.as_deref().unwrap_or("")
            ]);
        }
        table.printstd();
    }

    pub fn comments(comments: &[Comment]) {
        Self::comments_table(comments).printstd();
    }

    pub fn comments_table(comments: &[Comment]) -> Table {
        let mut table = Table::new();
        table.set_titles(row!["ID", "AUTHOR", "DATE", "TEXT"]);
        for comment in comments {
            table.add_row(row![
                comment.id,
                comment.author_name(),
                comment.created_at.as_deref().unwrap_or(""),
                comment.text
            ]);
        }
        table
    }
}

fn assignee_name(assignee: Option<&Member>) -> &str {
    assignee.and_then(Member::display_name).unwrap_or(UNASSIGNED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::board::project;
    use crate::libs::task::{Priority, TaskStatus};
    use chrono::NaiveDate;

    #[test]
    fn board_headers_carry_counts_and_empty_columns_say_so() {
        let tasks = vec![
            Task::new("1", "Write docs"),
            Task::new("2", "Fix login").with_status(TaskStatus::InProgress),
            Task::new("3", "Plan sprint"),
        ];
        let rendered = View::board_table(&project(Some(tasks.as_slice()))).to_string();

        assert!(rendered.contains("To Do (2)"));
        assert!(rendered.contains("In Progress (1)"));
        assert!(rendered.contains("Done (0)"));
        assert_eq!(rendered.matches(EMPTY_COLUMN).count(), 1);
    }

    #[test]
    fn empty_board_renders_one_placeholder_per_column() {
        let rendered = View::board_table(&project(None)).to_string();
        assert_eq!(rendered.matches(EMPTY_COLUMN).count(), 3);
    }

    #[test]
    fn card_shows_priority_due_date_and_assignee() {
        let mut task = Task::new("9", "Ship release")
            .with_priority(Priority::High)
            .with_assignee(Member::named("Ada"));
        task.due_date = NaiveDate::from_ymd_opt(2024, 5, 1);

        let card = View::card(&task);
        assert!(card.starts_with("#9 Ship release"));
        assert!(card.contains("priority: high, due: 2024-05-01"));
        assert!(card.contains("@ Ada"));
    }

    #[test]
    fn card_without_assignee_is_marked_unassigned() {
        assert!(View::card(&Task::new("1", "Triage")).contains(UNASSIGNED));
    }

    #[test]
    fn comment_without_author_shows_unknown() {
        let comment = Comment {
            id: "c-1".into(),
            text: "Looks good".into(),
            author: None,
            created_at: None,
        };
        assert!(View::comments_table(&[comment]).to_string().contains("Unknown"));
    }
}
