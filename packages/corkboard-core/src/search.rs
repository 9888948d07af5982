use chrono::{DateTime, Local, NaiveDate};

use crate::types::{Column, Task};

/// Case-insensitive substring filter over title and description.
/// No ranking, no tokenization. A blank term matches everything — an empty
/// filter box shows the whole board.
pub fn filter_tasks<'a>(tasks: &'a [Task], term: &str) -> Vec<&'a Task> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return tasks.iter().collect();
    }

    tasks
        .iter()
        .filter(|t| {
            t.title.to_lowercase().contains(&needle)
                || t.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Interpret a stored due-date string as a calendar date.
/// Accepts a full RFC 3339 timestamp or a bare `YYYY-MM-DD` date; anything
/// else is treated as no due date.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// A task is overdue when its due date is strictly before `today` and it has
/// not reached the done column.
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    if task.column == Column::Done {
        return false;
    }
    task.due_date
        .as_deref()
        .and_then(parse_due_date)
        .map(|due| due < today)
        .unwrap_or(false)
}

/// Convenience wrapper using the local calendar day.
pub fn is_overdue_now(task: &Task) -> bool {
    is_overdue(task, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, description: &str) -> Task {
        Task {
            id: 0,
            title: title.to_string(),
            description: description.to_string(),
            due_date: None,
            column: Column::Backlog,
            created_at: String::new(),
        }
    }

    #[test]
    fn test_filter_matches_title_and_description() {
        let tasks = [
            task("Buy groceries", ""),
            task("Laundry", "wash the GROCERY bags"),
            task("Unrelated", "nothing here"),
        ];

        let hits = filter_tasks(&tasks, "grocer");
        assert_eq!(hits.len(), 2);

        let hits = filter_tasks(&tasks, "GROCERIES");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Buy groceries");
    }

    #[test]
    fn test_blank_term_matches_all() {
        let tasks = [task("A", ""), task("B", "")];
        assert_eq!(filter_tasks(&tasks, "").len(), 2);
        assert_eq!(filter_tasks(&tasks, "   ").len(), 2);
    }

    #[test]
    fn test_no_match() {
        let tasks = [task("A", "")];
        assert!(filter_tasks(&tasks, "zzz").is_empty());
    }

    #[test]
    fn test_parse_due_date_formats() {
        assert_eq!(
            parse_due_date("2026-03-01T09:30:00Z"),
            NaiveDate::from_ymd_opt(2026, 3, 1)
        );
        assert_eq!(
            parse_due_date("2026-03-01"),
            NaiveDate::from_ymd_opt(2026, 3, 1)
        );
        assert_eq!(parse_due_date("next tuesday"), None);
        assert_eq!(parse_due_date(""), None);
    }

    #[test]
    fn test_overdue() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();

        let mut t = task("Late", "");
        t.due_date = Some("2026-08-01T00:00:00Z".to_string());
        assert!(is_overdue(&t, today));

        t.column = Column::Done;
        assert!(!is_overdue(&t, today));

        t.column = Column::Backlog;
        t.due_date = Some("2026-08-23".to_string());
        assert!(!is_overdue(&t, today));

        t.due_date = None;
        assert!(!is_overdue(&t, today));
    }
}
