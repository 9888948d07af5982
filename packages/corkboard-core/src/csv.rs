/// CSV codec for bulk task import/export.
///
/// Wire format:
///   id,title,description,dueDate,column
///   1,Buy milk,,2026-03-01T09:00:00Z,backlog
///
/// Free-text fields may contain commas, double quotes, and newlines; such
/// fields are emitted quoted, with embedded quotes doubled. The decoder is a
/// single-pass scanner with an inside-quotes flag, so `decode(encode(tasks))`
/// recovers every field byte-for-byte. The `id` column exists only for human
/// reference: import discards it and the store assigns fresh ids.

use crate::types::{Column, Task, TaskDraft};

/// Fixed header line. The first line of imported text is always skipped,
/// whatever it contains.
pub const CSV_HEADER: &str = "id,title,description,dueDate,column";

/// Encode tasks in input order. Output has no trailing newline; an empty
/// list encodes to just the header line.
pub fn encode(tasks: &[Task]) -> String {
    let mut out = String::from(CSV_HEADER);
    for task in tasks {
        out.push('\n');
        out.push_str(&escape_field(&task.id.to_string()));
        out.push(',');
        out.push_str(&escape_field(&task.title));
        out.push(',');
        out.push_str(&escape_field(&task.description));
        out.push(',');
        out.push_str(&escape_field(task.due_date.as_deref().unwrap_or("")));
        out.push(',');
        out.push_str(&escape_field(task.column.as_str()));
    }
    out
}

/// Double embedded quotes, then quote the whole field iff it contains a
/// comma, a quote, or a line break. Clean fields pass through untouched.
fn escape_field(value: &str) -> String {
    let escaped = value.replace('"', "\"\"");
    if escaped.contains(',') || escaped.contains('"') || escaped.contains('\n') || escaped.contains('\r') {
        format!("\"{}\"", escaped)
    } else {
        escaped
    }
}

/// Decode CSV text into task drafts, ready for insertion as new tasks.
///
/// Lenient by contract: short records fill missing fields with defaults
/// (absent due date, backlog column), unbalanced quotes run permissively to
/// end of input, and records with a blank title are dropped with a warning
/// rather than failing the whole import. Blank lines are ignored.
pub fn decode(text: &str) -> Vec<TaskDraft> {
    // Header occupies everything up to the first newline; never parsed.
    let body = match text.split_once('\n') {
        Some((_, rest)) => rest,
        None => "",
    };

    let mut drafts = Vec::new();
    for (index, record) in split_records(body).into_iter().enumerate() {
        match record_to_draft(&record) {
            Some(draft) => drafts.push(draft),
            None => log::warn!(
                "[corkboard.csv.import] Skipping record {}: blank title",
                index + 1
            ),
        }
    }
    drafts
}

/// Split record text into fields, honoring quoting.
///
/// A quote toggles the inside-quotes flag, except that `""` while inside
/// quotes emits one literal quote. A comma splits fields only outside
/// quotes; a newline ends the record only outside quotes. A record with no
/// content at all (blank line) is dropped.
fn split_records(body: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {
                chars.next();
                flush_record(&mut records, &mut fields, &mut field);
            }
            '\n' if !in_quotes => {
                flush_record(&mut records, &mut fields, &mut field);
            }
            _ => field.push(c),
        }
    }
    flush_record(&mut records, &mut fields, &mut field);

    records
}

fn flush_record(records: &mut Vec<Vec<String>>, fields: &mut Vec<String>, field: &mut String) {
    if fields.is_empty() && field.is_empty() {
        return;
    }
    fields.push(std::mem::take(field));
    records.push(std::mem::take(fields));
}

/// Positional mapping: [0]=id (ignored), [1]=title, [2]=description,
/// [3]=dueDate, [4]=column. Returns None when the title is blank.
fn record_to_draft(fields: &[String]) -> Option<TaskDraft> {
    let title = fields.get(1).cloned().unwrap_or_default();
    if title.trim().is_empty() {
        return None;
    }

    let description = fields.get(2).cloned().unwrap_or_default();
    let due_date = fields.get(3).filter(|s| !s.is_empty()).cloned();
    let column = Column::decode(fields.get(4).map(String::as_str).unwrap_or(""));

    Some(TaskDraft {
        title,
        description,
        due_date,
        column,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: u64, title: &str, description: &str, due: Option<&str>, column: Column) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: description.to_string(),
            due_date: due.map(str::to_string),
            column,
            created_at: "2026-08-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_empty_list_encodes_to_header_only() {
        assert_eq!(encode(&[]), CSV_HEADER);
    }

    #[test]
    fn test_header_only_decodes_to_nothing() {
        assert!(decode(CSV_HEADER).is_empty());
        assert!(decode("id,title,description,dueDate,column\n").is_empty());
        assert!(decode("").is_empty());
    }

    #[test]
    fn test_plain_task_encoding() {
        let tasks = [task(1, "A", "", None, Column::Backlog)];
        assert_eq!(
            encode(&tasks),
            "id,title,description,dueDate,column\n1,A,,,backlog"
        );
    }

    #[test]
    fn test_quote_escaping() {
        let tasks = [task(7, "He said \"hi\", ok", "", None, Column::Done)];
        let csv = encode(&tasks);
        assert!(csv.ends_with("7,\"He said \"\"hi\"\", ok\",,,done"));
    }

    #[test]
    fn test_encode_is_deterministic() {
        let tasks = [
            task(1, "A", "x,y", None, Column::Backlog),
            task(2, "B", "", Some("2026-01-01T00:00:00Z"), Column::Done),
        ];
        assert_eq!(encode(&tasks), encode(&tasks));
    }

    #[test]
    fn test_roundtrip_with_special_characters() {
        let tasks = [
            task(1, "He said \"hi\", ok", "line one\nline two", None, Column::Backlog),
            task(2, "comma, title", "quote \" inside", Some("2026-05-01T12:00:00Z"), Column::InProgress),
            task(3, "plain", "", None, Column::Done),
        ];

        let drafts = decode(&encode(&tasks));
        assert_eq!(drafts.len(), tasks.len());
        for (draft, original) in drafts.iter().zip(tasks.iter()) {
            assert_eq!(draft.title, original.title);
            assert_eq!(draft.description, original.description);
            assert_eq!(draft.due_date, original.due_date);
            assert_eq!(draft.column, original.column);
        }
    }

    #[test]
    fn test_scenario_reimport() {
        let csv = "id,title,description,dueDate,column\n1,A,,,backlog";
        let drafts = decode(csv);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].title, "A");
        assert_eq!(drafts[0].description, "");
        assert_eq!(drafts[0].due_date, None);
        assert_eq!(drafts[0].column, Column::Backlog);
    }

    #[test]
    fn test_blank_column_defaults_to_backlog() {
        let drafts = decode("id,title,description,dueDate,column\n9,Task,,,");
        assert_eq!(drafts[0].column, Column::Backlog);
    }

    #[test]
    fn test_unknown_column_defaults_to_backlog() {
        let drafts = decode("id,title,description,dueDate,column\n9,Task,,,shipped");
        assert_eq!(drafts[0].column, Column::Backlog);
    }

    #[test]
    fn test_short_record_fills_defaults() {
        let drafts = decode("id,title,description,dueDate,column\n4,Just a title");
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].title, "Just a title");
        assert_eq!(drafts[0].description, "");
        assert_eq!(drafts[0].due_date, None);
        assert_eq!(drafts[0].column, Column::Backlog);
    }

    #[test]
    fn test_blank_title_record_is_skipped() {
        let csv = "id,title,description,dueDate,column\n1,,oops,,\n2,Kept,,,done";
        let drafts = decode(csv);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].title, "Kept");
        assert_eq!(drafts[0].column, Column::Done);
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let csv = "id,title,description,dueDate,column\n\n1,A,,,backlog\n\n";
        let drafts = decode(csv);
        assert_eq!(drafts.len(), 1);
    }

    #[test]
    fn test_crlf_line_endings() {
        let csv = "id,title,description,dueDate,column\r\n1,A,,,backlog\r\n2,B,,,done";
        let drafts = decode(csv);
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[1].title, "B");
    }

    #[test]
    fn test_quoted_newline_spans_lines() {
        let csv = "id,title,description,dueDate,column\n1,\"two\nline title\",,,backlog";
        let drafts = decode(csv);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].title, "two\nline title");
    }

    #[test]
    fn test_unbalanced_quote_runs_to_end_of_input() {
        // One dangling quote swallows the rest of the text as a single field.
        let csv = "id,title,description,dueDate,column\n1,\"dangling,,,backlog";
        let drafts = decode(csv);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].title, "dangling,,,backlog");
        assert_eq!(drafts[0].column, Column::Backlog);
    }

    #[test]
    fn test_header_skipped_even_when_malformed() {
        let csv = "this is not a header at all\n1,Real task,,,inprogress";
        let drafts = decode(csv);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].title, "Real task");
        assert_eq!(drafts[0].column, Column::InProgress);
    }
}
