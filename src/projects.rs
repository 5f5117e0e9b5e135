// Project listing and its tabular rendering.

use anyhow::Result;
use serde_json::Value;

use crate::api::{ApiClient, ApiError};

const PROJECTS: &str = "projects/";

const NAME_LABEL: &str = "Name";
const ID_LABEL: &str = "ID";

/// Gap between the end of the longest name and the column separator.
const SPACING: usize = 5;

/// Fetch all projects visible to the token and print them as a table.
pub fn print_projects(api: &ApiClient) -> Result<()> {
    let projects = fetch_projects(api)?;
    println!("Project list for CGC Seven Bridges:\n");
    print!("{}", render_project_table(&projects));
    Ok(())
}

/// GET `projects/` and return the `items` array.
pub fn fetch_projects(api: &ApiClient) -> Result<Vec<Value>, ApiError> {
    let body = api.get(PROJECTS, &[])?;
    match body.get("items") {
        Some(Value::Array(items)) => Ok(items.clone()),
        _ => Err(ApiError::MissingField("items")),
    }
}

/// Render a two-column `Name | ID` table. Column widths are computed
/// from the longest value in each column for this invocation, so the
/// `|` separator lands at the same offset on every row.
pub fn render_project_table(projects: &[Value]) -> String {
    let max_name = longest_value_len(projects, "name");
    let max_id = longest_value_len(projects, "id");
    let name_width = max_name + SPACING;

    let mut out = String::new();
    out.push_str(&format!(
        "{NAME_LABEL:<name_width$}| {ID_LABEL:<max_id$}\n"
    ));
    out.push_str(&format!("{}\n", "-".repeat(max_name + max_id + SPACING)));
    for project in projects {
        let name = field_str(project, "name");
        let id = field_str(project, "id");
        out.push_str(&format!("{name:<name_width$}| {id:<max_id$}\n"));
    }
    out
}

fn field_str<'a>(project: &'a Value, key: &str) -> &'a str {
    project.get(key).and_then(Value::as_str).unwrap_or("")
}

fn longest_value_len(projects: &[Value], key: &str) -> usize {
    projects
        .iter()
        .map(|p| field_str(p, key).len())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Vec<Value> {
        vec![
            json!({"name": "abc", "id": "x"}),
            json!({"name": "abcdefg", "id": "xy"}),
        ]
    }

    #[test]
    fn widths_come_from_longest_values() {
        let table = render_project_table(&sample());
        // Longest name is 7 chars, so every `|` sits at offset 7 + 5.
        for line in table.lines().filter(|l| l.contains('|')) {
            assert_eq!(line.find('|'), Some(7 + SPACING));
        }
    }

    #[test]
    fn rows_follow_response_order() {
        let table = render_project_table(&sample());
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("Name"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].starts_with("abc "));
        assert!(lines[3].starts_with("abcdefg"));
    }

    #[test]
    fn id_column_pads_to_longest_id() {
        let table = render_project_table(&sample());
        let lines: Vec<&str> = table.lines().collect();
        // "x" is padded to the width of "xy".
        assert!(lines[2].ends_with("| x "));
        assert!(lines[3].ends_with("| xy"));
    }

    #[test]
    fn empty_list_still_renders_a_header() {
        let table = render_project_table(&[]);
        assert!(table.starts_with("Name"));
        assert_eq!(table.lines().count(), 2);
    }
}
