//! HTML rendering for the task list page
use crate::core::shared::utils::escape_html;
use crate::tasks::types::Task;
use crate::web::render_page;

fn build_task_row(task: &Task) -> String {
    let description = task
        .description
        .as_deref()
        .map(escape_html)
        .unwrap_or_default();
    let (row_class, status, action) = if task.completed {
        ("completed", "Completed", String::new())
    } else {
        (
            "pending",
            "Not Completed",
            format!(r#"<a href="/complete/{}">Complete</a> "#, task.id),
        )
    };

    format!(
        r#"<tr class="{row_class}" data-task-id="{id}">
  <td class="title">{title}</td>
  <td>{description}</td>
  <td>{status}</td>
  <td>{action}<a href="/delete/{id}">Delete</a></td>
</tr>"#,
        id = task.id,
        title = escape_html(&task.title),
    )
}

pub fn build_task_list_page(username: &str, tasks: &[Task]) -> String {
    let rows = if tasks.is_empty() {
        r#"<tr><td colspan="4">No tasks yet.</td></tr>"#.to_string()
    } else {
        tasks.iter().map(build_task_row).collect::<Vec<_>>().join("\n")
    };

    let body = format!(
        r#"<nav>
  <span>Signed in as <strong>{username}</strong></span>
  <a href="/download_excel">Download Excel</a>
  <a href="/logout">Log out</a>
</nav>
<h1>Tasks</h1>
<form method="post" action="/index">
  <label>Title <input type="text" name="title" maxlength="100" required></label>
  <label>Description <input type="text" name="description" maxlength="200"></label>
  <button type="submit">Add task</button>
</form>
<p>
  Sort:
  <a href="/sort_tasks/alphabetical">Alphabetical</a>
  <a href="/sort_tasks/completed">Completed</a>
  <a href="/sort_tasks/not_completed">Not completed</a>
  <a href="/sort_tasks/all">All</a>
</p>
<table>
<thead><tr><th>Title</th><th>Description</th><th>Status</th><th></th></tr></thead>
<tbody>
{rows}
</tbody>
</table>"#,
        username = escape_html(username),
    );

    render_page("Tasks", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i32, title: &str, description: Option<&str>, completed: bool) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: description.map(str::to_string),
            completed,
        }
    }

    #[test]
    fn test_empty_list_placeholder() {
        let html = build_task_list_page("alice", &[]);
        assert!(html.contains("No tasks yet."));
        assert!(html.contains("<strong>alice</strong>"));
    }

    #[test]
    fn test_rows_escape_user_content() {
        let html = build_task_list_page(
            "<b>",
            &[task(1, "<script>x</script>", Some("a & b"), false)],
        );
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(html.contains("a &amp; b"));
        assert!(!html.contains("<script>x"));
        assert!(html.contains("<strong>&lt;b&gt;</strong>"));
    }

    #[test]
    fn test_completed_rows_have_no_complete_link() {
        let html = build_task_list_page(
            "alice",
            &[task(1, "Open", None, false), task(2, "Done", None, true)],
        );
        assert!(html.contains(r#"href="/complete/1""#));
        assert!(!html.contains(r#"href="/complete/2""#));
        assert!(html.contains(r#"href="/delete/2""#));
    }
}
