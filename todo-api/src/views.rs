/// Server-rendered HTML pages
///
/// Pages are small enough to build with `format!`. Every user-supplied
/// string goes through [`escape`] before it reaches the markup.

use axum::response::Html;
use todo_shared::models::{task::Task, user::User};

/// Escapes text for use in HTML content and double-quoted attributes
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n<h1>{title}</h1>\n{body}\n</body>\n\
         </html>\n",
        title = escape(title),
        body = body,
    ))
}

/// Landing page
pub fn welcome_page() -> Html<String> {
    layout(
        "Todo",
        "<p>Keep track of what needs doing.</p>\n\
         <p><a href=\"/register\">Register</a> or <a href=\"/login\">log in</a>.</p>",
    )
}

/// Registration form
pub fn register_page() -> Html<String> {
    layout(
        "Register",
        "<form method=\"post\" action=\"/register\">\n\
         <label>Username <input name=\"username\" required></label>\n\
         <label>Email <input name=\"email\" type=\"email\" required></label>\n\
         <label>Password <input name=\"password\" type=\"password\" required></label>\n\
         <button type=\"submit\">Register</button>\n\
         </form>\n\
         <p>Already registered? <a href=\"/login\">Log in</a>.</p>",
    )
}

/// Login form
pub fn login_page() -> Html<String> {
    layout(
        "Log in",
        "<form method=\"post\" action=\"/login\">\n\
         <label>Username <input name=\"username\" required></label>\n\
         <label>Password <input name=\"password\" type=\"password\" required></label>\n\
         <button type=\"submit\">Log in</button>\n\
         </form>\n\
         <p>No account? <a href=\"/register\">Register</a>.</p>",
    )
}

fn task_item(task: &Task) -> String {
    let (state, action) = if task.is_active {
        ("active", "Done")
    } else {
        ("done", "Reopen")
    };

    format!(
        "<li class=\"task {state}\" data-task-id=\"{id}\" data-active=\"{active}\">\
         <span class=\"name\">{name}</span> \
         <form method=\"post\" action=\"/toggle_task/{id}\"><button type=\"submit\">{action}</button></form>\
         </li>",
        state = state,
        id = task.id,
        active = task.is_active,
        name = escape(&task.name),
        action = action,
    )
}

/// Task list for `user`, in the order given
pub fn todo_page(user: &User, tasks: &[Task]) -> Html<String> {
    let list = if tasks.is_empty() {
        "<p class=\"empty\">Nothing to do yet.</p>".to_string()
    } else {
        let items: Vec<String> = tasks.iter().map(task_item).collect();
        format!("<ul class=\"tasks\">\n{}\n</ul>", items.join("\n"))
    };

    let body = format!(
        "<p>Signed in as <strong>{username}</strong>.</p>\n\
         <form method=\"post\" action=\"/add_task\">\n\
         <input name=\"task_name\" placeholder=\"New task\" required>\n\
         <button type=\"submit\">Add</button>\n\
         </form>\n\
         {list}\n\
         <form method=\"post\" action=\"/logout\"><button type=\"submit\">Log out</button></form>",
        username = escape(&user.username),
        list = list,
    );

    layout("Tasks", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user() -> User {
        User {
            id: 1,
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "hash".to_string(),
            created_at: Utc::now(),
        }
    }

    fn task(id: i64, name: &str, is_active: bool) -> Task {
        Task {
            id,
            name: name.to_string(),
            is_active,
            user_id: 1,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<script>alert(\"x\" & 'y')</script>"),
            "&lt;script&gt;alert(&quot;x&quot; &amp; &#x27;y&#x27;)&lt;/script&gt;"
        );
        assert_eq!(escape("buy milk"), "buy milk");
    }

    #[test]
    fn test_empty_todo_page() {
        let Html(page) = todo_page(&user(), &[]);

        assert!(page.contains("Nothing to do yet."));
        assert!(page.contains("alice"));
        assert!(!page.contains("data-task-id"));
    }

    #[test]
    fn test_todo_page_lists_tasks_in_order() {
        let Html(page) = todo_page(
            &user(),
            &[task(1, "buy milk", true), task(2, "walk dog", false)],
        );

        let milk = page.find("buy milk").unwrap();
        let dog = page.find("walk dog").unwrap();
        assert!(milk < dog);

        assert!(page.contains("data-task-id=\"1\" data-active=\"true\""));
        assert!(page.contains("data-task-id=\"2\" data-active=\"false\""));
        assert!(page.contains("action=\"/toggle_task/2\""));
    }

    #[test]
    fn test_task_names_are_escaped() {
        let Html(page) = todo_page(&user(), &[task(1, "<b>bold</b>", true)]);

        assert!(page.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!page.contains("<b>bold</b>"));
    }
}
