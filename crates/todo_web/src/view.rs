//! Server-rendered HTML for the todo page.
//!
//! Markup is assembled with `format!`; every piece of user text goes through
//! [`escape_html`] first.

use std::fmt::Write;

use todo_core::Todo;

const PAGE_TITLE: &str = "Todos";
const LOADING_REFRESH_SECS: u32 = 1;

const STYLES: &str = "\
body{font-family:system-ui,sans-serif;margin:0;background:#fafafa;color:#222}\
.container{max-width:640px;margin:0 auto;padding:2rem 1rem}\
.title{margin:0 0 .25rem}\
.desc{font-size:1rem;font-weight:normal;color:#666;margin:0 0 2rem}\
.add-todo{display:flex;gap:.5rem;margin-bottom:1.5rem}\
.input{flex:1;padding:.5rem;font-size:1rem}\
.todo-list{list-style:none;padding:0;margin:0}\
.todo{display:flex;align-items:center;gap:.5rem;padding:.5rem 0;border-bottom:1px solid #eee}\
.todo form{margin:0}\
.label{flex:1;display:flex;align-items:center;gap:.5rem}\
.checked{text-decoration:line-through;color:#999}\
.empty-state{color:#888;text-align:center;padding:2rem 0}";

/// What the list section of the page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// The list fetch has not finished yet.
    Loading,
    /// The list fetch failed.
    Error,
    /// The fetched list, possibly empty.
    Ready(Vec<Todo>),
}

/// Renders the whole page around the given list state.
pub fn render_page(list: &ListView) -> String {
    let refresh = match list {
        ListView::Loading => format!(
            "<meta http-equiv=\"refresh\" content=\"{LOADING_REFRESH_SECS}\">"
        ),
        _ => String::new(),
    };

    format!(
        "<!DOCTYPE html>\
<html lang=\"en\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">{refresh}\
<title>{PAGE_TITLE}</title><style>{STYLES}</style></head>\
<body><div class=\"container\">\
<header><h1 class=\"title\">{PAGE_TITLE}</h1>\
<h2 class=\"desc\">A small to-do list backed by SQLite.</h2></header>\
<main>{form}{list}</main>\
</div></body></html>",
        form = render_add_form(),
        list = render_list(list),
    )
}

fn render_add_form() -> &'static str {
    "<form method=\"post\" action=\"/todos\" class=\"add-todo\">\
<input class=\"input\" name=\"text\" placeholder=\"Buy some eggs\" autocomplete=\"off\">\
<button type=\"submit\">Add</button></form>"
}

/// Renders the list section alone.
pub fn render_list(list: &ListView) -> String {
    match list {
        ListView::Loading => "<div>Loading...</div>".to_string(),
        ListView::Error => "<div>Error loading todos...</div>".to_string(),
        ListView::Ready(todos) if todos.is_empty() => {
            "<div class=\"empty-state\">Try adding a todo \u{261d}\u{fe0f}</div>".to_string()
        }
        ListView::Ready(todos) => {
            let mut html = String::from("<ul class=\"todo-list\">");
            for todo in todos {
                render_item(&mut html, todo);
            }
            html.push_str("</ul>");
            html
        }
    }
}

fn render_item(html: &mut String, todo: &Todo) {
    let id = todo.id;
    let (label_class, checked) = if todo.completed {
        ("label checked", " checked")
    } else {
        ("label", "")
    };

    // Writing into a String cannot fail.
    let _ = write!(
        html,
        "<li class=\"todo\" id=\"todo-{id}\">\
<form method=\"post\" action=\"/todos/{id}/toggle\" class=\"{label_class}\">\
<input type=\"hidden\" name=\"completed\" value=\"{completed}\">\
<label class=\"{label_class}\">\
<input type=\"checkbox\" class=\"checkbox\" onchange=\"this.form.submit()\"{checked}>\
{text}</label><noscript><button type=\"submit\">Toggle</button></noscript></form>\
<form method=\"post\" action=\"/todos/{id}/subtasks\">\
<button type=\"submit\" class=\"ai-button\" title=\"Generate subtasks\">\u{1f916}</button></form>\
<form method=\"post\" action=\"/todos/{id}/delete\">\
<button type=\"submit\" class=\"delete-button\" title=\"Delete\">\u{2715}</button></form>\
</li>",
        completed = todo.completed,
        text = escape_html(&todo.text),
    );
}

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
