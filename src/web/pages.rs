//! Page rendering for the Palaver web front end.
//!
//! Pages are assembled from plain strings with HTML escaping; there is no
//! template engine. Each function returns a complete HTML document.

use axum::http::StatusCode;

use crate::forum::{Board, FormErrors, NewTopicForm, Post, Topic};

/// A topic row for the board topics page.
#[derive(Debug, Clone)]
pub struct TopicEntry {
    /// The topic itself.
    pub topic: Topic,
    /// Username of the topic starter.
    pub starter: String,
    /// Number of posts in the topic.
    pub post_count: i64,
}

/// A post row for the topic detail page.
#[derive(Debug, Clone)]
pub struct PostEntry {
    /// The post itself.
    pub post: Post,
    /// Username of the post author.
    pub author: String,
}

/// Escape a string for safe inclusion in HTML text or attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

/// Wrap page content in the common document shell with navigation.
fn layout(forum_name: &str, title: &str, user: Option<&str>, body: &str) -> String {
    let nav = match user {
        Some(username) => format!(
            r#"<span>Signed in as {}</span>
<form method="post" action="/logout" class="inline"><button type="submit">Log out</button></form>"#,
            escape_html(username)
        ),
        None => r#"<a href="/login">Log in</a>"#.to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - {forum}</title>
</head>
<body>
<header>
<a href="/">{forum}</a>
<nav>{nav}</nav>
</header>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape_html(title),
        forum = escape_html(forum_name),
        nav = nav,
        body = body,
    )
}

/// Render the home page with the list of boards and their topic counts.
pub fn home_page(
    forum_name: &str,
    forum_description: &str,
    user: Option<&str>,
    boards: &[(Board, i64)],
) -> String {
    let mut rows = String::new();
    for (board, topic_count) in boards {
        rows.push_str(&format!(
            r#"<tr>
<td><a href="/boards/{id}/topics/">{name}</a><br>{description}</td>
<td>{topics}</td>
</tr>
"#,
            id = board.id,
            name = escape_html(&board.name),
            description = escape_html(&board.description),
            topics = topic_count,
        ));
    }

    let body = format!(
        r#"<p>{description}</p>
<table>
<thead><tr><th>Board</th><th>Topics</th></tr></thead>
<tbody>
{rows}</tbody>
</table>"#,
        description = escape_html(forum_description),
        rows = rows,
    );

    layout(forum_name, "Boards", user, &body)
}

/// Render the topic listing page for a board.
pub fn topics_page(
    forum_name: &str,
    board: &Board,
    user: Option<&str>,
    topics: &[TopicEntry],
) -> String {
    let mut rows = String::new();
    for entry in topics {
        rows.push_str(&format!(
            r#"<tr>
<td><a href="/boards/{board_id}/topics/{topic_id}/">{subject}</a></td>
<td>{starter}</td>
<td>{posts}</td>
<td>{updated}</td>
</tr>
"#,
            board_id = board.id,
            topic_id = entry.topic.id,
            subject = escape_html(&entry.topic.subject),
            starter = escape_html(&entry.starter),
            posts = entry.post_count,
            updated = escape_html(&entry.topic.updated_at),
        ));
    }

    let body = format!(
        r#"<h2>{name}</h2>
<p>{description}</p>
<p><a href="/boards/{id}/new/">New topic</a></p>
<table>
<thead><tr><th>Topic</th><th>Starter</th><th>Posts</th><th>Last update</th></tr></thead>
<tbody>
{rows}</tbody>
</table>"#,
        name = escape_html(&board.name),
        description = escape_html(&board.description),
        id = board.id,
        rows = rows,
    );

    layout(forum_name, &board.name, user, &body)
}

/// Render the error messages for one form field.
fn field_errors(errors: &FormErrors, field: &str) -> String {
    let messages = errors.field(field);
    if messages.is_empty() {
        return String::new();
    }

    let items: String = messages
        .iter()
        .map(|m| format!("<li>{}</li>", escape_html(m)))
        .collect();
    format!("<ul class=\"errors\">{items}</ul>\n")
}

/// Render the new-topic page with the bound form.
///
/// The document always contains a CSRF token field and a link back to the
/// board's topic listing; field errors are shown next to their inputs.
pub fn new_topic_page(
    forum_name: &str,
    board: &Board,
    form: &NewTopicForm,
    errors: &FormErrors,
    csrf_token: &str,
    user: Option<&str>,
) -> String {
    let body = format!(
        r#"<h2>Start a new topic</h2>
<p>in <a href="/boards/{id}/topics/">{name}</a></p>
<form method="post" action="/boards/{id}/new/">
<input type="hidden" name="csrf_token" value="{csrf}">
<p>
<label for="id_subject">Subject</label>
<input type="text" id="id_subject" name="subject" value="{subject}">
{subject_errors}</p>
<p>
<label for="id_message">Message</label>
<textarea id="id_message" name="message" rows="5">{message}</textarea>
{message_errors}</p>
<button type="submit">Post</button>
</form>"#,
        id = board.id,
        name = escape_html(&board.name),
        csrf = escape_html(csrf_token),
        subject = escape_html(&form.subject),
        subject_errors = field_errors(errors, "subject"),
        message = escape_html(&form.message),
        message_errors = field_errors(errors, "message"),
    );

    layout(forum_name, "Start a new topic", user, &body)
}

/// Render the topic detail page with its posts.
pub fn topic_page(
    forum_name: &str,
    board: &Board,
    topic: &Topic,
    posts: &[PostEntry],
    user: Option<&str>,
) -> String {
    let mut items = String::new();
    for entry in posts {
        items.push_str(&format!(
            r#"<article>
<header>{author} on {date}</header>
<p>{message}</p>
</article>
"#,
            author = escape_html(&entry.author),
            date = escape_html(&entry.post.created_at),
            message = escape_html(&entry.post.message),
        ));
    }

    let body = format!(
        r#"<h2>{subject}</h2>
<p>in <a href="/boards/{board_id}/topics/">{board_name}</a></p>
{items}"#,
        subject = escape_html(&topic.subject),
        board_id = board.id,
        board_name = escape_html(&board.name),
        items = items,
    );

    layout(forum_name, &topic.subject, user, &body)
}

/// Render the login page.
pub fn login_page(forum_name: &str, next: &str, username: &str, error: Option<&str>) -> String {
    let error_html = match error {
        Some(message) => format!("<p class=\"error\">{}</p>\n", escape_html(message)),
        None => String::new(),
    };

    let body = format!(
        r#"<h2>Log in</h2>
{error_html}<form method="post" action="/login">
<input type="hidden" name="next" value="{next}">
<p>
<label for="id_username">Username</label>
<input type="text" id="id_username" name="username" value="{username}">
</p>
<p>
<label for="id_password">Password</label>
<input type="password" id="id_password" name="password">
</p>
<button type="submit">Log in</button>
</form>"#,
        error_html = error_html,
        next = escape_html(next),
        username = escape_html(username),
    );

    layout(forum_name, "Log in", None, &body)
}

/// Render a bare error page for the given status.
pub fn error_page(status: StatusCode, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{code} {reason}</title>
</head>
<body>
<h1>{code} {reason}</h1>
<p>{message}</p>
<p><a href="/">Back to the board list</a></p>
</body>
</html>
"#,
        code = status.as_u16(),
        reason = status.canonical_reason().unwrap_or("Error"),
        message = escape_html(message),
    )
}
