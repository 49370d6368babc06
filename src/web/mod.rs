//! Server-rendered pages for the signup and login forms, plus the shared page shell.

pub mod auth_handlers;

use crate::core::shared::utils::escape_html;

const STYLE: &str = r#"
body { font-family: sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; }
form { margin: 1rem 0; }
label { display: block; margin-top: .5rem; }
input[type=text], input[type=email], input[type=password] { width: 100%; padding: .4rem; }
table { width: 100%; border-collapse: collapse; margin-top: 1rem; }
th, td { text-align: left; padding: .4rem; border-bottom: 1px solid #ddd; }
tr.completed td.title { text-decoration: line-through; color: #777; }
nav a { margin-right: .8rem; }
"#;

pub fn render_page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>"#,
        title = escape_html(title),
    )
}

pub fn render_signup_page() -> String {
    render_page(
        "Sign up",
        r#"<h1>Sign up</h1>
<form method="post" action="/signup">
  <label>Username <input type="text" name="username" maxlength="50" required></label>
  <label>Email <input type="email" name="email" maxlength="100" required></label>
  <label>Password <input type="password" name="password" required></label>
  <button type="submit">Create account</button>
</form>
<p>Already registered? <a href="/login">Log in</a></p>"#,
    )
}

pub fn render_login_page() -> String {
    render_page(
        "Log in",
        r#"<h1>Log in</h1>
<form method="post" action="/login">
  <label>Username <input type="text" name="username" required></label>
  <label>Password <input type="password" name="password" required></label>
  <button type="submit">Log in</button>
</form>
<p>No account yet? <a href="/signup">Sign up</a></p>"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_title_is_escaped() {
        let html = render_page("<script>", "<p>body</p>");
        assert!(html.contains("<title>&lt;script&gt;</title>"));
        assert!(html.contains("<p>body</p>"));
    }

    #[test]
    fn test_forms_post_to_their_routes() {
        assert!(render_signup_page().contains(r#"action="/signup""#));
        assert!(render_login_page().contains(r#"action="/login""#));
    }
}
