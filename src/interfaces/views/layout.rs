use actix_web::http::StatusCode;
use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::{
    entities::message::StatusMessage,
    errors::FieldErrors,
    routes::paths,
};

const STYLE: &str = "body{font-family:sans-serif;max-width:52rem;margin:2rem auto;padding:0 1rem}\
.alert{padding:.6rem 1rem;border-radius:4px}\
.alert-success{background:#e6f4ea;color:#1e4620}\
.alert-error{background:#fdecea;color:#611a15}\
.errorlist{color:#b00020;margin:.2rem 0;padding-left:1rem}\
.gallery img{max-width:100%;height:auto}";

/// Wraps `body` in the shared page chrome.
pub fn render_page(title: &str, message: Option<&StatusMessage>, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                nav {
                    a href=(paths::GALLERY_HOME) { "Gallery" }
                    " | "
                    a href=(paths::BLOG_HOME) { "Blog" }
                }
                @if let Some(message) = message {
                    div class={ "alert " (message.level.css_class()) } role="status" { (message.text) }
                }
                main { (body) }
            }
        }
    }
}

pub fn render_error_page(status: StatusCode, title: &str, detail: &str) -> Markup {
    let body = html! {
        h1 { (status.as_u16()) " " (title) }
        p { (detail) }
    };
    render_page(title, None, body)
}

/// `<ul class="errorlist">` for one field, or nothing when it is clean.
pub fn render_field_errors(errors: Option<&FieldErrors>, field: &str) -> Markup {
    let messages: Vec<&str> = errors
        .map(|errors| errors.for_field(field).collect())
        .unwrap_or_default();

    html! {
        @if !messages.is_empty() {
            ul.errorlist {
                @for message in &messages {
                    li { (message) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_includes_escaped_message() {
        let message = StatusMessage::error("<oops> try again");
        let page = render_page("Title", Some(&message), html! { p { "body" } }).into_string();

        assert!(page.contains("class=\"alert alert-error\""));
        assert!(page.contains("&lt;oops&gt; try again"));
        assert!(page.contains("<p>body</p>"));
    }

    #[test]
    fn field_errors_only_for_requested_field() {
        let mut errors = FieldErrors::new();
        errors.add("title", "This field is required.");

        let rendered = render_field_errors(Some(&errors), "title").into_string();
        assert_eq!(rendered, "<ul class=\"errorlist\"><li>This field is required.</li></ul>");
        assert!(render_field_errors(Some(&errors), "content").into_string().is_empty());
        assert!(render_field_errors(None, "title").into_string().is_empty());
    }

    #[test]
    fn error_page_shows_status_and_detail() {
        let page = render_error_page(StatusCode::NOT_FOUND, "Page not found", "Blog post not found").into_string();

        assert!(page.contains("<h1>404 Page not found</h1>"));
        assert!(page.contains("<p>Blog post not found</p>"));
    }
}
