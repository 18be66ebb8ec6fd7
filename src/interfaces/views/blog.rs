use maud::{html, Markup, PreEscaped};
use uuid::Uuid;

use crate::{
    entities::{blog_post::{BlogPost, PostForm, MAX_TITLE_LENGTH}, message::StatusMessage},
    errors::FieldErrors,
    routes::paths,
};

use super::layout::{render_field_errors, render_page};

pub fn render_post_list(posts: &[BlogPost], message: Option<&StatusMessage>) -> Markup {
    let body = html! {
        h1 { "Blog" }
        p { a href=(paths::BLOG_CREATE) { "New post" } }

        @if posts.is_empty() {
            p.empty { "No posts yet." }
        }

        @for post in posts {
            article.post {
                h2 { (post.title) }
                p.meta { (post.created_at.format("%Y-%m-%d %H:%M").to_string()) }
                // content_html() is already sanitized
                div.content { (PreEscaped(post.content_html())) }
                p {
                    a href=(paths::blog_edit(&post.id)) { "Edit" }
                    " | "
                    a href=(paths::blog_delete(&post.id)) { "Delete" }
                }
            }
        }
    };

    render_page("Blog", message, body)
}

/// Shared create/edit form. `id` is set when editing, which points the form
/// at the edit route instead of the create route.
pub fn render_post_form(
    form: &PostForm,
    errors: Option<&FieldErrors>,
    id: Option<&Uuid>,
    message: Option<&StatusMessage>,
) -> Markup {
    let (heading, action) = match id {
        Some(id) => ("Edit post", paths::blog_edit(id)),
        None => ("New post", paths::BLOG_CREATE.to_string()),
    };

    let body = html! {
        h1 { (heading) }
        form method="post" action=(action) {
            p {
                label for="id_title" { "Title:" }
                input type="text" name="title" id="id_title" maxlength=(MAX_TITLE_LENGTH) required value=(form.title);
                (render_field_errors(errors, "title"))
            }
            p {
                label for="id_content" { "Content:" }
                textarea name="content" id="id_content" rows="10" required { (form.content) }
                (render_field_errors(errors, "content"))
            }
            button type="submit" { "Save" }
            " "
            a href=(paths::BLOG_HOME) { "Cancel" }
        }
    };

    render_page(heading, message, body)
}

pub fn render_delete_confirm(post: &BlogPost) -> Markup {
    let body = html! {
        h1 { "Delete post" }
        p { "Are you sure you want to delete the post \"" (post.title) "\"?" }
        form method="post" action=(paths::blog_delete(&post.id)) {
            button type="submit" { "Yes, delete" }
            " "
            a href=(paths::BLOG_HOME) { "Cancel" }
        }
    };

    render_page("Delete post", None, body)
}
