use std::collections::HashMap;

use actix_web::{web, FromRequest, HttpRequest, HttpResponse};
use tracing::{debug, instrument};

use crate::{
    entities::{blog_post::PostForm, message::{Notice, StatusMessage}},
    errors::AppError,
    handlers::responses::{ok_html, see_other},
    routes::paths,
    views::blog::{render_delete_confirm, render_post_form, render_post_list},
    AppState,
};

#[instrument(skip(state, query))]
pub async fn home(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let blog_post_handler = &state.blog_handler;

    let posts = blog_post_handler.list_posts().await?;
    let message = Notice::parse(query.get("notice").map(String::as_str)).map(|n| n.message());

    Ok(ok_html(render_post_list(&posts, message.as_ref())))
}

#[instrument]
pub async fn create_post_form() -> HttpResponse {
    ok_html(render_post_form(&PostForm::default(), None, None, None))
}

#[instrument(skip(state, data))]
pub async fn create_post(
    state: web::Data<AppState>,
    data: web::Form<PostForm>,
) -> Result<HttpResponse, AppError> {
    let blog_post_handler = &state.blog_handler;
    let form = data.into_inner();

    match blog_post_handler.create_post(&form).await {
        Ok(_) => Ok(see_other(&Notice::Created.location(paths::BLOG_HOME))),
        Err(AppError::ValidationError(errors)) => {
            debug!("Rejected new post: {}", errors);
            let message = StatusMessage::form_errors();
            Ok(ok_html(render_post_form(&form, Some(&errors), None, Some(&message))))
        }
        Err(e) => Err(e),
    }
}

#[instrument(skip(state))]
pub async fn edit_post_form(
    post_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let blog_post_handler = &state.blog_handler;
    let post = blog_post_handler.get_post(&post_id).await?;

    let form = PostForm::from_post(&post);
    Ok(ok_html(render_post_form(&form, None, Some(&post.id), None)))
}

/// The post is looked up before the body is read, so an unknown id is a 404
/// whatever the request carries.
#[instrument(skip(req, payload, state))]
pub async fn edit_post(
    req: HttpRequest,
    payload: web::Payload,
    post_id: web::Path<String>,
    state: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    let blog_post_handler = &state.blog_handler;
    let post = blog_post_handler.get_post(&post_id).await?;

    let form = web::Form::<PostForm>::from_request(&req, &mut payload.into_inner())
        .await?
        .into_inner();

    match blog_post_handler.update_post(&post, &form).await {
        Ok(_) => Ok(see_other(&Notice::Updated.location(paths::BLOG_HOME))),
        Err(AppError::ValidationError(errors)) => {
            debug!(post_id = %post.id, "Rejected post edit: {}", errors);
            let message = StatusMessage::form_errors();
            Ok(ok_html(render_post_form(&form, Some(&errors), Some(&post.id), Some(&message))))
        }
        Err(e) => Err(e.into()),
    }
}

#[instrument(skip(state))]
pub async fn delete_post_confirm(
    post_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let post = state.blog_handler.get_post(&post_id).await?;
    Ok(ok_html(render_delete_confirm(&post)))
}

#[instrument(skip(state))]
pub async fn delete_post(
    post_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let blog_post_handler = &state.blog_handler;
    let post = blog_post_handler.get_post(&post_id).await?;

    blog_post_handler.delete_post(&post).await?;
    Ok(see_other(&Notice::Deleted.location(paths::BLOG_HOME)))
}
