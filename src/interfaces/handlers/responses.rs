use actix_web::{
    http::{header, header::ContentType, StatusCode},
    HttpResponse,
};
use maud::Markup;

pub fn html(status: StatusCode, page: Markup) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header(ContentType::html())
        .body(page.into_string())
}

pub fn ok_html(page: Markup) -> HttpResponse {
    html(StatusCode::OK, page)
}

/// Post/redirect/get: the browser follows up with a GET, so a refresh never
/// resubmits the form.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
