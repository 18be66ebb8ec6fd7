use actix_web::web;

mod blog;
mod form_error;
mod gallery;

pub mod paths {
    use uuid::Uuid;

    pub const GALLERY_HOME: &str = "/";
    pub const BLOG_HOME: &str = "/blog";
    pub const BLOG_CREATE: &str = "/blog/create";

    pub fn blog_edit(id: &Uuid) -> String {
        format!("/blog/edit/{id}")
    }

    pub fn blog_delete(id: &Uuid) -> String {
        format!("/blog/delete/{id}")
    }
}

/// Mounts both apps. `max_upload_bytes` bounds the multipart body size.
pub fn configure_routes(cfg: &mut web::ServiceConfig, max_upload_bytes: usize) {
    cfg.configure(|cfg| form_error::config_routes(cfg, max_upload_bytes));
    cfg.configure(gallery::config_routes);
    cfg.configure(blog::config_routes);
}
