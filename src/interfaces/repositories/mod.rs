pub mod blog_post;
pub mod image;
pub mod sqlx_repo;
