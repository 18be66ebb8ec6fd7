pub mod blog_posts;
pub mod gallery;
pub mod not_found;
pub mod responses;
