use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod graceful_shutdown;
pub mod telemetry;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes, views};
pub use infrastructure::{db, storage, utils};

use repositories::{
    blog_post::BlogPostRepository,
    image::ImageRepository,
    sqlx_repo::{SqlxBlogPostRepo, SqlxImageRepo},
};
use storage::{local::LocalMediaStore, MediaStore};
use use_cases::{blog::BlogPostHandler, gallery::GalleryHandler};

pub struct AppState {
    pub gallery_handler: AppGalleryHandler,
    pub blog_handler: AppBlogHandler,
}

pub type AppGalleryHandler = GalleryHandler<Arc<dyn ImageRepository>, Arc<dyn MediaStore>>;
pub type AppBlogHandler = BlogPostHandler<Arc<dyn BlogPostRepository>>;

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        let media_store = LocalMediaStore::new(config.media_root.clone(), config.media_url.clone());

        AppState::with_components(
            Arc::new(SqlxImageRepo::new(pool.clone())),
            Arc::new(SqlxBlogPostRepo::new(pool)),
            Arc::new(media_store),
            config.max_upload_bytes,
        )
    }

    /// Wires the handlers from already-built parts (other stores, tests).
    pub fn with_components(
        image_repo: Arc<dyn ImageRepository>,
        blog_post_repo: Arc<dyn BlogPostRepository>,
        media_store: Arc<dyn MediaStore>,
        max_upload_bytes: usize,
    ) -> Self {
        AppState {
            gallery_handler: GalleryHandler::new(image_repo, media_store, max_upload_bytes),
            blog_handler: BlogPostHandler::new(blog_post_repo),
        }
    }
}
