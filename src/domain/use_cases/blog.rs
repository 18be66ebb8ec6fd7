use tracing::info;

use crate::{
    entities::blog_post::{BlogPost, PostForm},
    errors::AppError,
    repositories::blog_post::BlogPostRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct BlogPostHandler<R>
where
    R: BlogPostRepository,
{
    pub blog_post_repo: R,
}

impl<R> BlogPostHandler<R>
where
    R: BlogPostRepository,
{
    pub fn new(blog_post_repo: R) -> Self {
        BlogPostHandler { blog_post_repo }
    }

    /// Retrieves all blog posts in storage order
    pub async fn list_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        self.blog_post_repo.list_blog_posts().await
    }

    /// Looks up a post by the raw path id; malformed or unknown ids are `NotFound`
    pub async fn get_post(&self, post_id: &str) -> Result<BlogPost, AppError> {
        let valid_id = valid_uuid(post_id, "Blog post")?;

        self.blog_post_repo
            .get_blog_post_by_id(&valid_id)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound("Blog post not found".to_string()),
                _ => e,
            })
    }

    /// Validates the form and stores a new post
    pub async fn create_post(&self, form: &PostForm) -> Result<BlogPost, AppError> {
        let new_post = form.validate_for_create()?;

        let created = self.blog_post_repo.create_blog_post(&new_post).await?;
        info!(post_id = %created.id, "Created blog post");

        Ok(created)
    }

    /// Validates the form against `existing` and overwrites its fields
    pub async fn update_post(&self, existing: &BlogPost, form: &PostForm) -> Result<BlogPost, AppError> {
        let update = form.validate_for_update(existing)?;

        let updated = self.blog_post_repo.update_blog_post(&update).await?;
        info!(post_id = %updated.id, "Updated blog post");

        Ok(updated)
    }

    /// Deletes a post permanently
    pub async fn delete_post(&self, post: &BlogPost) -> Result<(), AppError> {
        self.blog_post_repo.delete_blog_post(&post.id).await?;
        info!(post_id = %post.id, "Deleted blog post");
        Ok(())
    }
}
