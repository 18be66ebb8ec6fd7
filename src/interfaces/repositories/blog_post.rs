use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use sqlx::{self, PgPool};

use crate::{
    entities::blog_post::{BlogPost, BlogPostUpdate, NewBlogPost},
    errors::AppError,
    repositories::sqlx_repo::SqlxBlogPostRepo,
};

const POST_COLUMNS: &str = "id, title, content, created_at, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    async fn create_blog_post(&self, post: &NewBlogPost) -> Result<BlogPost, AppError>;
    async fn get_blog_post_by_id(&self, id: &Uuid) -> Result<BlogPost, AppError>;
    async fn update_blog_post(&self, post: &BlogPostUpdate) -> Result<BlogPost, AppError>;
    async fn delete_blog_post(&self, id: &Uuid) -> Result<(), AppError>;
    async fn list_blog_posts(&self) -> Result<Vec<BlogPost>, AppError>;
}

#[async_trait]
impl<T> BlogPostRepository for Arc<T>
where
    T: BlogPostRepository + ?Sized,
{
    async fn create_blog_post(&self, post: &NewBlogPost) -> Result<BlogPost, AppError> {
        (**self).create_blog_post(post).await
    }

    async fn get_blog_post_by_id(&self, id: &Uuid) -> Result<BlogPost, AppError> {
        (**self).get_blog_post_by_id(id).await
    }

    async fn update_blog_post(&self, post: &BlogPostUpdate) -> Result<BlogPost, AppError> {
        (**self).update_blog_post(post).await
    }

    async fn delete_blog_post(&self, id: &Uuid) -> Result<(), AppError> {
        (**self).delete_blog_post(id).await
    }

    async fn list_blog_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        (**self).list_blog_posts().await
    }
}

impl SqlxBlogPostRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxBlogPostRepo { pool }
    }
}

#[async_trait]
impl BlogPostRepository for SqlxBlogPostRepo {
    async fn create_blog_post(&self, post: &NewBlogPost) -> Result<BlogPost, AppError> {
        let created = sqlx::query_as::<_, BlogPost>(&format!(
            r#"
            INSERT INTO posts (title, content)
            VALUES ($1, $2)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(&post.title)
        .bind(&post.content)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_blog_post_by_id(&self, id: &Uuid) -> Result<BlogPost, AppError> {
        sqlx::query_as::<_, BlogPost>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog post not found".into()))
    }

    async fn update_blog_post(&self, post: &BlogPostUpdate) -> Result<BlogPost, AppError> {
        sqlx::query_as::<_, BlogPost>(&format!(
            r#"
            UPDATE posts SET
                title = $1,
                content = $2,
                updated_at = NOW()
            WHERE id = $3
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog post not found".into()))
    }

    async fn delete_blog_post(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Blog post not found".into()));
        }

        Ok(())
    }

    async fn list_blog_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        let posts = sqlx::query_as::<_, BlogPost>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }
}
