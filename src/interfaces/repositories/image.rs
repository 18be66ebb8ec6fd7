use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use sqlx::PgPool;

use crate::{
    entities::image::{Image, ImageInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxImageRepo,
};

const IMAGE_COLUMNS: &str = "id, name, description, image_path, created_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageRepository: Send + Sync {
    async fn create_image(&self, image: &ImageInsert) -> Result<Image, AppError>;
    async fn get_image_by_id(&self, id: &Uuid) -> Result<Image, AppError>;
    async fn update_image(&self, id: &Uuid, image: &ImageInsert) -> Result<Image, AppError>;
    async fn delete_image(&self, id: &Uuid) -> Result<(), AppError>;
    async fn list_images(&self) -> Result<Vec<Image>, AppError>;
}

#[async_trait]
impl<T> ImageRepository for Arc<T>
where
    T: ImageRepository + ?Sized,
{
    async fn create_image(&self, image: &ImageInsert) -> Result<Image, AppError> {
        (**self).create_image(image).await
    }

    async fn get_image_by_id(&self, id: &Uuid) -> Result<Image, AppError> {
        (**self).get_image_by_id(id).await
    }

    async fn update_image(&self, id: &Uuid, image: &ImageInsert) -> Result<Image, AppError> {
        (**self).update_image(id, image).await
    }

    async fn delete_image(&self, id: &Uuid) -> Result<(), AppError> {
        (**self).delete_image(id).await
    }

    async fn list_images(&self) -> Result<Vec<Image>, AppError> {
        (**self).list_images().await
    }
}

impl SqlxImageRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxImageRepo { pool }
    }
}

#[async_trait]
impl ImageRepository for SqlxImageRepo {
    async fn create_image(&self, image: &ImageInsert) -> Result<Image, AppError> {
        let created = sqlx::query_as::<_, Image>(&format!(
            r#"
            INSERT INTO images (name, description, image_path)
            VALUES ($1, $2, $3)
            RETURNING {IMAGE_COLUMNS}
            "#
        ))
        .bind(&image.name)
        .bind(&image.description)
        .bind(&image.image_path)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_image_by_id(&self, id: &Uuid) -> Result<Image, AppError> {
        sqlx::query_as::<_, Image>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM images WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".into()))
    }

    async fn update_image(&self, id: &Uuid, image: &ImageInsert) -> Result<Image, AppError> {
        sqlx::query_as::<_, Image>(&format!(
            r#"
            UPDATE images SET
                name = $1,
                description = $2,
                image_path = $3
            WHERE id = $4
            RETURNING {IMAGE_COLUMNS}
            "#
        ))
        .bind(&image.name)
        .bind(&image.description)
        .bind(&image.image_path)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".into()))
    }

    async fn delete_image(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Image not found".into()));
        }

        Ok(())
    }

    async fn list_images(&self) -> Result<Vec<Image>, AppError> {
        let images = sqlx::query_as::<_, Image>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM images ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }
}
