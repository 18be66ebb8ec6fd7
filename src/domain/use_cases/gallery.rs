use tracing::{info, warn};

use crate::{
    entities::image::{Image, ImageForm, IMAGE_NAMESPACE},
    errors::AppError,
    repositories::image::ImageRepository,
    storage::MediaStore,
};

pub struct GalleryHandler<R, S>
where
    R: ImageRepository,
    S: MediaStore,
{
    pub image_repo: R,
    pub media_store: S,
    pub max_upload_bytes: usize,
}

impl<R, S> GalleryHandler<R, S>
where
    R: ImageRepository,
    S: MediaStore,
{
    pub fn new(image_repo: R, media_store: S, max_upload_bytes: usize) -> Self {
        GalleryHandler { image_repo, media_store, max_upload_bytes }
    }

    /// Retrieves every image in upload order
    pub async fn list_images(&self) -> Result<Vec<Image>, AppError> {
        self.image_repo.list_images().await
    }

    /// Validates an upload, writes the file under `images/` and records it.
    /// The written file is removed again if the record cannot be stored.
    pub async fn upload_image(&self, form: ImageForm) -> Result<Image, AppError> {
        let new_image = form.validate_for_create(self.max_upload_bytes)?;

        let key = self
            .media_store
            .save(IMAGE_NAMESPACE, new_image.file.extension, &new_image.file.content)
            .await?;

        let (insert, file) = new_image.into_insert(key);

        match self.image_repo.create_image(&insert).await {
            Ok(image) => {
                info!(image_id = %image.id, path = %image.image_path, mime = file.mime_type, "Stored uploaded image");
                Ok(image)
            }
            Err(e) => {
                if let Err(cleanup) = self.media_store.delete(&insert.image_path).await {
                    warn!("Could not remove orphaned upload {}: {}", insert.image_path, cleanup);
                }
                Err(e)
            }
        }
    }

    pub fn image_url(&self, key: &str) -> String {
        self.media_store.url_for(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::{
        entities::image::{ImageFormValues, UploadedFile},
        repositories::image::MockImageRepository,
        storage::MockMediaStore,
    };

    const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];

    fn valid_form() -> ImageForm {
        ImageForm {
            values: ImageFormValues { name: "Cat".into(), description: "A cat".into() },
            image: Some(UploadedFile { file_name: Some("cat.png".into()), content: PNG_BYTES.to_vec() }),
        }
    }

    #[actix_rt::test]
    async fn upload_saves_file_then_record() {
        let mut store = MockMediaStore::new();
        store.expect_save()
            .withf(|ns, ext, content| ns == "images" && ext == "png" && content == PNG_BYTES)
            .times(1)
            .returning(|_, _, _| Ok("images/abc.png".into()));

        let mut repo = MockImageRepository::new();
        repo.expect_create_image()
            .withf(|i| i.name == "Cat" && i.image_path == "images/abc.png")
            .times(1)
            .returning(|i| Ok(Image {
                id: Uuid::new_v4(),
                name: i.name.clone(),
                description: i.description.clone(),
                image_path: i.image_path.clone(),
                created_at: Utc::now(),
            }));

        let handler = GalleryHandler::new(repo, store, 1024);
        let image = handler.upload_image(valid_form()).await.unwrap();

        assert_eq!(image.image_path, "images/abc.png");
    }

    #[actix_rt::test]
    async fn invalid_upload_writes_nothing() {
        let mut store = MockMediaStore::new();
        store.expect_save().times(0);
        let mut repo = MockImageRepository::new();
        repo.expect_create_image().times(0);

        let handler = GalleryHandler::new(repo, store, 1024);
        let result = handler.upload_image(ImageForm::default()).await;

        assert!(matches!(result, Err(AppError::ValidationError(errors)) if errors.len() == 3));
    }

    #[actix_rt::test]
    async fn failed_insert_removes_stored_file() {
        let mut store = MockMediaStore::new();
        store.expect_save().returning(|_, _, _| Ok("images/abc.png".into()));
        store.expect_delete()
            .withf(|key| key == "images/abc.png")
            .times(1)
            .returning(|_| Ok(()));

        let mut repo = MockImageRepository::new();
        repo.expect_create_image()
            .returning(|_| Err(AppError::InternalError("database is down".into())));

        let handler = GalleryHandler::new(repo, store, 1024);
        let result = handler.upload_image(valid_form()).await;

        assert!(matches!(result, Err(AppError::InternalError(_))));
    }
}
