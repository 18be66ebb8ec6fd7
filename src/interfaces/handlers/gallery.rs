use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpResponse};
use tracing::{debug, instrument};

use crate::{
    entities::image::{ImageForm, ImageFormValues, ImageUpload},
    errors::AppError,
    handlers::responses::{ok_html, see_other},
    routes::paths,
    views::gallery::render_gallery,
    AppState,
};

/// GET: every image plus an empty upload form.
#[instrument(skip(state))]
pub async fn home(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let gallery = &state.gallery_handler;

    let images = gallery.list_images().await?;
    let page = render_gallery(&images, |key| gallery.image_url(key), &ImageFormValues::default(), None);

    Ok(ok_html(page))
}

/// POST: store the upload and redirect back, or re-render with field errors.
#[instrument(skip(state, upload))]
pub async fn upload_image(
    state: web::Data<AppState>,
    upload: MultipartForm<ImageUpload>,
) -> Result<HttpResponse, AppError> {
    let gallery = &state.gallery_handler;

    let form = ImageForm::from_multipart(upload.into_inner()).await?;
    let submitted = form.values.clone();

    match gallery.upload_image(form).await {
        Ok(_) => Ok(see_other(paths::GALLERY_HOME)),
        Err(AppError::ValidationError(errors)) => {
            debug!("Rejected image upload: {}", errors.len());
            let images = gallery.list_images().await?;
            let page = render_gallery(&images, |key| gallery.image_url(key), &submitted, Some(&errors));
            Ok(ok_html(page))
        }
        Err(e) => Err(e),
    }
}
