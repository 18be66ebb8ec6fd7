use maud::{html, Markup};

use crate::{
    entities::image::{Image, ImageFormValues, MAX_NAME_LENGTH},
    errors::FieldErrors,
    routes::paths,
};

use super::layout::{render_field_errors, render_page};

/// Image list followed by the upload form. `url_for` maps a storage key to
/// its public URL.
pub fn render_gallery(
    images: &[Image],
    url_for: impl Fn(&str) -> String,
    form: &ImageFormValues,
    errors: Option<&FieldErrors>,
) -> Markup {
    let body = html! {
        h1 { "Gallery" }

        @if images.is_empty() {
            p.empty { "No images yet." }
        } @else {
            ul.gallery {
                @for image in images {
                    li {
                        figure {
                            img src=(url_for(&image.image_path)) alt=(image.name);
                            figcaption {
                                strong { (image.name) }
                                p { (image.description) }
                            }
                        }
                    }
                }
            }
        }

        h2 { "Upload an image" }
        form method="post" action=(paths::GALLERY_HOME) enctype="multipart/form-data" {
            p {
                label for="id_name" { "Name:" }
                input type="text" name="name" id="id_name" maxlength=(MAX_NAME_LENGTH) required value=(form.name);
                (render_field_errors(errors, "name"))
            }
            p {
                label for="id_description" { "Description:" }
                textarea name="description" id="id_description" required { (form.description) }
                (render_field_errors(errors, "description"))
            }
            p {
                label for="id_image" { "Image:" }
                input type="file" name="image" id="id_image" accept="image/*" required;
                (render_field_errors(errors, "image"))
            }
            button type="submit" { "Upload" }
        }
    };

    render_page("Gallery", None, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn image() -> Image {
        Image {
            id: Uuid::new_v4(),
            name: "Sunset".into(),
            description: "<b>orange</b> sky".into(),
            image_path: "images/sunset.png".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn lists_images_with_public_urls() {
        let page = render_gallery(&[image()], |key| format!("/media/{key}"), &ImageFormValues::default(), None)
            .into_string();

        assert!(page.contains("src=\"/media/images/sunset.png\""));
        assert!(page.contains("<strong>Sunset</strong>"));
        assert!(page.contains("&lt;b&gt;orange&lt;/b&gt; sky"));
        assert!(!page.contains("<b>orange"));
    }

    #[test]
    fn echoes_rejected_input_with_errors() {
        let form = ImageFormValues { name: "A sleepy cat".into(), description: String::new() };
        let mut errors = FieldErrors::new();
        errors.add("image", "No file was submitted.");

        let page = render_gallery(&[], |key| key.to_string(), &form, Some(&errors)).into_string();

        assert!(page.contains("value=\"A sleepy cat\""));
        assert!(page.contains("<li>No file was submitted.</li>"));
        assert!(page.contains("No images yet."));
    }
}
