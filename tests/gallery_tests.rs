
use reqwest::{
    multipart::{Form, Part},
    StatusCode,
};
use test_utils::*;

fn png_part() -> Part {
    Part::bytes(PNG_BYTES.to_vec())
        .file_name("cat.png")
        .mime_str("image/png")
        .unwrap()
}

#[actix_rt::test]
async fn empty_gallery_renders_upload_form() {
    let app = TestApp::spawn().await;

    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.unwrap();
    assert!(body.contains("No images yet."));
    assert!(body.contains("enctype=\"multipart/form-data\""));
}

#[actix_rt::test]
async fn valid_upload_redirects_and_stores_file() {
    let app = TestApp::spawn().await;

    let form = Form::new()
        .text("name", "Cat")
        .text("description", "A sleepy cat")
        .part("image", png_part());

    let response = app.post_multipart("/", form).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let images = app.images.all();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].name, "Cat");
    assert_eq!(images[0].description, "A sleepy cat");
    assert!(images[0].image_path.starts_with("images/"));
    assert!(images[0].image_path.ends_with(".png"));

    let stored = std::fs::read(app.media_path(&images[0].image_path)).unwrap();
    assert_eq!(stored, PNG_BYTES);
}

#[actix_rt::test]
async fn uploaded_image_appears_in_listing() {
    let app = TestApp::spawn().await;

    let form = Form::new()
        .text("name", "Tabby")
        .text("description", "Striped")
        .part("image", png_part());
    app.post_multipart("/", form).await;

    let body = app.get("/").await.text().await.unwrap();
    assert!(!body.contains("No images yet."));
    assert!(body.contains("<strong>Tabby</strong>"));
    assert!(body.contains("Striped"));
}

#[actix_rt::test]
async fn missing_fields_rerender_with_input() {
    let app = TestApp::spawn().await;

    let form = Form::new().text("name", "Cat");

    let response = app.post_multipart("/", form).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.unwrap();
    assert!(body.contains("value=\"Cat\""));
    assert!(body.contains("class=\"errorlist\""));
    assert!(app.images.all().is_empty());
}

#[actix_rt::test]
async fn non_image_upload_is_rejected() {
    let app = TestApp::spawn().await;

    let part = Part::bytes(b"just some text".to_vec())
        .file_name("notes.txt")
        .mime_str("text/plain")
        .unwrap();
    let form = Form::new()
        .text("name", "Notes")
        .text("description", "Not a picture")
        .part("image", part);

    let response = app.post_multipart("/", form).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.unwrap();
    assert!(body.contains("class=\"errorlist\""));
    assert!(app.images.all().is_empty());
    assert!(!app.media_path("images").exists());
}

#[actix_rt::test]
async fn overlong_name_is_rejected() {
    let app = TestApp::spawn().await;

    let name = "x".repeat(51);
    let form = Form::new()
        .text("name", name)
        .text("description", "Too long")
        .part("image", png_part());

    let response = app.post_multipart("/", form).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("class=\"errorlist\""));
    assert!(app.images.all().is_empty());
}

#[actix_rt::test]
async fn oversized_image_is_rejected() {
    let app = TestApp::spawn().await;

    let mut content = PNG_BYTES.to_vec();
    content.resize(MAX_UPLOAD_BYTES + 1, 0);
    let part = Part::bytes(content).file_name("big.png").mime_str("image/png").unwrap();
    let form = Form::new()
        .text("name", "Big")
        .text("description", "Too many bytes")
        .part("image", part);

    let response = app.post_multipart("/", form).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("class=\"errorlist\""));
    assert!(app.images.all().is_empty());
}

#[actix_rt::test]
async fn rejected_upload_echoes_input_verbatim() {
    let app = TestApp::spawn().await;

    let empty = Part::bytes(Vec::new()).file_name("").mime_str("application/octet-stream").unwrap();
    let form = Form::new()
        .text("name", "A sleepy cat")
        .text("description", "Curled up <b>tight</b>")
        .part("image", empty);

    let response = app.post_multipart("/", form).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.unwrap();
    assert!(body.contains("value=\"A sleepy cat\""));
    assert!(body.contains(">Curled up &lt;b&gt;tight&lt;/b&gt;</textarea>"));
    assert!(body.contains("<li>No file was submitted.</li>"));
    assert!(app.images.all().is_empty());
}
