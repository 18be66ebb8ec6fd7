use actix_web::web;

use crate::handlers::gallery;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(gallery::home))
            .route(web::post().to(gallery::upload_image))
    );
}
