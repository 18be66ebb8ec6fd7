use actix_web::web;

use crate::handlers::blog_posts;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/blog")
            .service(
                web::resource("")
                    .route(web::get().to(blog_posts::home))
            )
            .service(
                web::resource("/create")
                    .route(web::get().to(blog_posts::create_post_form))
                    .route(web::post().to(blog_posts::create_post))
            )
            .service(
                web::resource("/edit/{post_id}")
                    .route(web::get().to(blog_posts::edit_post_form))
                    .route(web::post().to(blog_posts::edit_post))
            )
            .service(
                web::resource("/delete/{post_id}")
                    .route(web::get().to(blog_posts::delete_post_confirm))
                    .route(web::post().to(blog_posts::delete_post))
            )
    );
}
