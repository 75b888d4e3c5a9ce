use actix_web::web;

use crate::utils::apm::ApmLabels;
use crate::api::handlers::pet_handlers::{init_creation_form, init_update_form, process_creation_form, process_update_form};

pub fn pet_routes(apm: ApmLabels) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.service(
            web::scope("/owners/{owner_id}/pets")
                .wrap(apm)
                .service(
                    web::resource("/new")
                        .route(web::get().to(init_creation_form))
                        .route(web::post().to(process_creation_form))
                )
                .service(
                    web::resource("/{pet_id}/edit")
                        .route(web::get().to(init_update_form))
                        .route(web::post().to(process_update_form))
                )
        );
    }
}
