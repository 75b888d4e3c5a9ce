use std::sync::Arc;

use pets_service::{api::state::AppState, infrastructure::{database::mongo_context::MongoContext, memory::{seed::seed_sample_data, InMemoryDatabase, InMemoryOwnerRepository, InMemoryPetRepository}, mongodb::{owner_repository::MongoOwnerRepository, pet_repository::MongoPetRepository}}, routes::pet_routes, utils::{apm::ApmLabels, config::AppConfig, logging::init_logging}};
use actix_web::{get, web, App, HttpServer, Responder};


#[get("/")]
async fn entry_point() -> impl Responder {
    "This is the Pets API. Use /owners/{owner_id}/pets/new to add a pet to an owner."
}

async fn build_state(config: &AppConfig) -> Result<AppState, Box<dyn std::error::Error>> {
    match &config.database_url {
        Some(url) => {
            let mongo_context = MongoContext::init(url, &config.database_name).await?;
            Ok(AppState::new(
                Arc::new(MongoPetRepository::new(&mongo_context)),
                Arc::new(MongoOwnerRepository::new(&mongo_context))
            ))
        },
        None => {
            log::warn!("DATABASE_URL not set, using the in-memory store with sample data");
            let db = InMemoryDatabase::new();
            let pets = InMemoryPetRepository::new(db.clone());
            let owners = InMemoryOwnerRepository::new(db);
            seed_sample_data(&pets, &owners).await?;
            Ok(AppState::new(Arc::new(pets), Arc::new(owners)))
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {

    let config = match AppConfig::global() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let _logger = match init_logging(&config.log_level) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = match build_state(config).await {
        Ok(state) => state,
        Err(e) => {
            log::error!("Failed to initialize storage: {}", e);
            std::process::exit(1);
        }
    };

    let apm = ApmLabels::from_config(config);
    if config.apm_enabled {
        log::info!("APM span labels enabled (app: '{}', name: '{}')", config.tag_app_name, config.tag_name);
    }

    log::info!("Server running at http://{}", config.bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .configure(pet_routes(apm.clone()))
            .service(entry_point)
    })
    .bind(&config.bind_address)?
    .run()
    .await
}
