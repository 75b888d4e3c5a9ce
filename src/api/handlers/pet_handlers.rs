use std::collections::HashMap;

use actix_web::{http::header, web, HttpResponse};
use mongodb::bson::oid::ObjectId;

use crate::{api::{controllers::pet_controller::{PetView, VIEWS_PETS_CREATE_OR_UPDATE_FORM}, state::AppState}, domain::{Owner, Pet, PetType}, utils::errors::ApiError};

fn parse_id(raw: &str, what: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw)
        .map_err(|_| ApiError::BadRequest(format!("Invalid {} id: {}", what, raw)))
}

fn render(view: PetView, owner: &Owner, types: &[PetType]) -> HttpResponse {
    match view {
        PetView::Form { pet, errors } => {
            HttpResponse::Ok().json(serde_json::json!({
                "view": VIEWS_PETS_CREATE_OR_UPDATE_FORM,
                "model": {
                    "owner": owner,
                    "pet": pet,
                    "types": types,
                    "errors": errors
                }
            }))
        },
        PetView::Redirect(location) => {
            HttpResponse::Found()
                .insert_header((header::LOCATION, location))
                .finish()
        }
    }
}

pub async fn init_creation_form(
    state: web::Data<AppState>,
    path: web::Path<String>
) -> Result<HttpResponse, ApiError> {
    let controller = state.pet_controller();
    let owner_id = parse_id(&path.into_inner(), "owner")?;

    let mut owner = controller.load_owner(owner_id).await?;
    let types = controller.load_pet_types().await?;

    let view = controller.show_create_form(&mut owner);
    Ok(render(view, &owner, &types))
}

pub async fn process_creation_form(
    state: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Form<HashMap<String, String>>
) -> Result<HttpResponse, ApiError> {
    let controller = state.pet_controller();
    let owner_id = parse_id(&path.into_inner(), "owner")?;
    let params = form.into_inner();

    let mut owner = controller.load_owner(owner_id).await?;
    let types = controller.load_pet_types().await?;
    controller.bind_owner_input(&mut owner, &params);

    let mut pet = Pet::new();
    let result = controller.bind_pet_input(&mut pet, &params, &types);

    let view = controller.submit_create_form(&mut owner, pet, result).await?;
    Ok(render(view, &owner, &types))
}

pub async fn init_update_form(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>
) -> Result<HttpResponse, ApiError> {
    let controller = state.pet_controller();
    let (owner_id, pet_id) = path.into_inner();
    let owner_id = parse_id(&owner_id, "owner")?;
    let pet_id = parse_id(&pet_id, "pet")?;

    let owner = controller.load_owner(owner_id).await?;
    let types = controller.load_pet_types().await?;

    let view = controller.show_edit_form(pet_id).await?;
    Ok(render(view, &owner, &types))
}

pub async fn process_update_form(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    form: web::Form<HashMap<String, String>>
) -> Result<HttpResponse, ApiError> {
    let controller = state.pet_controller();
    let (owner_id, pet_id) = path.into_inner();
    let owner_id = parse_id(&owner_id, "owner")?;
    let pet_id = parse_id(&pet_id, "pet")?;
    let params = form.into_inner();

    let mut owner = controller.load_owner(owner_id).await?;
    let types = controller.load_pet_types().await?;
    controller.bind_owner_input(&mut owner, &params);

    // bind onto the stored pet: fields missing from the form keep their values
    // and the identity stays the one named by the path
    let mut pet = controller.load_pet(pet_id).await?;
    let result = controller.bind_pet_input(&mut pet, &params, &types);

    let view = controller.submit_edit_form(pet, result, &mut owner).await?;
    Ok(render(view, &owner, &types))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use actix_web::{http::StatusCode, test, App};
    use chrono::NaiveDate;
    use serde_json::Value;

    use crate::api::state::AppState;
    use crate::domain::owner::repository::OwnerRepository;
    use crate::domain::pet::repository::PetRepository;
    use crate::infrastructure::memory::{InMemoryDatabase, InMemoryOwnerRepository, InMemoryPetRepository};
    use crate::routes::pet_routes;
    use crate::utils::apm::ApmLabels;

    async fn seeded_state() -> (AppState, ObjectId, ObjectId) {
        let db = InMemoryDatabase::new();
        let pets = InMemoryPetRepository::new(db.clone());
        let owners = InMemoryOwnerRepository::new(db);

        let dog = pets.add_pet_type("dog").unwrap();
        pets.add_pet_type("cat").unwrap();
        let owner = owners.save(Owner {
            first_name: "Jean".to_string(),
            last_name: "Coleman".to_string(),
            ..Owner::default()
        }).await.unwrap();
        let rex = pets.save(Pet {
            name: "Rex".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2012, 9, 4),
            pet_type: Some(dog),
            owner_id: owner.id,
            ..Pet::new()
        }).await.unwrap();

        let state = AppState::new(Arc::new(pets), Arc::new(owners));
        (state, owner.id.unwrap(), rex.id.unwrap())
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state.clone()))
                    .configure(pet_routes(ApmLabels::disabled()))
            ).await
        };
    }

    #[actix_web::test]
    async fn test_get_new_pet_form() {
        let (state, owner_id, _) = seeded_state().await;
        let app = app!(state);

        let req = test::TestRequest::get()
            .uri(&format!("/owners/{}/pets/new", owner_id.to_hex()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["view"], "pets/createOrUpdatePetForm");
        assert_eq!(body["model"]["owner"]["first_name"], "Jean");
        assert_eq!(body["model"]["pet"]["name"], "");
        assert_eq!(body["model"]["types"].as_array().unwrap().len(), 2);
        assert_eq!(body["model"]["errors"].as_array().unwrap().len(), 0);
    }

    #[actix_web::test]
    async fn test_post_new_pet_redirects_to_owner() {
        let (state, owner_id, _) = seeded_state().await;
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri(&format!("/owners/{}/pets/new", owner_id.to_hex()))
            .set_form([("name", "Max"), ("birthDate", "2021-03-04"), ("type", "cat")])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap();
        assert_eq!(location, format!("/owners/{}", owner_id.to_hex()));

        let owner = state.owners.find_by_id(owner_id).await.unwrap().unwrap();
        assert!(owner.get_pet("Max", true).is_some());
    }

    #[actix_web::test]
    async fn test_post_duplicate_pet_redisplays_form() {
        let (state, owner_id, _) = seeded_state().await;
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri(&format!("/owners/{}/pets/new", owner_id.to_hex()))
            .set_form([("name", "Rex"), ("birthDate", "2021-03-04"), ("type", "dog")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["model"]["errors"][0]["field"], "name");
        assert_eq!(body["model"]["errors"][0]["code"], "duplicate");
        assert_eq!(body["model"]["pet"]["name"], "Rex");

        let owner = state.owners.find_by_id(owner_id).await.unwrap().unwrap();
        assert_eq!(owner.pets.len(), 1);
    }

    #[actix_web::test]
    async fn test_post_edit_updates_pet_named_by_path() {
        let (state, owner_id, rex_id) = seeded_state().await;
        let app = app!(state);
        let spoofed = ObjectId::new().to_hex();

        let req = test::TestRequest::post()
            .uri(&format!("/owners/{}/pets/{}/edit", owner_id.to_hex(), rex_id.to_hex()))
            .set_form([("id", spoofed.as_str()), ("name", "Rexford"), ("birthDate", "2012-09-04"), ("type", "dog")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);

        let rex = state.pets.find_by_id(rex_id).await.unwrap().unwrap();
        assert_eq!(rex.name, "Rexford");
        assert!(state.pets.find_by_id(ObjectId::parse_str(&spoofed).unwrap()).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_post_invalid_edit_keeps_submitted_values() {
        let (state, owner_id, rex_id) = seeded_state().await;
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri(&format!("/owners/{}/pets/{}/edit", owner_id.to_hex(), rex_id.to_hex()))
            .set_form([("name", ""), ("birthDate", "2013-01-01"), ("type", "dog")])
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["model"]["errors"][0]["field"], "name");
        assert_eq!(body["model"]["pet"]["birth_date"], "2013-01-01");

        let rex = state.pets.find_by_id(rex_id).await.unwrap().unwrap();
        assert_eq!(rex.name, "Rex");
    }

    #[actix_web::test]
    async fn test_post_edit_of_unknown_pet_is_not_found() {
        let (state, owner_id, _) = seeded_state().await;
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri(&format!("/owners/{}/pets/{}/edit", owner_id.to_hex(), ObjectId::new().to_hex()))
            .set_form([("name", "Rex"), ("birthDate", "2020-01-01"), ("type", "dog")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let owner = state.owners.find_by_id(owner_id).await.unwrap().unwrap();
        let names: Vec<&str> = owner.pets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Rex"]);
    }

    #[actix_web::test]
    async fn test_post_partial_edit_keeps_stored_type() {
        let (state, owner_id, rex_id) = seeded_state().await;
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri(&format!("/owners/{}/pets/{}/edit", owner_id.to_hex(), rex_id.to_hex()))
            .set_form([("name", "Rexford"), ("birthDate", "2012-09-04")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);

        let rex = state.pets.find_by_id(rex_id).await.unwrap().unwrap();
        assert_eq!(rex.name, "Rexford");
        assert_eq!(rex.pet_type.map(|t| t.name).as_deref(), Some("dog"));
        assert_eq!(rex.owner_id, Some(owner_id));
    }

    #[actix_web::test]
    async fn test_get_edit_form_for_existing_pet() {
        let (state, owner_id, rex_id) = seeded_state().await;
        let app = app!(state);

        let req = test::TestRequest::get()
            .uri(&format!("/owners/{}/pets/{}/edit", owner_id.to_hex(), rex_id.to_hex()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["model"]["pet"]["name"], "Rex");
        assert_eq!(body["model"]["pet"]["type"]["name"], "dog");
    }

    #[actix_web::test]
    async fn test_unknown_owner_and_pet_are_not_found() {
        let (state, owner_id, _) = seeded_state().await;
        let app = app!(state);

        let req = test::TestRequest::get()
            .uri(&format!("/owners/{}/pets/new", ObjectId::new().to_hex()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri(&format!("/owners/{}/pets/{}/edit", owner_id.to_hex(), ObjectId::new().to_hex()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_malformed_owner_id_is_bad_request() {
        let (state, _, _) = seeded_state().await;
        let app = app!(state);

        let req = test::TestRequest::get()
            .uri("/owners/not-an-id/pets/new")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }
}
