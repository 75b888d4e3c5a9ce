use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::{Owner, Pet, PetType};
use crate::domain::pet::validator::{BindingResult, PetValidator, TYPE_MISMATCH};

/// Owner fields a client may never set through a form.
pub const OWNER_DISALLOWED_FIELDS: [&str; 1] = ["id"];

pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

/// Copies owner form parameters onto `owner`, skipping disallowed fields.
pub fn bind_owner(owner: &mut Owner, params: &HashMap<String, String>) {
    for (field, value) in params {
        if OWNER_DISALLOWED_FIELDS.contains(&field.as_str()) {
            log::debug!("Ignoring disallowed owner field '{}'", field);
            continue;
        }
        match field.as_str() {
            "firstName" => owner.first_name = value.clone(),
            "lastName" => owner.last_name = value.clone(),
            "address" => owner.address = value.clone(),
            "city" => owner.city = value.clone(),
            "telephone" => owner.telephone = value.clone(),
            _ => {}
        }
    }
}

/// Binds `name`, `birthDate` and `type` onto `pet`, then validates it.
///
/// Only parameters present in the submission are bound. Blank date and type
/// values bind as absent; values that fail to convert are reported as
/// `typeMismatch` and leave the field absent.
pub fn bind_pet(pet: &mut Pet, params: &HashMap<String, String>, types: &[PetType]) -> BindingResult {
    let mut result = BindingResult::new();

    if let Some(name) = params.get("name") {
        pet.name = name.clone();
    }

    if let Some(raw) = params.get("birthDate") {
        let raw = raw.trim();
        pet.birth_date = None;
        if !raw.is_empty() {
            match NaiveDate::parse_from_str(raw, BIRTH_DATE_FORMAT) {
                Ok(date) => pet.birth_date = Some(date),
                Err(_) => result.reject_value(
                    "birthDate",
                    TYPE_MISMATCH,
                    "invalid date, expected YYYY-MM-DD",
                    Some(raw.to_string())
                ),
            }
        }
    }

    if let Some(raw) = params.get("type") {
        pet.pet_type = None;
        if !raw.is_empty() {
            match types.iter().find(|t| t.name == *raw) {
                Some(pet_type) => pet.pet_type = Some(pet_type.clone()),
                None => result.reject_value(
                    "type",
                    TYPE_MISMATCH,
                    &format!("type not found: {}", raw),
                    Some(raw.clone())
                ),
            }
        }
    }

    PetValidator::validate(pet, &mut result);
    result
}
