use serde::Serialize;

use crate::domain::pet::model::Pet;

pub const REQUIRED: &str = "required";
pub const DUPLICATE: &str = "duplicate";
pub const TYPE_MISMATCH: &str = "typeMismatch";

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_value: Option<String>,
}

/// Errors collected while binding and validating one form submission.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct BindingResult {
    pub errors: Vec<FieldError>,
}

impl BindingResult {
    pub fn new() -> Self {
        BindingResult::default()
    }

    pub fn reject_value(&mut self, field: &str, code: &str, message: &str, rejected_value: Option<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            code: code.to_string(),
            message: message.to_string(),
            rejected_value,
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_field_errors(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn field_error(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

pub struct PetValidator;

impl PetValidator {

    /// Required-field rules. Fields that already failed conversion are not
    /// reported twice.
    pub fn validate(pet: &Pet, result: &mut BindingResult) {
        if pet.name.is_empty() && !result.has_field_errors("name") {
            result.reject_value("name", REQUIRED, REQUIRED, None);
        }

        // type is only mandatory when creating
        if pet.is_new() && pet.pet_type.is_none() && !result.has_field_errors("type") {
            result.reject_value("type", REQUIRED, REQUIRED, None);
        }

        if pet.birth_date.is_none() && !result.has_field_errors("birthDate") {
            result.reject_value("birthDate", REQUIRED, REQUIRED, None);
        }
    }
}
