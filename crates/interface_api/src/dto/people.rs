//! Person registration DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_person::{Address, PersonInput};

/// Raw form values; the domain normalizes and caps each field
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPersonRequest {
    #[serde(default)]
    #[validate(length(max = 1024))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 64))]
    pub national_id: String,
    #[serde(default)]
    #[validate(length(max = 32))]
    pub birth_date: String,
    #[serde(default)]
    #[validate(length(max = 1024))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 64))]
    pub postal_code: String,
}

impl From<RegisterPersonRequest> for PersonInput {
    fn from(request: RegisterPersonRequest) -> Self {
        PersonInput {
            name: request.name,
            national_id: request.national_id,
            birth_date: request.birth_date,
            email: request.email,
            postal_code: request.postal_code,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub postal_code: String,
    #[serde(flatten)]
    pub address: Address,
    pub address_line: String,
}
