use chrono::NaiveDate;

use crate::domain::{Owner, Pet};
use crate::domain::owner::repository::OwnerRepository;
use crate::domain::pet::repository::PetRepository;
use crate::infrastructure::memory::{InMemoryOwnerRepository, InMemoryPetRepository};
use crate::utils::errors::ApiError;

pub const SAMPLE_PET_TYPES: [&str; 6] = ["cat", "dog", "lizard", "snake", "bird", "hamster"];

struct SampleOwner {
    first_name: &'static str,
    last_name: &'static str,
    address: &'static str,
    city: &'static str,
    telephone: &'static str,
    // (name, birth date, type)
    pets: &'static [(&'static str, &'static str, &'static str)],
}

const SAMPLE_OWNERS: [SampleOwner; 4] = [
    SampleOwner {
        first_name: "George",
        last_name: "Franklin",
        address: "110 W. Liberty St.",
        city: "Madison",
        telephone: "6085551023",
        pets: &[("Leo", "2010-09-07", "cat")],
    },
    SampleOwner {
        first_name: "Betty",
        last_name: "Davis",
        address: "638 Cardinal Ave.",
        city: "Sun Prairie",
        telephone: "6085551749",
        pets: &[("Basil", "2012-08-06", "hamster")],
    },
    SampleOwner {
        first_name: "Eduardo",
        last_name: "Rodriquez",
        address: "2693 Commerce St.",
        city: "McFarland",
        telephone: "6085558763",
        pets: &[("Rosy", "2011-04-17", "dog"), ("Jewel", "2010-03-07", "dog")],
    },
    SampleOwner {
        first_name: "Harold",
        last_name: "Davis",
        address: "563 Friendly St.",
        city: "Windsor",
        telephone: "6085553198",
        pets: &[("Iggy", "2010-11-30", "lizard")],
    },
];

/// Fills an empty in-memory store with pet types and a handful of owners.
pub async fn seed_sample_data(
    pets: &InMemoryPetRepository,
    owners: &InMemoryOwnerRepository
) -> Result<(), ApiError> {
    for name in SAMPLE_PET_TYPES {
        pets.add_pet_type(name)?;
    }
    let types = pets.find_pet_types().await?;

    for sample in &SAMPLE_OWNERS {
        let owner = owners.save(Owner {
            id: None,
            first_name: sample.first_name.to_string(),
            last_name: sample.last_name.to_string(),
            address: sample.address.to_string(),
            city: sample.city.to_string(),
            telephone: sample.telephone.to_string(),
            pets: Vec::new(),
        }).await?;

        for (name, birth_date, type_name) in sample.pets {
            let birth_date = birth_date.parse::<NaiveDate>()
                .map_err(|e| ApiError::InternalServerError(format!("Bad sample birth date {}: {}", birth_date, e)))?;
            pets.save(Pet {
                id: None,
                name: name.to_string(),
                birth_date: Some(birth_date),
                pet_type: types.iter().find(|t| t.name == *type_name).cloned(),
                owner_id: owner.id,
            }).await?;
        }

        if let Some(id) = owner.id {
            log::info!("Seeded owner {} {} ({})", owner.first_name, owner.last_name, id.to_hex());
        }
    }
    Ok(())
}
