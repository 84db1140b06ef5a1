//! Conversions between storage rows and contract models.

use anyhow::{bail, Result};

use super::entity;
use crate::contract::{Address, OwnerRef};

/// Convert a stored row into the contract model.
///
/// # Errors
/// Fails on a discriminator value no owner type claims; such a row can only
/// come from out-of-band writes, since every repository query is scoped by a
/// known tag.
pub fn into_address(model: entity::Model) -> Result<Address> {
    let Some(owner) = OwnerRef::from_parts(&model.discriminator, model.parent_id) else {
        bail!("unknown address discriminator: {}", model.discriminator);
    };

    Ok(Address {
        id: model.id,
        name: model.name,
        is_default: model.is_default,
        street: model.street,
        neighborhood: model.neighborhood,
        city: model.city,
        postcode: model.postcode,
        state: model.state,
        number: model.number,
        complement: model.complement,
        lat: model.lat,
        lng: model.lng,
        owner,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
