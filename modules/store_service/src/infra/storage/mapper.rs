//! Conversions between storage rows and contract models.

use anyhow::{bail, Result};

use super::entity;
use crate::contract::{DocumentType, Segment, Store, StorePerson};

impl From<entity::segment::Model> for Segment {
    fn from(model: entity::segment::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            is_active: model.is_active,
            image: model.image,
            color: model.color,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert a stored store row into the contract model.
///
/// # Errors
/// Fails on a document type outside the closed `cpf`/`cnpj` set; the write
/// path only ever stores those two.
pub fn into_store(model: entity::store::Model) -> Result<Store> {
    let Some(document_type) = DocumentType::parse(&model.document_type) else {
        bail!("unknown store document type: {}", model.document_type);
    };

    Ok(Store {
        id: model.id,
        title: model.title,
        legal: model.legal,
        phones: model.phones,
        information: model.information,
        external_data: model.external_data,
        automatic_accept: model.automatic_accept,
        is_active: model.is_active,
        document_type,
        document_number: model.document_number,
        approved_at: model.approved_at,
        segment_id: model.segment_id,
        image: model.image,
        background_image: model.background_image,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

impl From<entity::person::Model> for StorePerson {
    fn from(model: entity::person::Model) -> Self {
        Self {
            id: model.id,
            store_id: model.store_id,
            user_id: model.user_id,
            is_owner: model.is_owner,
            is_staff: model.is_staff,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
