//! Mapper implementations for converting between DTOs and contract models.

use mercato_query::Page;

use super::dto::*;
use crate::contract::{
    DocumentType, NewSegment, NewStore, Segment, SegmentPatch, Store, StoreError, StorePatch,
};

// ===== Segment conversions =====

impl From<Segment> for SegmentDto {
    fn from(segment: Segment) -> Self {
        Self {
            id: segment.id,
            title: segment.title,
            is_active: segment.is_active,
            image: segment.image,
            color: segment.color,
            created_at: segment.created_at,
            updated_at: segment.updated_at,
        }
    }
}

impl From<SegmentCreateRequest> for NewSegment {
    fn from(req: SegmentCreateRequest) -> Self {
        Self {
            title: req.title,
            is_active: req.is_active,
            image: req.image,
            color: req.color,
        }
    }
}

impl From<SegmentUpdateRequest> for SegmentPatch {
    fn from(req: SegmentUpdateRequest) -> Self {
        Self {
            title: req.title,
            is_active: req.is_active,
            image: req.image,
            color: req.color,
        }
    }
}

impl From<Page<Segment>> for SegmentPageDto {
    fn from(page: Page<Segment>) -> Self {
        Self {
            items: page.items.into_iter().map(Into::into).collect(),
            per_page: page.per_page,
            num_pages: page.num_pages,
            page: page.page,
            total: page.total,
        }
    }
}

// ===== Store conversions =====

impl From<Store> for StoreDto {
    fn from(store: Store) -> Self {
        Self {
            id: store.id,
            title: store.title,
            legal: store.legal,
            phones: store.phones,
            information: store.information,
            automatic_accept: store.automatic_accept,
            is_active: store.is_active,
            document_type: store.document_type.as_str().to_owned(),
            document_number: store.document_number,
            approved_at: store.approved_at,
            segment_id: store.segment_id,
            image: store.image,
            background_image: store.background_image,
            created_at: store.created_at,
            updated_at: store.updated_at,
        }
    }
}

fn parse_document_type(raw: &str) -> Result<DocumentType, StoreError> {
    DocumentType::parse(raw).ok_or_else(|| StoreError::Validation {
        message: format!("document_type must be `cpf` or `cnpj`, got `{raw}`"),
    })
}

impl TryFrom<StoreCreateRequest> for NewStore {
    type Error = StoreError;

    fn try_from(req: StoreCreateRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            title: req.title,
            legal: req.legal,
            phones: req.phones,
            information: req.information,
            automatic_accept: req.automatic_accept,
            document_type: parse_document_type(&req.document_type)?,
            document_number: req.document_number,
            segment_id: req.segment_id,
            image: req.image,
            background_image: req.background_image,
            addresses: req.addresses.into_iter().map(Into::into).collect(),
        })
    }
}

impl TryFrom<StoreUpdateRequest> for StorePatch {
    type Error = StoreError;

    fn try_from(req: StoreUpdateRequest) -> Result<Self, Self::Error> {
        let document_type = match req.document_type.as_deref() {
            Some(raw) => Some(parse_document_type(raw)?),
            None => None,
        };

        Ok(Self {
            title: req.title,
            legal: req.legal,
            phones: req.phones,
            information: req.information,
            automatic_accept: req.automatic_accept,
            is_active: req.is_active,
            document_type,
            document_number: req.document_number,
            segment_id: req.segment_id,
            image: req.image,
            background_image: req.background_image,
        })
    }
}

impl From<Page<Store>> for StorePageDto {
    fn from(page: Page<Store>) -> Self {
        Self {
            items: page.items.into_iter().map(Into::into).collect(),
            per_page: page.per_page,
            num_pages: page.num_pages,
            page: page.page,
            total: page.total,
        }
    }
}
