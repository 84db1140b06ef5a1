//! Conversions between storage rows and contract models.

use super::entity;
use crate::contract::Account;
use crate::domain::repository::PasswordReset;

impl From<entity::Model> for Account {
    fn from(model: entity::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            nickname: model.nickname,
            document_number: model.document_number,
            phones: model.phones,
            avatar: model.avatar,
            external_data: model.external_data,
            birthdate: model.birthdate,
            password_hash: model.password,
            is_admin: model.is_admin,
            is_celebrity: model.is_celebrity,
            accept_legal_term: model.accept_legal_term,
            email_verified_at: model.email_verified_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<entity::password_reset::Model> for PasswordReset {
    fn from(model: entity::password_reset::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            token: model.token,
            created_at: model.created_at,
            expire_at: model.expire_at,
        }
    }
}
