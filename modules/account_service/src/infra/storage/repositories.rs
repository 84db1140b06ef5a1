//! SeaORM repository implementations.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter,
};
use tracing::error;

use super::entity;
use crate::contract::{Account, AccountError};
use crate::domain::repository::{
    NewUserRecord, PasswordReset, PasswordResetsRepository, UniqueProbe, UserPatchRecord,
    UsersRepository,
};

/// Map a storage failure, folding unique-constraint violations into the same
/// `Conflict` kind the advisory pre-check produces.
fn map_db_err(err: sea_orm::DbErr) -> AccountError {
    if let Some(sea_orm::SqlErr::UniqueConstraintViolation(message)) = err.sql_err() {
        let fields: Vec<String> = ["email", "nickname", "document_number"]
            .iter()
            .filter(|field| message.contains(*field))
            .map(|field| (*field).to_owned())
            .collect();
        return AccountError::Conflict {
            fields: if fields.is_empty() {
                vec!["unique".to_owned()]
            } else {
                fields
            },
        };
    }
    error!(error = %err, "user storage error");
    AccountError::Internal
}

// ===== Users Repository =====

pub struct SeaOrmUsersRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmUsersRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UsersRepository for SeaOrmUsersRepository {
    async fn create(&self, record: NewUserRecord) -> Result<Account, AccountError> {
        let now = Utc::now();
        let active = entity::ActiveModel {
            name: Set(record.name),
            email: Set(record.email),
            nickname: Set(record.nickname),
            document_number: Set(record.document_number),
            phones: Set(record.phones),
            avatar: Set(record.avatar),
            external_data: Set(record.external_data),
            birthdate: Set(record.birthdate),
            password: Set(record.password_hash),
            is_admin: Set(record.is_admin),
            is_celebrity: Set(record.is_celebrity),
            accept_legal_term: Set(record.accept_legal_term),
            email_verified_at: Set(record.email_verified_at),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active.insert(&*self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AccountError> {
        let model = entity::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(model.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let model = entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(model.map(Into::into))
    }

    async fn conflicting_fields(
        &self,
        probe: &UniqueProbe,
        exclude_id: Option<i64>,
    ) -> Result<Vec<String>, AccountError> {
        let mut condition = Condition::any();
        let mut probed = false;
        if let Some(email) = &probe.email {
            condition = condition.add(entity::Column::Email.eq(email));
            probed = true;
        }
        if let Some(nickname) = &probe.nickname {
            condition = condition.add(entity::Column::Nickname.eq(nickname));
            probed = true;
        }
        if let Some(document_number) = &probe.document_number {
            condition = condition.add(entity::Column::DocumentNumber.eq(document_number));
            probed = true;
        }
        if !probed {
            return Ok(Vec::new());
        }

        let mut query = entity::Entity::find().filter(condition);
        if let Some(id) = exclude_id {
            query = query.filter(entity::Column::Id.ne(id));
        }

        let rows = query.all(&*self.db).await.map_err(map_db_err)?;

        let mut fields = Vec::new();
        if let Some(email) = &probe.email {
            if rows.iter().any(|row| &row.email == email) {
                fields.push("email".to_owned());
            }
        }
        if let Some(nickname) = &probe.nickname {
            if rows.iter().any(|row| &row.nickname == nickname) {
                fields.push("nickname".to_owned());
            }
        }
        if let Some(document_number) = &probe.document_number {
            if rows.iter().any(|row| &row.document_number == document_number) {
                fields.push("document_number".to_owned());
            }
        }
        Ok(fields)
    }

    async fn update(
        &self,
        id: i64,
        patch: UserPatchRecord,
    ) -> Result<Option<Account>, AccountError> {
        let Some(model) = entity::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let mut active: entity::ActiveModel = model.into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(email) = patch.email {
            active.email = Set(email);
        }
        if let Some(nickname) = patch.nickname {
            active.nickname = Set(nickname);
        }
        if let Some(document_number) = patch.document_number {
            active.document_number = Set(document_number);
        }
        if let Some(phones) = patch.phones {
            active.phones = Set(Some(phones));
        }
        if let Some(avatar) = patch.avatar {
            active.avatar = Set(Some(avatar));
        }
        if let Some(external_data) = patch.external_data {
            active.external_data = Set(Some(external_data));
        }
        if let Some(birthdate) = patch.birthdate {
            active.birthdate = Set(Some(birthdate));
        }
        if let Some(is_celebrity) = patch.is_celebrity {
            active.is_celebrity = Set(is_celebrity);
        }
        if let Some(accept_legal_term) = patch.accept_legal_term {
            active.accept_legal_term = Set(accept_legal_term);
        }
        if let Some(password_hash) = patch.password_hash {
            active.password = Set(password_hash);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&*self.db).await.map_err(map_db_err)?;
        Ok(Some(model.into()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AccountError> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn mark_email_verified(
        &self,
        id: i64,
        at: DateTime<Utc>,
    ) -> Result<Option<Account>, AccountError> {
        let Some(model) = entity::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let mut active: entity::ActiveModel = model.into();
        active.email_verified_at = Set(Some(at));
        active.updated_at = Set(at);

        let model = active.update(&*self.db).await.map_err(map_db_err)?;
        Ok(Some(model.into()))
    }

    async fn set_password_hash(&self, email: &str, hash: String) -> Result<bool, AccountError> {
        let Some(model) = entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(false);
        };

        let mut active: entity::ActiveModel = model.into();
        active.password = Set(hash);
        active.updated_at = Set(Utc::now());
        active.update(&*self.db).await.map_err(map_db_err)?;
        Ok(true)
    }
}

// ===== Password Resets Repository =====

pub struct SeaOrmPasswordResetsRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmPasswordResetsRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PasswordResetsRepository for SeaOrmPasswordResetsRepository {
    async fn upsert(
        &self,
        email: &str,
        token: &str,
        expire_at: DateTime<Utc>,
    ) -> Result<PasswordReset, AccountError> {
        use entity::password_reset;

        // One live token per email: replace instead of accumulating
        password_reset::Entity::delete_many()
            .filter(password_reset::Column::Email.eq(email))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        let active = password_reset::ActiveModel {
            email: Set(email.to_owned()),
            token: Set(token.to_owned()),
            created_at: Set(Utc::now()),
            expire_at: Set(expire_at),
            ..Default::default()
        };

        let model = active.insert(&*self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn is_valid(
        &self,
        email: &str,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, AccountError> {
        use entity::password_reset;

        let count = password_reset::Entity::find()
            .filter(password_reset::Column::Email.eq(email))
            .filter(password_reset::Column::Token.eq(token))
            .filter(password_reset::Column::ExpireAt.gte(now))
            .count(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(count > 0)
    }

    async fn delete_for_email(&self, email: &str) -> Result<(), AccountError> {
        use entity::password_reset;

        password_reset::Entity::delete_many()
            .filter(password_reset::Column::Email.eq(email))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }
}
