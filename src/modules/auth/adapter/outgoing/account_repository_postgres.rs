use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::domain::entities::{Account, NewAccount};
use crate::auth::application::ports::outgoing::account_repository::{
    AccountRepository, AccountRepositoryError,
};

use super::sea_orm_entity::accounts::{
    ActiveModel as AccountActiveModel, Column, Entity as AccountEntity, Model as AccountModel,
};

const TOKEN_INDEX: &str = "idx_accounts_verification_token";

#[derive(Clone, Debug)]
pub struct AccountRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl AccountRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_to_account(model: AccountModel) -> Account {
        Account {
            id: model.id,
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            profile_picture_path: model.profile_picture_path,
            is_verified: model.is_verified,
            verification_token: model.verification_token,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

/// Unique violations on the email index become `AccountAlreadyExists`.
/// A token collision is not the caller's fault and stays a database error.
fn map_insert_error(e: DbErr) -> AccountRepositoryError {
    let message = e.to_string();

    let unique_violation = matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) || {
        let lowered = message.to_lowercase();
        lowered.contains("23505")
            || lowered.contains("duplicate key")
            || lowered.contains("unique constraint")
    };

    if unique_violation && !message.contains(TOKEN_INDEX) {
        return AccountRepositoryError::AccountAlreadyExists;
    }
    AccountRepositoryError::DatabaseError(message)
}

#[async_trait]
impl AccountRepository for AccountRepositoryPostgres {
    async fn create_account(&self, account: NewAccount) -> Result<Account, AccountRepositoryError> {
        let active_account = AccountActiveModel {
            id: Set(account.id),
            name: Set(account.name),
            email: Set(account.email),
            password_hash: Set(account.password_hash),
            profile_picture_path: Set(account.profile_picture_path),
            is_verified: Set(false),
            verification_token: Set(Some(account.verification_token)),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let inserted = active_account
            .insert(&*self.db)
            .await
            .map_err(map_insert_error)?;

        Ok(Self::map_to_account(inserted))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountRepositoryError> {
        let account = AccountEntity::find()
            .filter(Column::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(|e| AccountRepositoryError::DatabaseError(e.to_string()))?;

        Ok(account.map(Self::map_to_account))
    }

    async fn find_by_email_and_token(
        &self,
        email: &str,
        token: &str,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let account = AccountEntity::find()
            .filter(Column::Email.eq(email))
            .filter(Column::VerificationToken.eq(token))
            .filter(Column::IsVerified.eq(false))
            .one(&*self.db)
            .await
            .map_err(|e| AccountRepositoryError::DatabaseError(e.to_string()))?;

        Ok(account.map(Self::map_to_account))
    }

    async fn mark_verified(
        &self,
        account_id: Uuid,
        token: &str,
    ) -> Result<(), AccountRepositoryError> {
        let result = AccountEntity::update_many()
            .col_expr(Column::IsVerified, Expr::value(true))
            .col_expr(Column::VerificationToken, Expr::value(Option::<String>::None))
            .filter(Column::Id.eq(account_id))
            .filter(Column::VerificationToken.eq(token))
            .filter(Column::IsVerified.eq(false))
            .exec(&*self.db)
            .await
            .map_err(|e| AccountRepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(AccountRepositoryError::AccountNotFound);
        }

        Ok(())
    }
}
