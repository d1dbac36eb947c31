//! User repository implementation.
//!
//! All statements are built by SeaORM and sent with bound parameters.
//! Writes that create rows run inside a transaction that is committed only
//! after the generated identifier has been read back.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::entities::{user, UserActiveModel, UserEntity};
use crate::domain::User;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List every user, ascending by identifier
    async fn list_all(&self) -> AppResult<Vec<User>>;

    /// Find a user by identifier
    async fn get_by_id(&self, id: i64) -> AppResult<User>;

    /// Insert a user and return the store-assigned identifier
    async fn create(&self, name: String, email: String) -> AppResult<i64>;

    /// Replace name and email of an existing user
    async fn update(&self, id: i64, name: String, email: String) -> AppResult<()>;

    /// Permanently delete a user
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of UserRepository over the connection pool
pub struct UserStore {
    db: Arc<DatabaseConnection>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn insert_in(txn: &DatabaseTransaction, name: String, email: String) -> AppResult<i64> {
        let active_model = UserActiveModel {
            id: NotSet,
            name: Set(name),
            email: Set(email),
            created_at: NotSet,
        };

        let result = UserEntity::insert(active_model).exec(txn).await?;
        Ok(result.last_insert_id)
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn list_all(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> AppResult<User> {
        UserEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .map(User::from)
            .ok_or(AppError::NotFound)
    }

    async fn create(&self, name: String, email: String) -> AppResult<i64> {
        let txn = self.db.begin().await?;

        match Self::insert_in(&txn, name, email).await {
            Ok(id) => {
                txn.commit().await?;
                tracing::debug!(user_id = id, "User created");
                Ok(id)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    async fn update(&self, id: i64, name: String, email: String) -> AppResult<()> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::Name, Expr::value(name))
            .col_expr(user::Column::Email, Expr::value(email))
            .filter(user::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id).exec(self.db.as_ref()).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
