//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{DomainError, NewUser, UserCredentials, UserRepository};
use crate::models::User;
use crate::models::user::{ActiveModel, Column, Entity as UserEntity};

/// SeaORM-based implementation of UserRepository
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let users = UserEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(users.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        let user = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(user.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .find_credentials(username)
            .await?
            .map(|credentials| credentials.user))
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        let user = UserEntity::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await?;

        Ok(user.map(|model| UserCredentials {
            password_hash: model.password_hash.clone(),
            user: User::from(model),
        }))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, DomainError> {
        if self.find_credentials(&new_user.username).await?.is_some() {
            return Err(duplicate_username());
        }

        let username = new_user.username.clone();
        let user = ActiveModel {
            username: Set(new_user.username),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            date_joined: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        match user.insert(&self.db).await {
            Ok(model) => Ok(User::from(model)),
            // A concurrent create won the UNIQUE(username) race
            Err(e) => match self.find_credentials(&username).await? {
                Some(_) => Err(duplicate_username()),
                None => Err(e.into()),
            },
        }
    }
}

fn duplicate_username() -> DomainError {
    DomainError::Validation("A user with that username already exists.".to_string())
}
