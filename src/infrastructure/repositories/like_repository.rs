//! SeaORM implementation of LikeRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{DomainError, LikeRepository};
use crate::models::Like;
use crate::models::like::{ActiveModel, Column, Entity as LikeEntity};

/// SeaORM-based implementation of LikeRepository
pub struct SeaOrmLikeRepository {
    db: DatabaseConnection,
}

impl SeaOrmLikeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_pair(&self, user_id: i32, track_id: i32) -> Result<Option<Like>, DomainError> {
        let like = LikeEntity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::TrackId.eq(track_id))
            .one(&self.db)
            .await?;
        Ok(like.map(Like::from))
    }
}

#[async_trait]
impl LikeRepository for SeaOrmLikeRepository {
    async fn find_all(&self) -> Result<Vec<Like>, DomainError> {
        let likes = LikeEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(likes.into_iter().map(Like::from).collect())
    }

    async fn find_by_track(&self, track_id: i32) -> Result<Vec<Like>, DomainError> {
        let likes = LikeEntity::find()
            .filter(Column::TrackId.eq(track_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(likes.into_iter().map(Like::from).collect())
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Like>, DomainError> {
        let likes = LikeEntity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(likes.into_iter().map(Like::from).collect())
    }

    async fn count_by_track(&self, track_id: i32) -> Result<u64, DomainError> {
        let count = LikeEntity::find()
            .filter(Column::TrackId.eq(track_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn get_or_create(
        &self,
        user_id: i32,
        track_id: i32,
    ) -> Result<(Like, bool), DomainError> {
        if let Some(existing) = self.find_pair(user_id, track_id).await? {
            return Ok((existing, false));
        }

        let like = ActiveModel {
            user_id: Set(user_id),
            track_id: Set(track_id),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        match like.insert(&self.db).await {
            Ok(model) => Ok((Like::from(model), true)),
            // A concurrent request may have won the UNIQUE(user_id, track_id) race
            Err(e) => match self.find_pair(user_id, track_id).await? {
                Some(existing) => Ok((existing, false)),
                None => Err(e.into()),
            },
        }
    }
}
