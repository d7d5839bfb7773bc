//! SeaORM implementation of TrackRepository

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::domain::{DomainError, TrackFilter, TrackInput, TrackRepository};
use crate::models::Track;
use crate::models::like::{Column as LikeColumn, Entity as LikeEntity};
use crate::models::track::{ActiveModel, Column, Entity as TrackEntity};

/// SeaORM-based implementation of TrackRepository
pub struct SeaOrmTrackRepository {
    db: DatabaseConnection,
}

impl SeaOrmTrackRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Escape LIKE wildcards so the term matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `column LIKE %term%`. SQLite's LIKE folds ASCII case only; other
/// characters match as typed.
fn contains_ci(column: Column, term: &str) -> sea_orm::sea_query::SimpleExpr {
    let pattern = format!("%{}%", escape_like(term));
    Expr::col(column).like(LikeExpr::new(pattern).escape('\\'))
}

#[async_trait]
impl TrackRepository for SeaOrmTrackRepository {
    async fn find_all(&self, filter: TrackFilter) -> Result<Vec<Track>, DomainError> {
        let mut query = TrackEntity::find();

        if let Some(term) = filter.term() {
            let cond = Condition::any()
                .add(contains_ci(Column::Title, term))
                .add(contains_ci(Column::Description, term));
            query = query.filter(cond);
        }

        let tracks = query
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(tracks.into_iter().map(Track::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Track>, DomainError> {
        let track = TrackEntity::find_by_id(id).one(&self.db).await?;
        Ok(track.map(Track::from))
    }

    async fn find_by_owner(&self, user_id: i32) -> Result<Vec<Track>, DomainError> {
        let tracks = TrackEntity::find()
            .filter(Column::PostedBy.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(tracks.into_iter().map(Track::from).collect())
    }

    async fn get_or_create(
        &self,
        input: TrackInput,
        owner: Option<i32>,
    ) -> Result<(Track, bool), DomainError> {
        let owner_cond = match owner {
            Some(user_id) => Column::PostedBy.eq(user_id),
            None => Column::PostedBy.is_null(),
        };

        let existing = TrackEntity::find()
            .filter(Column::Title.eq(input.title.as_str()))
            .filter(Column::Description.eq(input.description.as_str()))
            .filter(Column::Url.eq(input.url.as_str()))
            .filter(owner_cond)
            .one(&self.db)
            .await?;

        if let Some(model) = existing {
            return Ok((Track::from(model), false));
        }

        let new_track = ActiveModel {
            title: Set(input.title),
            description: Set(input.description),
            url: Set(input.url),
            posted_by: Set(owner),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let result = new_track.insert(&self.db).await?;
        Ok((Track::from(result), true))
    }

    async fn update(&self, id: i32, input: TrackInput) -> Result<Track, DomainError> {
        let existing = TrackEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound("Track"))?;

        let mut active: ActiveModel = existing.into();
        active.title = Set(input.title);
        active.description = Set(input.description);
        active.url = Set(input.url);

        let result = active.update(&self.db).await?;
        Ok(Track::from(result))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        LikeEntity::delete_many()
            .filter(LikeColumn::TrackId.eq(id))
            .exec(&txn)
            .await?;
        let result = TrackEntity::delete_by_id(id).exec(&txn).await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(DomainError::NotFound("Track"));
        }

        txn.commit().await?;
        Ok(())
    }
}
