use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
    sea_query::Expr,
};
use thiserror::Error;
use tracing::debug;

use crate::{entities::movie, models::MovieInput};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("imdbID {0} is already taken")]
    Duplicate(String),

    #[error(transparent)]
    Db(#[from] DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Access to the `movies` table. Cloning shares the underlying connection pool.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    #[cfg(test)]
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn list(&self, year: Option<i32>) -> StoreResult<Vec<movie::Model>> {
        let mut query = movie::Entity::find();
        if let Some(year) = year {
            query = query.filter(movie::Column::Year.eq(year));
        }

        let movies = query.order_by_asc(movie::Column::Id).all(&self.db).await?;
        debug!(?year, count = movies.len(), "listed movies");
        Ok(movies)
    }

    pub async fn get(&self, imdb_id: &str) -> StoreResult<Option<movie::Model>> {
        let movie = movie::Entity::find()
            .filter(movie::Column::ImdbId.eq(imdb_id))
            .one(&self.db)
            .await?;
        Ok(movie)
    }

    pub async fn create(&self, input: &MovieInput) -> StoreResult<movie::Model> {
        let model = movie::ActiveModel {
            id: Default::default(),
            imdb_id: Set(input.imdb_id.clone()),
            title: Set(input.title.clone()),
            year: Set(input.year),
            rating: Set(input.rating),
            is_superhero: Set(input.is_superhero),
        };

        let inserted = match movie::Entity::insert(model).exec(&self.db).await {
            Ok(res) => res,
            Err(err) if is_unique_violation(&err) => {
                return Err(StoreError::Duplicate(input.imdb_id.clone()));
            },
            Err(err) => return Err(err.into()),
        };

        debug!(id = inserted.last_insert_id, imdb_id = %input.imdb_id, "inserted movie");
        Ok(movie::Model {
            id: inserted.last_insert_id,
            imdb_id: input.imdb_id.clone(),
            title: input.title.clone(),
            year: input.year,
            rating: input.rating,
            is_superhero: input.is_superhero,
        })
    }

    /// Rewrites the mutable columns of the row keyed by `input.imdb_id`.
    /// Returns `None` when no such row exists.
    pub async fn update(&self, input: &MovieInput) -> StoreResult<Option<movie::Model>> {
        let res = movie::Entity::update_many()
            .col_expr(movie::Column::Title, Expr::value(input.title.clone()))
            .col_expr(movie::Column::Year, Expr::value(input.year))
            .col_expr(movie::Column::Rating, Expr::value(input.rating))
            .col_expr(movie::Column::IsSuperhero, Expr::value(input.is_superhero))
            .filter(movie::Column::ImdbId.eq(input.imdb_id.as_str()))
            .exec(&self.db)
            .await?;

        debug!(imdb_id = %input.imdb_id, rows = res.rows_affected, "updated movie");
        if res.rows_affected == 0 {
            return Ok(None);
        }
        self.get(&input.imdb_id).await
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
