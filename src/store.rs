use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    Set,
};

use crate::{entities::movie, error::AppResult, models::Movie};

/// Durable keyed storage for movie records.
///
/// Text `pattern`s are passed already upper-cased and wrapped in `%` wildcards.
/// None of the queries impose an ordering.
#[async_trait]
pub trait MovieStore: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Movie>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Movie>>;

    /// Inserts when `movie.id` is unset, otherwise overwrites the row with that id.
    async fn save(&self, movie: Movie) -> AppResult<Movie>;

    /// Deleting an id that does not exist is a no-op.
    async fn delete_by_id(&self, id: i32) -> AppResult<()>;

    async fn filter_text_stars_year(&self, pattern: &str, stars: i32, year: i32) -> AppResult<Vec<Movie>>;

    async fn filter_text_stars(&self, pattern: &str, stars: i32) -> AppResult<Vec<Movie>>;

    async fn filter_text_year(&self, pattern: &str, year: i32) -> AppResult<Vec<Movie>>;

    async fn filter_stars_year(&self, stars: i32, year: i32) -> AppResult<Vec<Movie>>;

    async fn filter_text(&self, pattern: &str) -> AppResult<Vec<Movie>>;

    async fn filter_stars(&self, stars: i32) -> AppResult<Vec<Movie>>;

    /// `None` compares `year = NULL`, which matches nothing.
    async fn filter_year(&self, year: Option<i32>) -> AppResult<Vec<Movie>>;
}

#[derive(Clone)]
pub struct SqlMovieStore {
    db: DatabaseConnection,
}

impl SqlMovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn select(&self, condition: Condition) -> AppResult<Vec<Movie>> {
        let rows = movie::Entity::find().filter(condition).all(&self.db).await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    /// Numeric criteria go to SQL; the text match runs here because SQLite's
    /// `UPPER()` only folds ASCII.
    async fn select_text(&self, pattern: &str, condition: Condition) -> AppResult<Vec<Movie>> {
        let needle = needle(pattern);
        let rows = movie::Entity::find().filter(condition).all(&self.db).await?;
        Ok(rows.into_iter().filter(|m| text_matches(m, needle)).map(Movie::from).collect())
    }
}

fn needle(pattern: &str) -> &str {
    let inner = pattern.strip_prefix('%').unwrap_or(pattern);
    inner.strip_suffix('%').unwrap_or(inner)
}

fn text_matches(m: &movie::Model, needle: &str) -> bool {
    [&m.title, &m.original_title, &m.director, &m.writer, &m.cast, &m.synopsis]
        .into_iter()
        .flatten()
        .any(|value| value.to_uppercase().contains(needle))
}

fn active_model(movie: Movie) -> movie::ActiveModel {
    movie::ActiveModel {
        id: movie.id.map_or(NotSet, Set),
        title: Set(movie.title),
        original_title: Set(movie.original_title),
        director: Set(movie.director),
        writer: Set(movie.writer),
        cast: Set(movie.cast),
        synopsis: Set(movie.synopsis),
        poster_url: Set(movie.poster_url),
        stars: Set(movie.stars),
        year: Set(movie.year),
    }
}

#[async_trait]
impl MovieStore for SqlMovieStore {
    async fn find_all(&self) -> AppResult<Vec<Movie>> {
        self.select(Condition::all()).await
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Movie>> {
        let row = movie::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Movie::from))
    }

    async fn save(&self, movie: Movie) -> AppResult<Movie> {
        let existing = movie.id.is_some();
        let model = active_model(movie);
        let saved = if existing { model.update(&self.db).await? } else { model.insert(&self.db).await? };
        Ok(saved.into())
    }

    async fn delete_by_id(&self, id: i32) -> AppResult<()> {
        movie::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn filter_text_stars_year(&self, pattern: &str, stars: i32, year: i32) -> AppResult<Vec<Movie>> {
        self.select_text(
            pattern,
            Condition::all().add(movie::Column::Stars.eq(stars)).add(movie::Column::Year.eq(year)),
        )
        .await
    }

    async fn filter_text_stars(&self, pattern: &str, stars: i32) -> AppResult<Vec<Movie>> {
        self.select_text(pattern, Condition::all().add(movie::Column::Stars.eq(stars))).await
    }

    async fn filter_text_year(&self, pattern: &str, year: i32) -> AppResult<Vec<Movie>> {
        self.select_text(pattern, Condition::all().add(movie::Column::Year.eq(year))).await
    }

    async fn filter_stars_year(&self, stars: i32, year: i32) -> AppResult<Vec<Movie>> {
        self.select(
            Condition::all().add(movie::Column::Stars.eq(stars)).add(movie::Column::Year.eq(year)),
        )
        .await
    }

    async fn filter_text(&self, pattern: &str) -> AppResult<Vec<Movie>> {
        self.select_text(pattern, Condition::all()).await
    }

    async fn filter_stars(&self, stars: i32) -> AppResult<Vec<Movie>> {
        self.select(Condition::all().add(movie::Column::Stars.eq(stars))).await
    }

    async fn filter_year(&self, year: Option<i32>) -> AppResult<Vec<Movie>> {
        self.select(Condition::all().add(movie::Column::Year.eq(year))).await
    }
}
