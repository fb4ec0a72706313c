use std::sync::Arc;

use tracing::debug;

use crate::{
    error::{AppError, AppResult},
    filter::MovieFilter,
    merge::merge,
    models::Movie,
    store::MovieStore,
};

#[derive(Clone)]
pub struct MovieCatalog {
    store: Arc<dyn MovieStore>,
}

impl MovieCatalog {
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Movie>> {
        self.store.find_all().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Option<Movie>> {
        self.store.find_by_id(id).await
    }

    pub async fn create(&self, movie: Movie) -> AppResult<Movie> {
        if movie.id.is_some() {
            return Err(AppError::invalid_argument("identity must not be supplied"));
        }

        let saved = self.store.save(movie).await?;
        debug!(id = ?saved.id, "created movie");
        Ok(saved)
    }

    pub async fn update(&self, id: i32, patch: Movie) -> AppResult<Movie> {
        let Some(existing) = self.store.find_by_id(id).await? else {
            return Err(AppError::NotFound(id));
        };

        let merged = merge(id, existing, patch)?;
        debug!(id, "updating movie");
        self.store.save(merged).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        debug!(id, "deleting movie");
        self.store.delete_by_id(id).await
    }

    pub async fn filter(
        &self,
        text: Option<&str>,
        stars: Option<i32>,
        year: Option<i32>,
    ) -> AppResult<Vec<Movie>> {
        MovieFilter::select(text, stars, year).run(self.store.as_ref()).await
    }
}
