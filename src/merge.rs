use crate::{
    error::{AppError, AppResult},
    models::Movie,
};

/// Applies `patch` on top of `existing`, field by field.
///
/// A field set in `patch` replaces the stored value; a missing one leaves it
/// alone, so omission never clears anything. The result always carries
/// `target_id`. The patch itself must not name an identity.
pub fn merge(target_id: i32, existing: Movie, patch: Movie) -> AppResult<Movie> {
    if patch.id.is_some() {
        return Err(AppError::invalid_argument("identity must not be supplied in the update body"));
    }

    let mut merged = existing;
    overlay(&mut merged.title, patch.title);
    overlay(&mut merged.original_title, patch.original_title);
    overlay(&mut merged.director, patch.director);
    overlay(&mut merged.writer, patch.writer);
    overlay(&mut merged.cast, patch.cast);
    overlay(&mut merged.synopsis, patch.synopsis);
    overlay(&mut merged.poster_url, patch.poster_url);
    overlay(&mut merged.stars, patch.stars);
    overlay(&mut merged.year, patch.year);
    merged.id = Some(target_id);

    Ok(merged)
}

fn overlay<T>(slot: &mut Option<T>, value: Option<T>) {
    if let Some(value) = value {
        *slot = Some(value);
    }
}
