//! Chooses which store query answers a filter request.
//!
//! Each criterion is optional. The first matching row of this table wins:
//!
//! | text | stars | year | query               |
//! |------|-------|------|---------------------|
//! | yes  | yes   | yes  | `TextStarsYear`     |
//! | yes  | yes   | -    | `TextStars`         |
//! | yes  | -     | yes  | `TextYear`          |
//! | -    | yes   | yes  | `StarsYear`         |
//! | yes  | -     | -    | `Text`              |
//! | -    | yes   | -    | `Stars`             |
//! | -    | -     | any  | `Year` (fallback)   |
//!
//! With nothing given the fallback still runs, forwarding a null year. The
//! store's `year = NULL` comparison matches no row, so the result is empty.

use tracing::{debug, warn};

use crate::{error::AppResult, models::Movie, store::MovieStore};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MovieFilter {
    TextStarsYear { pattern: String, stars: i32, year: i32 },
    TextStars { pattern: String, stars: i32 },
    TextYear { pattern: String, year: i32 },
    StarsYear { stars: i32, year: i32 },
    Text { pattern: String },
    Stars { stars: i32 },
    Year { year: Option<i32> },
}

impl MovieFilter {
    pub fn select(text: Option<&str>, stars: Option<i32>, year: Option<i32>) -> Self {
        let pattern = text.filter(|t| !t.trim().is_empty()).map(like_pattern);

        match (pattern, stars, year) {
            (Some(pattern), Some(stars), Some(year)) => Self::TextStarsYear { pattern, stars, year },
            (Some(pattern), Some(stars), None) => Self::TextStars { pattern, stars },
            (Some(pattern), None, Some(year)) => Self::TextYear { pattern, year },
            (None, Some(stars), Some(year)) => Self::StarsYear { stars, year },
            (Some(pattern), None, None) => Self::Text { pattern },
            (None, Some(stars), None) => Self::Stars { stars },
            (None, None, year) => Self::Year { year },
        }
    }

    pub async fn run(&self, store: &dyn MovieStore) -> AppResult<Vec<Movie>> {
        debug!(filter = ?self, "running movie filter");

        match self {
            Self::TextStarsYear { pattern, stars, year } => {
                store.filter_text_stars_year(pattern, *stars, *year).await
            },
            Self::TextStars { pattern, stars } => store.filter_text_stars(pattern, *stars).await,
            Self::TextYear { pattern, year } => store.filter_text_year(pattern, *year).await,
            Self::StarsYear { stars, year } => store.filter_stars_year(*stars, *year).await,
            Self::Text { pattern } => store.filter_text(pattern).await,
            Self::Stars { stars } => store.filter_stars(*stars).await,
            Self::Year { year } => {
                if year.is_none() {
                    warn!("filter called without criteria, falling back to a null year");
                }
                store.filter_year(*year).await
            },
        }
    }
}

/// Case-insensitive substring pattern: `"godfather"` becomes `"%GODFATHER%"`.
pub fn like_pattern(text: &str) -> String {
    format!("%{}%", text.to_uppercase())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rstest::rstest;

    use super::*;
    use crate::store::tests::seeded;

    /// Records which query was invoked and with what arguments.
    #[derive(Default)]
    struct RecordingStore {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingStore {
        fn record(&self, call: String) -> AppResult<Vec<Movie>> {
            self.calls.lock().unwrap().push(call);
            Ok(Vec::new())
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MovieStore for RecordingStore {
        async fn find_all(&self) -> AppResult<Vec<Movie>> {
            self.record("find_all".into())
        }

        async fn find_by_id(&self, _id: i32) -> AppResult<Option<Movie>> {
            Ok(None)
        }

        async fn save(&self, movie: Movie) -> AppResult<Movie> {
            Ok(movie)
        }

        async fn delete_by_id(&self, _id: i32) -> AppResult<()> {
            Ok(())
        }

        async fn filter_text_stars_year(&self, pattern: &str, stars: i32, year: i32) -> AppResult<Vec<Movie>> {
            self.record(format!("text_stars_year({pattern},{stars},{year})"))
        }

        async fn filter_text_stars(&self, pattern: &str, stars: i32) -> AppResult<Vec<Movie>> {
            self.record(format!("text_stars({pattern},{stars})"))
        }

        async fn filter_text_year(&self, pattern: &str, year: i32) -> AppResult<Vec<Movie>> {
            self.record(format!("text_year({pattern},{year})"))
        }

        async fn filter_stars_year(&self, stars: i32, year: i32) -> AppResult<Vec<Movie>> {
            self.record(format!("stars_year({stars},{year})"))
        }

        async fn filter_text(&self, pattern: &str) -> AppResult<Vec<Movie>> {
            self.record(format!("text({pattern})"))
        }

        async fn filter_stars(&self, stars: i32) -> AppResult<Vec<Movie>> {
            self.record(format!("stars({stars})"))
        }

        async fn filter_year(&self, year: Option<i32>) -> AppResult<Vec<Movie>> {
            self.record(format!("year({year:?})"))
        }
    }

    #[rstest]
    #[case(Some("kill"), Some(5), Some(2003), "text_stars_year(%KILL%,5,2003)")]
    #[case(Some("kill"), Some(5), None, "text_stars(%KILL%,5)")]
    #[case(Some("kill"), None, Some(2003), "text_year(%KILL%,2003)")]
    #[case(None, Some(5), Some(2003), "stars_year(5,2003)")]
    #[case(Some("kill"), None, None, "text(%KILL%)")]
    #[case(None, Some(5), None, "stars(5)")]
    #[case(None, None, Some(2003), "year(Some(2003))")]
    #[case(None, None, None, "year(None)")]
    #[case(Some("   "), Some(5), None, "stars(5)")]
    #[case(Some(""), None, None, "year(None)")]
    #[case(None, Some(-7), Some(99999), "stars_year(-7,99999)")]
    #[tokio::test]
    async fn dispatches_to_exactly_one_query(
        #[case] text: Option<&str>,
        #[case] stars: Option<i32>,
        #[case] year: Option<i32>,
        #[case] expected: &str,
    ) {
        let store = RecordingStore::default();
        MovieFilter::select(text, stars, year).run(&store).await.unwrap();
        assert_eq!(store.calls(), vec![expected.to_string()]);
    }

    #[test]
    fn pattern_upper_cases_and_wraps() {
        assert_eq!(like_pattern("godfather"), "%GODFATHER%");
        assert_eq!(like_pattern(" Le Mans "), "% LE MANS %");
    }

    #[test]
    fn blank_text_is_not_a_criterion() {
        assert_eq!(MovieFilter::select(Some(" \t"), None, Some(1)), MovieFilter::Year { year: Some(1) });
    }

    #[tokio::test]
    async fn finds_by_case_insensitive_substring() {
        let store = seeded().await;
        store
            .save(Movie { title: Some("The Godfather".into()), ..Default::default() })
            .await
            .unwrap();

        let found = MovieFilter::select(Some("godfather"), None, None).run(&store).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title.as_deref(), Some("The Godfather"));
    }

    #[rstest]
    #[case("amélie", vec![Some(2)])]
    #[case("AMÉLIE", vec![Some(2)])]
    #[case("édith", vec![Some(3)])]
    #[case("Édith", vec![Some(3)])]
    #[tokio::test]
    async fn accented_text_ignores_case(#[case] text: &str, #[case] expected: Vec<Option<i32>>) {
        let store = seeded().await;
        store
            .save(Movie { title: Some("Édith".into()), ..Default::default() })
            .await
            .unwrap();

        let found = MovieFilter::select(Some(text), None, None).run(&store).await.unwrap();
        assert_eq!(found.iter().map(|m| m.id).collect::<Vec<_>>(), expected);
    }

    #[tokio::test]
    async fn seeded_catalog_scenario() {
        let store = seeded().await;

        let by_numbers = MovieFilter::select(None, Some(5), Some(1999)).run(&store).await.unwrap();
        assert_eq!(by_numbers.iter().map(|m| m.id).collect::<Vec<_>>(), vec![Some(1)]);

        let by_text = MovieFilter::select(Some("amelie"), None, None).run(&store).await.unwrap();
        assert_eq!(by_text.iter().map(|m| m.id).collect::<Vec<_>>(), vec![Some(2)]);

        let nothing = MovieFilter::select(None, None, None).run(&store).await.unwrap();
        assert!(nothing.is_empty());
    }
}
