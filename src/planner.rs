use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single entry from the external meal planner: one meal service on one
/// day, and the dishes it serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealItem {
    /// Date of the meal, formatted `YYYYMMDD` by the planner service.
    pub date: String,
    /// Which meal service this is, using the planner's own label.
    pub meal_type: String,
    /// The dishes served.
    pub items: Vec<String>,
}

/// Errors from a planner lookup.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// The planner service could not be reached or answered abnormally.
    #[error("planner lookup failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Read-only client for the external meal-planner service.
pub struct PlannerClient {
    http: reqwest::Client,
    base_url: String,
}

impl PlannerClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Look up the published meals for the given day.
    ///
    /// This is a pure read against the external service; no proposal state
    /// is involved.
    #[cfg_attr(test, allow(unused_variables, clippy::unused_async))]
    pub async fn lookup_meals(
        &self,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<Vec<MealItem>, PlannerError> {
        let date = format!("{year:04}{month:02}{day:02}");

        // In test mode, return a canned plan instead of doing network I/O.
        #[cfg(test)]
        return Ok(Self::example_meals(&date));

        #[cfg(not(test))]
        {
            let meals = self
                .http
                .get(format!("{}/meals", self.base_url))
                .query(&[("date", date.as_str())])
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            Ok(meals)
        }
    }

    #[cfg(test)]
    fn example_meals(date: &str) -> Vec<MealItem> {
        let meal = |meal_type: &str, items: &[&str]| MealItem {
            date: date.to_string(),
            meal_type: meal_type.to_string(),
            items: items.iter().map(|item| item.to_string()).collect(),
        };
        vec![
            meal("breakfast", &["Millet rice", "Dumpling soup", "Bean sprouts"]),
            meal("lunch", &["Millet rice", "Soybean soup", "Braised pork"]),
            meal("dinner", &["Chicken mayo rice bowl", "Miso soup", "Grilled tofu"]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rocket::async_test]
    async fn lookups_are_keyed_by_zero_padded_date() {
        let planner = PlannerClient::new("http://localhost:0".to_string());
        let meals = planner.lookup_meals(2022, 6, 16).await.unwrap();

        assert_eq!(meals.len(), 3);
        assert!(meals.iter().all(|meal| meal.date == "20220616"));
        assert_eq!(meals[0].meal_type, "breakfast");
    }
}
