use rocket::{serde::json::Json, Route, State};

use crate::error::Result;
use crate::planner::{MealItem, PlannerClient};

pub fn routes() -> Vec<Route> {
    routes![meal_planner]
}

/// Pass-through lookup of the official meal plan for a given day.
#[get("/planner?<year>&<month>&<day>")]
async fn meal_planner(
    year: i32,
    month: u32,
    day: u32,
    planner: &State<PlannerClient>,
) -> Result<Json<Vec<MealItem>>> {
    let meals = planner.lookup_meals(year, month, day).await?;
    Ok(Json(meals))
}
