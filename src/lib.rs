#[macro_use]
extern crate rocket;

#[macro_use]
extern crate log;

use rocket::{Build, Rocket};

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod planner;

pub use config::Config;

use config::{ConfigFairing, DatabaseFairing, PlannerFairing};
use logging::LoggerFairing;

/// Construct the rocket instance, wiring up the routes, the config, the
/// database, and the meal-planner collaborator.
pub fn build() -> Rocket<Build> {
    rocket::build()
        .mount("/", api::routes())
        .attach(ConfigFairing)
        .attach(DatabaseFairing)
        .attach(PlannerFairing)
        .attach(LoggerFairing)
}
