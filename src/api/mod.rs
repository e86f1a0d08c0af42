use rocket::Route;

mod admin;
mod planner;
mod proposals;
mod voting;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(proposals::routes());
    routes.extend(voting::routes());
    routes.extend(admin::routes());
    routes.extend(planner::routes());
    routes
}
