use actix_web::web;

use crate::ws::session::upgrade;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Players connect to the bare root path.
    cfg.route("/", web::get().to(upgrade));
}
