use actix_web::{web, App, HttpServer};
use relay::config::ServerConfig;
use relay::routes;
use relay::state::app_state::AppState;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    let (host, port) = config.bind_addr();

    println!("🚀 Starting chess relay on ws://{}:{}", host, port);

    let app_state = match AppState::start(config) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to start session broker: {e}");
            std::process::exit(1);
        }
    };

    println!("✅ Session broker running");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
