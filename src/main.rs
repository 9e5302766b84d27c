use actix_web::{middleware::Logger, web, App, HttpServer};

mod config;
mod error;
mod routes;
mod store;
mod user;

use config::Config;
use error::StartupError;
use store::UserStore;

async fn serve(config: Config) -> Result<(), StartupError> {
    log::info!("Connecting to database");
    let store = UserStore::connect(&config.database_url, config.max_connections).await?;
    log::info!(
        "Database pool ready (max {} connections)",
        config.max_connections
    );

    let data = web::Data::new(store.clone());
    log::info!(
        "Server is running at http://{}:{}",
        config.host,
        config.port
    );
    let result = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(Logger::default())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await;

    store.close().await;
    result?;
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let outcome = match Config::from_env() {
        Ok(config) => serve(config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = outcome {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
