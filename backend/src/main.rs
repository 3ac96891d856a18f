mod config;
mod error;
mod identity;
mod policy;
mod services;
mod state;
mod store;

use crate::config::Config;
use crate::error::{json_config, path_config, query_config};
use crate::identity::TokenVerifier;
use crate::state::AppState;
use crate::store::sqlite::SqliteStore;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::load().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let store = if config.database == ":memory:" {
        SqliteStore::open_in_memory()
    } else {
        SqliteStore::open(&config.database)
    };
    let store = Arc::new(store.map_err(io::Error::other)?);
    info!("Using survey database at {}", config.database);

    let state = web::Data::new(AppState {
        surveys: store.clone(),
        responses: store,
    });
    let verifier = web::Data::new(TokenVerifier::new(&config.jwt_secret));
    let json_limit = config.json_limit;

    info!("Server running at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(json_config(json_limit))
            .app_data(query_config())
            .app_data(path_config())
            .app_data(state.clone())
            .app_data(verifier.clone())
            .service(services::surveys::configure_routes())
            .service(services::responses::configure_routes())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
