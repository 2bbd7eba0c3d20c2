use anyhow::Context;
use rocket::fairing::AdHoc;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{catch, catchers, routes, Build, Request, Rocket};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod database;
mod leaderboard;

use config::Config;
use database::{requests, ErrorBody, ScoreStore};

#[rocket::main]
async fn main() {
    initialize_logging();

    if let Err(error) = run().await {
        error!("{:#}", error);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;

    // Connect to the database
    let store = ScoreStore::open(&config.database_path)
        .await
        .with_context(|| {
            format!(
                "failed to open the score database at {}",
                config.database_path.display()
            )
        })?;

    // Build and launch the rocket
    rocket(store, &config)
        .launch()
        .await
        .map_err(|error| anyhow::anyhow!("failed to launch the server: {}", error.kind()))?;

    info!("Goodbye!");
    Ok(())
}

fn initialize_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub fn rocket(store: ScoreStore, config: &Config) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("address", config.address))
        .merge(("port", config.port));

    rocket::custom(figment)
        .mount("/", routes![requests::index])
        .mount(
            "/level",
            routes![requests::create_score, requests::list_scores],
        )
        .register("/", catchers![default_catcher])
        .attach(request_logger())
        .attach(AdHoc::on_shutdown("Score Database", |rocket| {
            Box::pin(async move {
                if let Some(store) = rocket.state::<ScoreStore>() {
                    store.close().await;
                }
            })
        }))
        .manage(store)
}

fn request_logger() -> AdHoc {
    AdHoc::on_response("Request Logger", |request, response| {
        Box::pin(async move {
            info!(
                method = %request.method(),
                uri = %request.uri(),
                status = response.status().code,
                "handled request"
            );
        })
    })
}

/// Renders every error Rocket produces on its own (unknown route, oversized body, ...)
/// with the same JSON body the handlers use.
#[catch(default)]
fn default_catcher(status: Status, request: &Request<'_>) -> (Status, Json<ErrorBody>) {
    let message = format!("{}: {}", status.reason_lossy().to_lowercase(), request.uri());
    (status, Json(ErrorBody::new(message)))
}
