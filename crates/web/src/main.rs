use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;

use config::Config;
use middleware::auth::ApiKeys;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::leaderboard::handlers::get_leaderboard,
        features::entries::handlers::submit_entry,
        features::entries::handlers::validate_entry,
        features::challenges::handlers::validate_challenge_submission,
        features::members::handlers::get_rest_day_stats,
    ),
    components(
        schemas(
            storage::dto::entry::SubmitEntryRequest,
            storage::dto::entry::ValidateEntryRequest,
            storage::dto::entry::ReviewDecision,
            storage::dto::entry::RestDayStats,
            storage::dto::common::DateRange,
            storage::dto::leaderboard::LeaderboardResponse,
            storage::dto::leaderboard::TeamStanding,
            storage::dto::leaderboard::SubTeamStanding,
            storage::dto::leaderboard::IndividualStanding,
            storage::dto::leaderboard::LeaderboardStats,
            storage::models::Entry,
            storage::models::EntryKind,
            storage::models::EntryStatus,
            storage::models::SubmissionReason,
            storage::models::Challenge,
            storage::models::ChallengeScope,
            storage::models::ChallengeSubmission,
            storage::models::League,
            storage::models::Member,
            storage::models::Team,
            storage::models::SubTeam,
        )
    ),
    tags(
        (name = "leaderboard", description = "Ranked standings endpoints"),
        (name = "entries", description = "Workout and rest day submissions"),
        (name = "challenges", description = "Challenge submission review"),
        (name = "members", description = "Member budget endpoints"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting league scoring API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api/leagues", features::leaderboard::routes::routes())
        .nest(
            "/api/entries",
            features::entries::routes::routes(api_keys.clone()),
        )
        .nest(
            "/api/challenge-submissions",
            features::challenges::routes::routes(api_keys),
        )
        .nest("/api/members", features::members::routes::routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(db);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind listener")?;
    axum::serve(listener, app).await?;

    Ok(())
}
