mod agents;
mod api;
mod config;
mod database;
mod jobs;
mod middleware;
mod models;
mod seeds;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use agents::AgentRegistry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let database_url = env::var("MONGODB_URI").expect("MONGODB_URI must be set");

    log::info!("🚀 Starting HunterxJobs Service...");
    log::info!("📊 Database: {}", database_url);

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&database_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db.clone());

    log::info!("✅ MongoDB connected successfully");

    // Agent registry shared across workers
    let agents_data = web::Data::new(AgentRegistry::new());

    // 🌱 Seed initial admin account
    seeds::initial_users_seed::seed_initial_admin(&db).await;

    // 📅 Start background jobs
    log::info!("📅 Starting background jobs...");
    jobs::content_scheduler::start_content_scheduler(db.clone()).await;
    log::info!("✅ Background jobs started");

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000") // Next.js frontend
            .allowed_origin("http://localhost:3001")
            .allowed_origin("http://127.0.0.1:3000")
            .allowed_origin(&config::frontend_url())
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .supports_credentials()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .app_data(agents_data.clone())
            .wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(Logger::default())
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone())
            )
            // Health check (root and API level)
            .route("/health", web::get().to(api::health::health_check))
            .route("/healthcheck", web::get().to(api::health::health_check))
            .route("/api/healthcheck", web::get().to(api::health::health_check))
            .route("/", web::get().to(|| async {
                HttpResponse::Ok().json(serde_json::json!({
                    "status": "ok",
                    "message": "HunterXJobs API server is running"
                }))
            }))
            // Auth endpoints (register/login/logout/status are public)
            .service(
                web::scope("/api/auth")
                    .route("/register", web::post().to(api::auth::register))
                    .route("/login", web::post().to(api::auth::login))
                    .route("/logout", web::post().to(api::auth::logout))
                    .route("/status", web::get().to(api::auth::check_status))
                    .service(
                        web::resource("/user")
                            .wrap(middleware::auth::AuthMiddleware)
                            .route(web::get().to(api::auth::get_current_user))
                    )
                    .service(
                        web::resource("/update")
                            .wrap(middleware::auth::AuthMiddleware)
                            .route(web::post().to(api::auth::update_user))
                    )
                    .service(
                        web::resource("/developer")
                            .wrap(middleware::auth::AuthMiddleware)
                            .route(web::post().to(api::auth::create_developer_account))
                    )
            )
            // LinkedIn: OAuth callback is public, the rest requires JWT
            .service(
                web::scope("/api/linkedin")
                    .route("/callback", web::get().to(api::linkedin::callback))
                    .service(
                        web::scope("")
                            .wrap(middleware::auth::AuthMiddleware)
                            .route("/connect", web::get().to(api::linkedin::connect))
                            .route("/status", web::get().to(api::linkedin::status))
                            .route("/profile", web::get().to(api::linkedin::profile))
                            .route("/analyze", web::post().to(api::linkedin::analyze))
                            .route("/post", web::post().to(api::linkedin::post))
                            .route("/disconnect", web::post().to(api::linkedin::disconnect))
                    )
            )
            // Profile analysis
            .service(
                web::scope("/api/profile")
                    .wrap(middleware::auth::AuthMiddleware)
                    .route("/analyze", web::post().to(api::profile::analyze))
                    .route("/optimization-preview", web::post().to(api::profile::optimization_preview))
                    .route("/apply-optimizations", web::post().to(api::profile::apply_optimizations))
                    .route("/industry-benchmarks", web::get().to(api::profile::industry_benchmarks))
            )
            // Optimization suggestions
            .service(
                web::scope("/api/optimization")
                    .wrap(middleware::auth::AuthMiddleware)
                    .route("/suggestions", web::get().to(api::optimization::suggestions))
                    .route("/title", web::get().to(api::optimization::title))
                    .route("/bio", web::get().to(api::optimization::bio))
                    .route("/experience", web::get().to(api::optimization::experience))
                    .route("/skills", web::get().to(api::optimization::skills))
                    .route("/education", web::get().to(api::optimization::education))
                    .route("/apply", web::post().to(api::optimization::apply))
                    .route("/publish", web::post().to(api::optimization::publish))
            )
            // Content generation and scheduling
            .service(
                web::scope("/api/content")
                    .wrap(middleware::auth::AuthMiddleware)
                    .route("/generate", web::post().to(api::content::generate))
                    .route("/personas", web::get().to(api::content::personas))
                    .route("/templates", web::get().to(api::content::templates))
                    .route("/analyze", web::post().to(api::content::analyze))
                    .route("/hashtags", web::get().to(api::content::hashtags))
                    .route("/schedule", web::post().to(api::content::schedule))
                    .route("/scheduled", web::get().to(api::content::scheduled))
                    .route("/scheduled/{id}", web::delete().to(api::content::delete_scheduled))
            )
            // Dashboard metrics
            .service(
                web::scope("/api/metrics")
                    .wrap(middleware::auth::AuthMiddleware)
                    .route("/dashboard", web::get().to(api::metrics::dashboard))
                    .route("/profile-visibility", web::get().to(api::metrics::profile_visibility))
                    .route("/opportunity-flow", web::get().to(api::metrics::opportunity_flow))
                    .route("/content-amplification", web::get().to(api::metrics::content_amplification))
                    .route("/career-momentum", web::get().to(api::metrics::career_momentum))
                    .route("/profile-views", web::get().to(api::metrics::profile_views))
                    .route("/content-performance", web::get().to(api::metrics::content_performance))
                    .route("/export", web::get().to(api::metrics::export))
            )
            // Agent console
            .service(
                web::scope("/api/agent")
                    .wrap(middleware::auth::AuthMiddleware)
                    .route("/analyze", web::post().to(api::agent::analyze))
                    .route("/status", web::get().to(api::agent::status))
                    .route("/generate-code", web::post().to(api::agent::generate_code))
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
