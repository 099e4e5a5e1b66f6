//! Main entry point for the ad-slot marketplace backend server.
//! This crate provides the REST API and serves the frontend application.

use actix_files::Files;
use actix_web::{App, HttpResponse, HttpServer, middleware::Logger, web};
use auth_services::middleware::AuthMiddleware;
use notification_services::NotificationService;
use postgres::database::*;
use std::path::Path;
use web_handlers::*;

mod sync_manager;
use sync_manager::SyncManager;

fn get_frontend_path() -> &'static str {
    // Check multiple possible locations for frontend files
    if Path::new("./frontend-build").exists() {
        log::info!("Using Docker frontend path: ./frontend-build");
        "./frontend-build"
    } else if Path::new("../frontend/build").exists() {
        log::info!("Using local frontend path: ../frontend/build");
        "../frontend/build"
    } else {
        log::info!("Frontend files not found in either location");
        "./frontend-build" // fallback
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    log::info!("Starting ad-slot marketplace server...");

    // Create database connection pool
    let pool = match create_connection_pool().await {
        Ok(pool) => {
            log::info!("Database pool created successfully");

            if let Err(e) = test_connection(&pool).await {
                log::error!("Database connection test failed: {}", e);
            }
            pool
        }
        Err(e) => {
            log::error!("Failed to create database pool: {}", e);
            log::error!("Make sure PostgreSQL is running and DATABASE_URL is set");
            std::process::exit(1);
        }
    };

    // Create notification service
    let notification_service = NotificationService::new(pool.clone());

    // Start the background status sync loop
    let mut sync_manager = SyncManager::new(pool.clone());
    sync_manager.start(None);

    let frontend_path = get_frontend_path();
    log::info!("Frontend files location: {}", frontend_path);
    log::info!("Server will be available at: http://0.0.0.0:8080");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(notification_service.clone()))
            .wrap(Logger::default())
            .service(
                web::scope("/api")
                    // Public routes
                    .route("/availability", web::get().to(check_availability))
                    .route("/locations", web::get().to(list_locations))
                    .route("/locations/{id}", web::get().to(get_location))
                    .route("/cron/sync-statuses", web::post().to(sync_statuses))
                    .service(
                        web::scope("/auth")
                            .route("/register", web::post().to(register))
                            .route("/login", web::post().to(login)),
                    )
                    // Advertiser routes (require authentication)
                    .service(
                        web::scope("/campaigns")
                            .wrap(AuthMiddleware)
                            .route("", web::post().to(create_campaign))
                            .route("", web::get().to(list_campaigns))
                            .route("/{id}", web::get().to(get_campaign)),
                    )
                    .service(
                        web::scope("/payments")
                            .wrap(AuthMiddleware)
                            .route("/checkout", web::post().to(checkout)),
                    )
                    .service(
                        web::scope("/invoices")
                            .wrap(AuthMiddleware)
                            .route("/{campaign_id}", web::get().to(get_invoice)),
                    )
                    // Admin routes (require authentication + admin role)
                    .service(
                        web::scope("/admin")
                            .wrap(AuthMiddleware)
                            .route("/campaigns", web::get().to(list_all_campaigns))
                            .route(
                                "/campaigns/bulk-status",
                                web::post().to(bulk_update_campaign_status),
                            )
                            .route(
                                "/campaigns/{id}/status",
                                web::put().to(update_campaign_status),
                            )
                            .route("/locations", web::post().to(create_location))
                            .route("/locations/{id}", web::put().to(update_location))
                            .route("/locations/{id}", web::delete().to(delete_location))
                            .route(
                                "/screens/{location_id}",
                                web::put().to(update_screen_settings),
                            ),
                    ),
            )
            .route(
                "/health",
                web::get().to(|| async { HttpResponse::Ok().body("OK") }),
            )
            .service(Files::new("/", frontend_path).index_file("index.html"))
    })
    .bind("0.0.0.0:8080")?
    .run()
    .await
}
