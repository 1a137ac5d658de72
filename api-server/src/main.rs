use actix_cors::Cors;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer, Responder};
use host::{verify_seeded_path, GameConfig, GameSession, MazeSnapshot};
use maze_core::{PathReport, MAX_MOVES};
use serde::{Deserialize, Serialize};

const BIND_ADDRESS: &str = "0.0.0.0:8080";

/// JSON body limit (a full moves array stays well under this)
const JSON_LIMIT: usize = 1_048_576;

// Request/Response types

#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

#[derive(Debug, Serialize)]
struct GenerateMazeResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    maze: Option<MazeSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VerifyPathRequest {
    width: usize,
    height: usize,
    seed: u32,
    moves: Vec<u8>,
}

#[derive(Debug, Serialize)]
struct VerifyPathResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<PathReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

// API Handlers

/// POST /api/generate-maze
/// Generate a maze with randomized start and exit
async fn generate_maze(req: web::Json<GameConfig>) -> impl Responder {
    tracing::info!(
        "Received generate-maze request: {}x{}, seed {:?}",
        req.width,
        req.height,
        req.seed
    );

    match GameSession::new(req.into_inner()) {
        Ok(session) => {
            let maze = session.snapshot();
            tracing::info!("Generated maze for seed: {}", maze.seed);
            HttpResponse::Ok().json(GenerateMazeResponse {
                success: true,
                maze: Some(maze),
                error: None,
            })
        }
        Err(e) => {
            tracing::warn!("Rejected generate-maze request: {}", e);
            HttpResponse::BadRequest().json(GenerateMazeResponse {
                success: false,
                maze: None,
                error: Some(e.to_string()),
            })
        }
    }
}

/// POST /api/verify-path
/// Regenerate the seeded maze and replay the player's moves on it
async fn verify_path(req: web::Json<VerifyPathRequest>) -> impl Responder {
    tracing::info!(
        "Received verify-path request for maze seed: {}, moves: {}",
        req.seed,
        req.moves.len()
    );

    if req.moves.len() > MAX_MOVES {
        return HttpResponse::BadRequest().json(VerifyPathResponse {
            success: false,
            report: None,
            error: Some(format!("Too many moves: {} (max {})", req.moves.len(), MAX_MOVES)),
        });
    }

    match verify_seeded_path(req.width, req.height, req.seed, &req.moves) {
        Ok(report) => {
            tracing::info!(
                "Verified path for maze seed: {}, valid: {}",
                req.seed,
                report.reached_exit
            );
            HttpResponse::Ok().json(VerifyPathResponse {
                success: true,
                report: Some(report),
                error: None,
            })
        }
        Err(e) => {
            tracing::warn!("Rejected verify-path request: {}", e);
            HttpResponse::BadRequest().json(VerifyPathResponse {
                success: false,
                report: None,
                error: Some(e.to_string()),
            })
        }
    }
}

/// GET /health
/// Health check endpoint
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "maze-api"
    }))
}

/// Malformed or mistyped bodies get the same JSON error shape as handler errors
fn json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::warn!("Rejected {} body: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(ErrorResponse {
        success: false,
        error: err.to_string(),
    });
    InternalError::from_response(err, response).into()
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_LIMIT)
            .error_handler(json_error),
    )
        .route("/health", web::get().to(health))
        .route("/api/generate-maze", web::post().to(generate_maze))
        .route("/api/verify-path", web::post().to(verify_path));
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Maze API Server");
    tracing::info!("Binding to {}", BIND_ADDRESS);

    HttpServer::new(|| {
        // The browser front-end is served from a different origin
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header()
            .max_age(3600);

        App::new().wrap(cors).configure(routes)
    })
    .bind(BIND_ADDRESS)?
    .run()
    .await
}
