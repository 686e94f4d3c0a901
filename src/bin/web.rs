//! skillpack-web: HTTP frontend for browsing skills.
//!
//! Thin glue over `skillpack::web`: two JSON routes, CORS open for the
//! frontend dev server.

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use skillpack::config::Config;
use skillpack::web::{self, SkillView};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Serve the skills root over HTTP for the browsing frontend.
#[derive(Parser, Debug)]
#[command(name = "skillpack-web")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080", env = "SKILLPACK_WEB_ADDR")]
    addr: String,

    /// Skills root directory (defaults to the configured one)
    #[arg(long)]
    skills_dir: Option<PathBuf>,
}

#[derive(Clone)]
struct AppState {
    skills_dir: Arc<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load()?;
    let skills_dir = args.skills_dir.unwrap_or(config.skills_dir);

    let state = AppState {
        skills_dir: Arc::new(skills_dir),
    };
    let app = Router::new()
        .route("/api/skills", get(list_skills))
        .route("/api/skills/{name}", get(get_skill))
        .layer(CorsLayer::permissive())
        .with_state(state.clone());

    println!(
        "[web] Serving skills from {} on http://{}",
        state.skills_dir.display(),
        args.addr
    );
    let listener = tokio::net::TcpListener::bind(&args.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn list_skills(State(state): State<AppState>) -> Json<Vec<SkillView>> {
    Json(web::list_skills(&state.skills_dir))
}

async fn get_skill(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<SkillView>, StatusCode> {
    web::skill_by_name(&state.skills_dir, &name)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
