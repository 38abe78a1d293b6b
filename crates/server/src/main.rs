// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP server for the `FlexiRota` shift planner.
//!
//! Requests carry the acting user's id in the `X-User-Id` header. Every
//! route is a thin adapter over a `flexirota_api` handler.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod session;

#[cfg(test)]
mod tests;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use clap::Parser;
use flexirota::{Clock, SystemClock};
use flexirota_api::AssignmentPolicy;
use flexirota_persistence::Persistence;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// `FlexiRota` Server - HTTP server for the `FlexiRota` shift planner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    bind: IpAddr,

    /// Days of past shifts that count towards an employee's workload
    #[arg(long, default_value_t = 28)]
    workload_window_days: u32,

    /// How often a swap decision is retried after losing a race
    #[arg(long, default_value_t = 3)]
    max_conflict_retries: u32,
}

impl Args {
    const fn policy(&self) -> AssignmentPolicy {
        AssignmentPolicy {
            workload_window_days: self.workload_window_days,
            max_conflict_retries: self.max_conflict_retries,
        }
    }
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a Mutex; every handler holds it for
/// the duration of one API call.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    clock: Arc<dyn Clock>,
    policy: AssignmentPolicy,
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/organisations", post(handlers::handle_create_organisation))
        .route(
            "/roles",
            post(handlers::handle_create_role).get(handlers::handle_list_roles),
        )
        .route(
            "/users",
            post(handlers::handle_register_user).get(handlers::handle_list_users),
        )
        .route(
            "/users/{user_id}",
            get(handlers::handle_get_user).patch(handlers::handle_update_user),
        )
        .route(
            "/shift_templates",
            post(handlers::handle_create_shift_template).get(handlers::handle_list_shift_templates),
        )
        .route(
            "/shift_templates/{template_id}",
            delete(handlers::handle_delete_shift_template),
        )
        .route(
            "/shifts",
            post(handlers::handle_create_shift).get(handlers::handle_list_shifts),
        )
        .route("/shifts/auto_assign", post(handlers::handle_auto_assign))
        .route(
            "/shifts/{shift_id}",
            patch(handlers::handle_update_shift).delete(handlers::handle_delete_shift),
        )
        .route("/swaps/request", post(handlers::handle_request_swap))
        .route("/swaps/approve/{request_id}", patch(handlers::handle_approve_swap))
        .route("/swaps/reject/{request_id}", patch(handlers::handle_reject_swap))
        .route("/swaps/pending", get(handlers::handle_pending_swaps))
        .route(
            "/availability",
            post(handlers::handle_create_availability).get(handlers::handle_list_availability),
        )
        .route(
            "/availability/{availability_id}",
            delete(handlers::handle_delete_availability),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing FlexiRota Server");

    let policy: AssignmentPolicy = args.policy();
    policy.validate()?;

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        clock: Arc::new(SystemClock),
        policy,
    };

    let app: Router = build_router(app_state);

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!(
        workload_window_days = policy.workload_window_days,
        max_conflict_retries = policy.max_conflict_retries,
        "Server listening on {}",
        addr
    );

    let listener: tokio::net::TcpListener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
