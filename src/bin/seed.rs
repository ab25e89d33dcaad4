//! CLI tool to load the demonstration dataset.
//!
//! Usage:
//!   cargo run --bin seed            # seed an empty database
//!   cargo run --bin seed -- --force # wipe existing data first

use std::env;

use sea_orm::EntityTrait;
use sea_orm_migration::MigratorTrait;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use cicd_dashboard_server::config::Config;
use cicd_dashboard_server::db::DbPool;
use cicd_dashboard_server::entity;
use cicd_dashboard_server::error::AppResult;
use cicd_dashboard_server::migration::Migrator;
use cicd_dashboard_server::services::sample_data;

fn print_usage() {
    println!("Load the demonstration dataset into the dashboard database.");
    println!();
    println!("Usage: seed [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --force    Delete existing data before seeding");
    println!("  --help     Show this help");
}

async fn wipe(pool: &DbPool) -> AppResult<()> {
    let conn = pool.connection();

    // Builds reference pipelines, so they go first
    entity::build::Entity::delete_many().exec(conn).await?;
    entity::pipeline::Entity::delete_many().exec(conn).await?;
    entity::metric::Entity::delete_many().exec(conn).await?;
    entity::alert::Entity::delete_many().exec(conn).await?;
    entity::configuration::Entity::delete_many()
        .exec(conn)
        .await?;

    Ok(())
}

async fn seed(pool: &DbPool) -> AppResult<()> {
    for req in sample_data::sample_pipelines() {
        pool.insert_pipeline(&req).await?;
    }
    for (pipeline_id, update) in sample_data::sample_pipeline_runs() {
        pool.update_pipeline(pipeline_id, &update).await?;
    }
    info!("Seeded 3 pipelines");

    for req in sample_data::sample_builds() {
        pool.insert_build(&req).await?;
    }
    info!("Seeded 3 builds");

    let (ack_source_id, ack_by) = sample_data::ACKNOWLEDGED_ALERT;
    for req in sample_data::sample_alerts() {
        let model = pool.insert_alert(&req).await?;
        if model.source_id == ack_source_id {
            pool.acknowledge_alert(model.id, ack_by).await?;
        }
    }
    info!("Seeded 5 alerts");

    for (date, tool, req) in sample_data::sample_metrics() {
        pool.upsert_metric(date, tool, &req).await?;
    }
    info!("Seeded 7 metric snapshots");

    for req in sample_data::sample_configurations() {
        pool.insert_configuration(&req).await?;
    }
    info!("Seeded 3 configuration records");

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let args: Vec<String> = env::args().collect();
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                error!("Unknown argument: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match DbPool::connect(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = Migrator::up(pool.connection(), None).await {
        error!("Failed to run migrations: {}", e);
        std::process::exit(1);
    }

    // Refuse to double-seed unless asked
    match pool.get_pipeline("pipeline-1").await {
        Ok(Some(_)) if !force => {
            error!("Database already contains seed data. Re-run with --force to replace it.");
            std::process::exit(1);
        }
        Ok(_) => {}
        Err(e) => {
            error!("Failed to inspect database: {}", e);
            std::process::exit(1);
        }
    }

    if force {
        if let Err(e) = wipe(&pool).await {
            error!("Failed to wipe existing data: {}", e);
            std::process::exit(1);
        }
        info!("Existing data removed");
    }

    if let Err(e) = seed(&pool).await {
        error!("Seeding failed: {}", e);
        std::process::exit(1);
    }

    info!("Demonstration dataset loaded");
}
