use std::sync::Arc;

use career_pilot::api::autopilot_routes;
use career_pilot::config::PilotConfig;
use career_pilot::orchestrator::Orchestrator;
use career_pilot::profile::UserProfile;
use career_pilot::workers::WorkerRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = PilotConfig::from_env()?;

    // Profile from file when given, demo profile otherwise
    let profile = match std::env::var("CAREER_PILOT_PROFILE") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| anyhow::anyhow!("Failed to read profile {path}: {e}"))?;
            serde_json::from_str::<UserProfile>(&raw)
                .map_err(|e| anyhow::anyhow!("Failed to parse profile {path}: {e}"))?
        }
        Err(_) => demo_profile(),
    };

    eprintln!("🧭 Career Pilot v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Cycle: every {:?}", config.cycle_interval);
    eprintln!(
        "   Status API: http://0.0.0.0:{}/api/autopilot/status",
        config.http_port
    );
    eprintln!(
        "   Insights API: http://0.0.0.0:{}/api/autopilot/insights",
        config.http_port
    );

    let workers = Arc::new(WorkerRegistry::with_defaults(config.worker_latency));
    let pilot = Arc::new(Orchestrator::new(config.clone(), workers));
    pilot.start(profile).await;

    let app = autopilot_routes(Arc::clone(&pilot));
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.http_port)).await?;
    tracing::info!("HTTP surface listening on port {}", config.http_port);

    tokio::select! {
        result = async { axum::serve(listener, app).await } => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl+C received, shutting down...");
        }
    }

    pilot.stop().await;
    Ok(())
}

/// Built-in profile so the binary does something useful out of the box.
fn demo_profile() -> UserProfile {
    serde_json::from_value(serde_json::json!({
        "personal": { "name": "Ada Example", "title": "Software Developer", "location": "Berlin" },
        "skills": [
            { "name": "Rust", "level": "advanced" },
            { "name": "SQL" },
            { "name": "React" }
        ],
        "work_experience": [
            { "company": "Acme Corp", "role": "Developer", "highlights": ["Cut build times by 40%"] }
        ],
        "education": [
            { "institution": "TU Berlin", "degree": "BSc Computer Science", "year": "2019" }
        ],
        "target_role": "Backend Engineer"
    }))
    .expect("demo profile is valid")
}
