use clap::Parser;
use dotenvy::dotenv;
use learnhub::router::init_router;
use learnhub::state::init_app_state;
use learnhub_config::ServerConfig;
use learnhub_observability::{init_metrics, init_tracing};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "learnhub")]
#[command(about = "LearnHub API server", long_about = None)]
struct Args {
    /// Keep all data in process instead of connecting to Postgres
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let args = Args::parse();

    init_tracing();

    if let Err(e) = run(args).await {
        error!(error = ?e, "Server failed");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut state = init_app_state(args.in_memory).await?;
    match init_metrics() {
        Ok(handle) => state = state.with_metrics(handle),
        Err(e) => warn!(error = ?e, "Metrics recorder not installed, /metrics disabled"),
    }

    let server = ServerConfig::from_env();
    let address = server.bind_address();
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(%address, "🚀 Server running");
    info!("📚 Swagger UI available at http://{address}/swagger-ui");
    info!("📖 Scalar UI available at http://{address}/scalar");

    axum::serve(listener, app).await?;
    Ok(())
}
