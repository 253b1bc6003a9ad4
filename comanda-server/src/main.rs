use comanda_server::{AppState, Config, Server, init_logger, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment and logging
    dotenv::dotenv().ok();
    init_logger();

    print_banner();
    tracing::info!("Comanda server starting...");

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize application state
    let state = AppState::initialize(&config);

    // 4. Start HTTP server
    let server = Server::with_state(config, state);
    server.run().await?;

    Ok(())
}
