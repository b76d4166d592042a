use report_server::{Config, Server, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_environment();

    let config = Config::from_env();
    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        "Report server starting"
    );

    Server::new(config).run().await?;
    Ok(())
}
