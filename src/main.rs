use std::sync::Arc;

use futures::StreamExt;

use investwise_onboarding::cli::{self, Flow};
use investwise_onboarding::config::GatewayConfig;
use investwise_onboarding::gateway::{HttpGateway, RemoteGateway};
use investwise_onboarding::render;
use investwise_onboarding::wizard::WizardController;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; screens go to stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = GatewayConfig::from_env()?;

    eprintln!("📈 InvestWise onboarding v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Backend: {}", config.base_url);
    eprintln!("   Type 'help' for commands, 'quit' to exit.\n");

    let gateway = Arc::new(HttpGateway::new(config));

    match gateway.health().await {
        Ok(health) if health.is_healthy() => tracing::info!("Backend is healthy"),
        Ok(health) => tracing::warn!(status = %health.status, "Backend reports unhealthy status"),
        Err(e) => tracing::warn!(error = %e, "Backend unreachable; requests will fail until it is up"),
    }

    let mut wizard = WizardController::new(gateway);
    let mut commands = cli::stdin_commands();

    println!("{}", render::render(&wizard));
    eprint!("> ");

    let mut show = |screen: String| {
        println!("{screen}");
    };

    while let Some(command) = commands.next().await {
        match cli::dispatch(&mut wizard, command, &mut commands, &mut show).await {
            Flow::Quit => break,
            Flow::Continue(notice) => {
                println!("{}", render::render(&wizard));
                if let Some(notice) = notice {
                    println!("{notice}\n");
                }
            }
        }
        eprint!("> ");
    }

    Ok(())
}
