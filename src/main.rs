use std::env;
use std::path::Path;
use std::time::Duration;

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use minion_manager::network::server::GameServer;
use minion_manager::protocol::ClientCommand;
use minion_manager::{CommandError, Engine, EngineConfig};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:9001";
const DEFAULT_TICK_MS: u64 = 1000;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let bind_addr = env::var("MINION_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let tick_ms = env::var("MINION_TICK_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .unwrap_or(DEFAULT_TICK_MS);
    let config = match env::var("MINION_CONFIG") {
        Ok(path) => EngineConfig::load_from_file(Path::new(&path)),
        Err(_) => EngineConfig::default(),
    };

    let mut engine = Engine::new(config);

    let mut server = match GameServer::start(&bind_addr).await {
        Ok(server) => server,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };
    server.send_snapshot(engine.snapshot());

    info!("Ticking every {}ms", tick_ms);
    let mut interval = tokio::time::interval(Duration::from_millis(tick_ms));

    loop {
        interval.tick().await;

        for command in server.drain_commands() {
            match apply_command(&mut engine, command) {
                Ok(()) => server.send_snapshot(engine.snapshot()),
                Err(e) => {
                    debug!("Command rejected: {}", e);
                    server.send_rejection(e.to_string());
                }
            }
        }

        let report = engine.tick();
        if !report.completed.is_empty() || report.raid.is_some() {
            debug!(
                "Tick {}: {} completed, raid {:?}",
                report.tick,
                report.completed.len(),
                report.raid
            );
        }
        server.send_snapshot(engine.snapshot());

        if !server.is_connected() {
            info!("Client gone, shutting down");
            break;
        }
    }
}

fn apply_command(engine: &mut Engine, command: ClientCommand) -> Result<(), CommandError> {
    match command {
        ClientCommand::Reset => engine.reset(),
        ClientCommand::AcceptMission { mission_id } => engine.accept_mission(mission_id)?,
        ClientCommand::ClickMission { mission_id } => {
            engine.click_mission(mission_id)?;
        }
        ClientCommand::HireWorker => {
            engine.hire_worker()?;
        }
        ClientCommand::PurchaseUpgrade { upgrade_id } => {
            engine.purchase_upgrade(upgrade_id)?;
        }
        ClientCommand::PayBribe => {
            engine.pay_bribe()?;
        }
        ClientCommand::DefendRaid => {
            engine.defend_raid()?;
        }
        ClientCommand::DismissNotification { notification_id } => {
            engine.dismiss_notification(notification_id)?
        }
        ClientCommand::DebugAddCurrency { amount } => engine.add_currency(amount),
    }
    Ok(())
}
