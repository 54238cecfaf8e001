use anyhow::Result;
use hui_dao::account::Role;
use hui_dao::config::Config;
use hui_dao::logger;
use hui_dao::repositories::{AccountFilter, AccountRepository, ConfigFilter, ConfigRepository};
use hui_dao::storage::Storage;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().nth(1).as_deref() == Some("generate-config") {
        let path = Config::get_default_config_path()?;
        Config::generate_default_config(&path)?;
        println!("Configuration written to {}", path.display());
        return Ok(());
    }

    let config = Config::load()?;
    if let Some(path) = logger::init(&config.logging)? {
        eprintln!("Logging to {}", path.display());
    }

    let storage = Storage::connect(&config.database).await?;

    let accounts = AccountRepository::list(&storage.conn, &AccountFilter::default()).await?;
    let active = accounts.iter().filter(|account| !account.deleted).count();
    let admins = accounts
        .iter()
        .filter(|account| account.role == Role::Admin)
        .count();
    let unlimited = accounts.iter().filter(|account| account.has_unlimited_quota()).count();
    let traffic: i64 = accounts.iter().map(|account| account.total_traffic()).fold(0, i64::saturating_add);
    let settings = ConfigRepository::list(&storage.conn, &ConfigFilter::default()).await?;

    log::info!(
        "{} accounts ({} active, {} admins, {} unlimited), {} bytes of traffic, {} config entries",
        accounts.len(),
        active,
        admins,
        unlimited,
        traffic,
        settings.len()
    );
    println!("{}", serde_json::to_string_pretty(&settings)?);

    storage.close().await?;
    Ok(())
}
