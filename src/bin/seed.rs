use catalog_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    services::seed_service,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let state = AppState { orm };
    let message = seed_service::run_seed(&state).await?;

    println!("{message}: {} products", seed_service::initial_products().len());
    Ok(())
}
