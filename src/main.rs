use tracing::{error, Level};

use poolscope::{
    configuration::{get_configuration, set_configuration, AppState, Config, State},
    error::Error,
    handler::cache_refresher,
    provider::Subgraph,
    server,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let result = app_main().await;

    if let Err(err) = &result {
        error!("{}", err);
    }

    result
}

async fn app_main() -> Result<(), Error> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_level(true)
        .with_max_level(Level::INFO)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let (config, subgraph) = match init() {
        Ok((config, subgraph)) => (config, subgraph),
        Err(e) => return Err(Error::ConfigurationError(e.to_string())),
    };

    let state = State::new(config, subgraph);
    let app_state = AppState::new(state);

    let (_, _) = tokio::try_join!(
        server::server_task(&app_state),
        cache_refresher::cache_refresh_task(app_state.clone()),
    )?;

    Ok(())
}

fn init() -> Result<(Config, Subgraph), Error> {
    set_configuration()?;
    let config = get_configuration()?;
    let subgraph = Subgraph::new(config.clone())?;
    Ok((config, subgraph))
}
