use std::{env, fs, ops::Deref, sync::Arc};

use url::Url;

use crate::{
    cache::{ApiCache, Generation},
    error::Error,
    provider::Subgraph,
};

#[derive(Debug)]
pub struct AppState<T>(Arc<T>);

impl<T> AppState<T> {
    pub fn new(state: T) -> AppState<T> {
        AppState(Arc::new(state))
    }
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> AppState<T> {
        AppState(Arc::clone(&self.0))
    }
}

impl<T> Deref for AppState<T> {
    type Target = Arc<T>;

    fn deref(&self) -> &Arc<T> {
        &self.0
    }
}

#[derive(Debug)]
pub struct State {
    pub config: Config,
    pub subgraph: Subgraph,
    pub api_cache: ApiCache,
    pub search_generation: Generation,
}

impl State {
    pub fn new(config: Config, subgraph: Subgraph) -> State {
        let ttl_seconds = u64::from(config.cache_interval_minutes) * 60;

        State {
            config,
            subgraph,
            api_cache: ApiCache::new(ttl_seconds),
            search_generation: Generation::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub graphql_endpoint: String,
    pub graphql_auth_token: String,
    pub pool_id: String,
    pub page_size: usize,
    pub coverage_days: i64,
    pub max_history_records: usize,
    pub window_days: usize,
    pub timeout: u64,
    pub cache_interval_minutes: u16,
    pub refresh_interval_secs: u64,
    pub server_host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// The minimum history span to fetch before pagination stops.
    pub fn coverage_secs(&self) -> i64 {
        self.coverage_days * 24 * 60 * 60
    }
}

pub fn get_configuration() -> Result<Config, Error> {
    let graphql_endpoint = env::var("GRAPHQL_ENDPOINT")?;
    Url::parse(&graphql_endpoint)?;

    let graphql_auth_token = env::var("GRAPHQL_AUTH_TOKEN")?;
    let pool_id = env::var("POOL_ID")?.to_lowercase();

    let page_size: usize = env::var("PAGE_SIZE")?.parse()?;
    if page_size == 0 {
        return Err(Error::ConfigurationError(String::from(
            "PAGE_SIZE must be greater than zero",
        )));
    }

    let coverage_days: i64 = env::var("COVERAGE_DAYS")?.parse()?;
    let max_history_records: usize = env::var("MAX_HISTORY_RECORDS")?.parse()?;
    let window_days: usize = env::var("WINDOW_DAYS")?.parse()?;
    let timeout: u64 = env::var("TIMEOUT")?.parse()?;
    let cache_interval_minutes: u16 = env::var("CACHE_INTERVAL_IN_MINUTES")?.parse()?;
    let refresh_interval_secs: u64 = env::var("REFRESH_INTERVAL_IN_SEC")?.parse()?;

    let server_host = env::var("SERVER_HOST")?;
    let port: u16 = env::var("PORT")?.parse()?;
    let allowed_origins = env::var("ALLOWED_ORIGINS")?
        .split(',')
        .map(|item| item.to_owned())
        .collect::<Vec<String>>();

    let config = Config {
        graphql_endpoint,
        graphql_auth_token,
        pool_id,
        page_size,
        coverage_days,
        max_history_records,
        window_days,
        timeout,
        cache_interval_minutes,
        refresh_interval_secs,
        server_host,
        port,
        allowed_origins,
    };

    Ok(config)
}

pub fn set_configuration() -> Result<(), Error> {
    let config_file: &str = ".env";

    let directory = env!("CARGO_MANIFEST_DIR");
    let path = format!("{}/{}", directory, config_file);

    let config_string = fs::read_to_string(path)?;
    parse_config_string(config_string);

    Ok(())
}

fn parse_config_string(config: String) {
    let params: Vec<Option<(&str, &str)>> = config
        .split('\n')
        .map(|s| {
            let element = s.find('=');
            if let Some(e) = element {
                return Some(s.split_at(e));
            }
            None
        })
        .map(|value| {
            if let Some((k, v)) = value {
                return Some((k, &v[1..]));
            }
            None
        })
        .collect();

    for (key, value) in params.into_iter().flatten() {
        env::set_var(key, value);
    }
}
