use std::env;
use std::path::PathBuf;
use std::time::Duration;

use chrono_tz::Tz;
use clap::Parser;

use crate::error::SnapshotError;

pub const DEFAULT_TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
pub const DEFAULT_CATALOG_URL: &str = "https://api.igdb.com/v4/games";
pub const DEFAULT_PAGE_SIZE: usize = 500;
pub const DEFAULT_PAGE_DELAY_MS: u64 = 250;

/// CLI surface for the release snapshot downloader.
#[derive(Debug, Parser, Clone)]
#[command(
    author,
    version,
    about = "Download recent game releases and write one JSON file per release date"
)]
pub struct CliArgs {
    /// Directory receiving the per-date JSON files.
    #[arg(long = "out", value_name = "DIR", default_value = "public/data")]
    pub out: PathBuf,

    /// IANA time zone used to turn release timestamps into calendar dates.
    #[arg(long = "timezone", value_name = "TZ", default_value = "UTC")]
    pub timezone: String,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone)]
pub struct Tunables {
    pub token_url: String,
    pub catalog_url: String,
    pub page_size: usize,
    pub page_delay: Duration,
}

#[derive(Debug, Clone)]
pub struct Paths {
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub paths: Paths,
    pub credentials: Credentials,
    pub tunables: Tunables,
    pub timezone: Tz,
}

impl CliArgs {
    pub fn resolve(self) -> Result<AppConfig, SnapshotError> {
        let timezone = parse_timezone(&self.timezone)?;
        let credentials = Credentials::from_env()?;
        let tunables = Tunables::from_env()?;

        Ok(AppConfig {
            paths: Paths {
                output_dir: self.out,
            },
            credentials,
            tunables,
            timezone,
        })
    }
}

impl Credentials {
    pub fn from_env() -> Result<Self, SnapshotError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup<L>(lookup: L) -> Result<Self, SnapshotError>
    where
        L: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            client_id: required_var(&lookup, "CLIENT_ID")?,
            client_secret: required_var(&lookup, "CLIENT_SECRET")?,
        })
    }
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            page_delay: Duration::from_millis(DEFAULT_PAGE_DELAY_MS),
        }
    }
}

impl Tunables {
    pub fn from_env() -> Result<Self, SnapshotError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup<L>(lookup: L) -> Result<Self, SnapshotError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let token_url =
            lookup("RELEASE_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string());
        let catalog_url =
            lookup("RELEASE_CATALOG_URL").unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());

        let page_size = parse_var(&lookup, "RELEASE_PAGE_SIZE", DEFAULT_PAGE_SIZE, |s| {
            s.parse::<usize>()
        })?;
        if page_size == 0 {
            return Err(SnapshotError::Config(
                "RELEASE_PAGE_SIZE must be greater than zero".to_string(),
            ));
        }

        let page_delay_ms =
            parse_var(&lookup, "RELEASE_PAGE_DELAY_MS", DEFAULT_PAGE_DELAY_MS, |s| {
                s.parse::<u64>()
            })?;

        Ok(Self {
            token_url,
            catalog_url,
            page_size,
            page_delay: Duration::from_millis(page_delay_ms),
        })
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz, SnapshotError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|err| SnapshotError::Config(format!("invalid time zone {:?}: {}", name, err)))
}

fn required_var<L>(lookup: &L, var: &str) -> Result<String, SnapshotError>
where
    L: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(SnapshotError::Config(format!(
            "{} must be set to a non-empty value",
            var
        ))),
    }
}

fn parse_var<L, T, F, E>(
    lookup: &L,
    var: &str,
    default: T,
    mut parser: F,
) -> Result<T, SnapshotError>
where
    L: Fn(&str) -> Option<String>,
    F: FnMut(&str) -> Result<T, E>,
    T: Copy,
    E: std::fmt::Display,
{
    match lookup(var) {
        Some(value) => match parser(value.trim()) {
            Ok(parsed) => Ok(parsed),
            Err(err) => Err(SnapshotError::Config(format!(
                "invalid value for {}: {}",
                var, err
            ))),
        },
        None => Ok(default),
    }
}
