use anyhow::{anyhow, Result};
use clap::Parser;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::theme::Theme;

pub const DEFAULT_CATALOG_URL: &str = "https://api.pokemontcg.io/v2/cards";
pub const DEFAULT_BACKGROUND_URL: &str =
    "https://www.cache2net2.com//Repositorio/6824/Publicacoes/219398/grZ46G9d7YfYZq7VvJPSaB.jpg?=36";
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// tcgview - trading card catalog browser
///
/// Fetches the first page of a card catalog and shows it as a list.
/// Configuration priority: CLI args > Environment variables > Defaults
#[derive(Parser, Debug, Default)]
#[command(name = "tcgview")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Trading card catalog browser", long_about = None)]
pub struct CliArgs {
    /// Catalog endpoint URL (queried with page=1 and pageSize)
    #[arg(long, env = "CATALOG_URL")]
    pub catalog_url: Option<String>,

    /// Cards requested on the first page (1-250)
    #[arg(long, env = "PAGE_SIZE")]
    pub page_size: Option<u32>,

    /// Background image URI shown behind the list
    #[arg(long, env = "BACKGROUND_URL")]
    pub background_url: Option<String>,

    /// Request timeout in milliseconds; 0 waits forever (0 or 1000-120000)
    #[arg(long, env = "REQUEST_TIMEOUT_MS")]
    pub request_timeout_ms: Option<u64>,

    /// Target UI rendering FPS (1-120)
    #[arg(long, env = "RENDER_FPS")]
    pub render_fps: Option<u32>,

    /// Colour theme: nord, amber-crt, green-phosphor
    #[arg(long, env = "THEME", value_parser = clap::value_parser!(Theme))]
    pub theme: Option<Theme>,

    /// Log file (the terminal is owned by the UI)
    #[arg(long, env = "LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Print the view description as JSON once the fetch settles, then exit
    #[arg(long)]
    pub dump_view: bool,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub catalog_url: String,
    pub page_size: u32,
    pub background_url: String,
    pub request_timeout: Option<Duration>,
    pub render_fps: u32,
    pub theme: Theme,
    pub log_file: PathBuf,
    pub dump_view: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            background_url: DEFAULT_BACKGROUND_URL.to_string(),
            request_timeout: None,
            render_fps: 30,
            theme: Theme::default(),
            log_file: PathBuf::from("./tcgview.log"),
            dump_view: false,
        }
    }
}

/// Validate that a value is within a given range (inclusive)
fn validate_in_range<T>(val: T, min: T, max: T, name: &str) -> Result<T>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if val < min || val > max {
        Err(anyhow!("{name} must be in range [{min}, {max}], got {val}"))
    } else {
        Ok(val)
    }
}

/// Validate URL format (basic check)
fn validate_url(url: &str, name: &str) -> Result<()> {
    if url.is_empty() {
        return Err(anyhow!("{name} cannot be empty"));
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(anyhow!("{name} must start with http:// or https://"))
    }
}

/// Load configuration from CLI args and environment variables
pub fn load() -> Result<Config> {
    from_args(CliArgs::parse())
}

/// Resolve parsed arguments against the environment and defaults.
pub fn from_args(args: CliArgs) -> Result<Config> {
    let defaults = Config::default();

    let catalog_url = args
        .catalog_url
        .or_else(|| env::var("CATALOG_URL").ok())
        .unwrap_or(defaults.catalog_url);
    validate_url(&catalog_url, "CATALOG_URL")?;

    let background_url = args
        .background_url
        .or_else(|| env::var("BACKGROUND_URL").ok())
        .unwrap_or(defaults.background_url);
    validate_url(&background_url, "BACKGROUND_URL")?;

    let page_size = args
        .page_size
        .or_else(|| env::var("PAGE_SIZE").ok().and_then(|s| s.parse().ok()))
        .unwrap_or(defaults.page_size);
    let page_size = validate_in_range(page_size, 1, 250, "PAGE_SIZE")?;

    let timeout_ms = args
        .request_timeout_ms
        .or_else(|| {
            env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
        })
        .unwrap_or(0);
    let request_timeout = if timeout_ms == 0 {
        None
    } else {
        let ms = validate_in_range(timeout_ms, 1000, 120_000, "REQUEST_TIMEOUT_MS")?;
        Some(Duration::from_millis(ms))
    };

    let render_fps = args
        .render_fps
        .or_else(|| env::var("RENDER_FPS").ok().and_then(|s| s.parse().ok()))
        .unwrap_or(defaults.render_fps);
    let render_fps = validate_in_range(render_fps, 1, 120, "RENDER_FPS")?;

    let theme = match args.theme {
        Some(t) => t,
        None => match env::var("THEME") {
            Ok(s) => s.parse::<Theme>().map_err(|e| anyhow!(e))?,
            Err(_) => defaults.theme,
        },
    };

    let log_file = args
        .log_file
        .or_else(|| env::var("LOG_FILE").ok().map(PathBuf::from))
        .unwrap_or(defaults.log_file);

    Ok(Config {
        catalog_url,
        page_size,
        background_url,
        request_timeout,
        render_fps,
        theme,
        log_file,
        dump_view: args.dump_view,
    })
}

impl Config {
    pub fn print_summary(&self) {
        log::info!("tcgview configuration:");
        log::info!("  Catalog: {} (pageSize={})", self.catalog_url, self.page_size);
        match self.request_timeout {
            Some(t) => log::info!("  Request timeout: {}ms", t.as_millis()),
            None => log::info!("  Request timeout: none"),
        }
        log::info!("  Render FPS: {}", self.render_fps);
        log::info!("  Theme: {}", self.theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["tcgview"];
        argv.extend_from_slice(extra);
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn explicit_args_are_used() {
        let cfg = from_args(args(&[
            "--catalog-url",
            "http://127.0.0.1:9/cards",
            "--page-size",
            "25",
            "--request-timeout-ms",
            "5000",
            "--theme",
            "amber",
        ]))
        .unwrap();
        assert_eq!(cfg.catalog_url, "http://127.0.0.1:9/cards");
        assert_eq!(cfg.page_size, 25);
        assert_eq!(cfg.request_timeout, Some(Duration::from_millis(5000)));
        assert_eq!(cfg.theme, Theme::AmberCrt);
    }

    #[test]
    fn zero_timeout_means_wait_forever() {
        let cfg = from_args(args(&["--request-timeout-ms", "0"])).unwrap();
        assert_eq!(cfg.request_timeout, None);
    }

    #[test]
    fn rejects_non_http_catalog() {
        let err = from_args(args(&["--catalog-url", "ftp://cards"])).unwrap_err();
        assert!(err.to_string().contains("CATALOG_URL"));
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(from_args(args(&["--page-size", "0"])).is_err());
        assert!(from_args(args(&["--page-size", "251"])).is_err());
        assert!(from_args(args(&["--request-timeout-ms", "10"])).is_err());
        assert!(from_args(args(&["--render-fps", "500"])).is_err());
    }

    #[test]
    fn unknown_theme_fails_to_parse() {
        assert!(CliArgs::try_parse_from(["tcgview", "--theme", "plaid"]).is_err());
    }

    #[test]
    fn range_helper_reports_bounds() {
        let err = validate_in_range(0u32, 1, 10, "X").unwrap_err();
        assert_eq!(err.to_string(), "X must be in range [1, 10], got 0");
    }
}
