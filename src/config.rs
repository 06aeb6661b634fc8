use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use crate::error::{AppError, Result};

pub const DEFAULT_CONGRESS_BASE_URL: &str = "https://api.congress.gov/v3";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Startup configuration handed to the composition root.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub legislative_api_key: String,
    pub summarization_api_key: String,
    /// Directory for the file-backed document store. `None` keeps the cache in memory.
    pub document_store_path: Option<PathBuf>,
    pub congress_base_url: String,
    pub gemini_base_url: String,
    pub summary_model: String,
    pub chat_model: String,
    pub summary_tone: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| AppError::ConfigError(format!("{name} is not set")))
        };
        let or_default = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let legislative_api_key = required("CONGRESS_API_KEY")?;
        let summarization_api_key = required("GOOGLE_API_KEY")?;

        let host = or_default("HOST", "127.0.0.1");
        let port = or_default("PORT", "8000");
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let document_store_path = lookup("DOCUMENT_STORE_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            legislative_api_key,
            summarization_api_key,
            document_store_path,
            congress_base_url: or_default("CONGRESS_API_BASE_URL", DEFAULT_CONGRESS_BASE_URL),
            gemini_base_url: or_default("GEMINI_API_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            summary_model: or_default("SUMMARY_MODEL", "gemini-1.5-flash"),
            chat_model: or_default("CHAT_MODEL", "gemini-1.5-pro"),
            summary_tone: or_default("SUMMARY_TONE", "neutral"),
        })
    }
}
