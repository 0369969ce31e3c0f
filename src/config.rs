use std::env;
use std::str::FromStr;

use dotenvy::dotenv;

use crate::model::theme::Theme;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub data_dir: String,
    pub log_dir: String,
    pub jwt_secret: String,
    pub access_token_ttl: usize,
    pub api_prefix: String,
    pub default_theme: Theme,

    // Insight generation
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub insights_language: String,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: var_or("SERVER_ADDR", "127.0.0.1:8080"),
            data_dir: var_or("DATA_DIR", "data"),
            log_dir: var_or("LOG_DIR", "logs"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            access_token_ttl: parse_or("ACCESS_TOKEN_TTL", 28_800), // one working day
            api_prefix: var_or("API_PREFIX", "/api"),
            default_theme: parse_or("DEFAULT_THEME", Theme::Light),

            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty()),
            gemini_model: var_or("GEMINI_MODEL", "gemini-3-flash-preview"),
            gemini_base_url: var_or(
                "GEMINI_BASE_URL",
                "https://generativelanguage.googleapis.com",
            ),
            insights_language: var_or("INSIGHTS_LANGUAGE", "Arabic"),
        }
    }

    /// Configuration for handler tests; never reads the environment.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            server_addr: "127.0.0.1:0".to_string(),
            data_dir: "data".to_string(),
            log_dir: "logs".to_string(),
            jwt_secret: "test-secret".to_string(),
            access_token_ttl: 3600,
            api_prefix: "/api".to_string(),
            default_theme: Theme::Light,
            gemini_api_key: None,
            gemini_model: "test-model".to_string(),
            gemini_base_url: "http://127.0.0.1:9".to_string(),
            insights_language: "English".to_string(),
        }
    }
}
