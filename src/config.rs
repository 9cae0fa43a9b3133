use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_TABLE: &str = "projects";
pub const DEFAULT_BUCKET: &str = "project-images";
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "/placeholder.svg";
pub const DEFAULT_PREVIEW_CHARS: usize = 120;
pub const DEFAULT_LOCAL_PUBLIC_URL: &str = "http://localhost:8080/storage";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendConfig {
    /// Hosted record/blob/auth service.
    Supabase { url: String, anon_key: String },
    /// SQLite file on this machine.
    Local { db_path: PathBuf, public_base_url: String },
}

/// Presentation knobs shared by the list and detail views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSettings {
    pub placeholder_image: String,
    pub description_preview_chars: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            description_preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub table: String,
    pub bucket: String,
    pub views: ViewSettings,
    pub admin_email: Option<String>,
    #[serde(skip_serializing)]
    pub admin_password: Option<String>,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::Local {
                db_path: default_db_path(),
                public_base_url: DEFAULT_LOCAL_PUBLIC_URL.to_string(),
            },
            table: DEFAULT_TABLE.to_string(),
            bucket: DEFAULT_BUCKET.to_string(),
            views: ViewSettings::default(),
            admin_email: None,
            admin_password: None,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from `PORTFOLIO_*` keys; missing or empty keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        match (get("PORTFOLIO_SUPABASE_URL"), get("PORTFOLIO_SUPABASE_ANON_KEY")) {
            (Some(url), Some(anon_key)) => {
                config.backend = BackendConfig::Supabase { url, anon_key };
            }
            _ => {
                config.backend = BackendConfig::Local {
                    db_path: get("PORTFOLIO_DB_PATH")
                        .map(PathBuf::from)
                        .unwrap_or_else(default_db_path),
                    public_base_url: get("PORTFOLIO_PUBLIC_URL")
                        .unwrap_or_else(|| DEFAULT_LOCAL_PUBLIC_URL.to_string()),
                };
            }
        }

        if let Some(table) = get("PORTFOLIO_TABLE") {
            config.table = table;
        }
        if let Some(bucket) = get("PORTFOLIO_BUCKET") {
            config.bucket = bucket;
        }
        if let Some(placeholder) = get("PORTFOLIO_PLACEHOLDER_IMAGE") {
            config.views.placeholder_image = placeholder;
        }
        if let Some(chars) = get("PORTFOLIO_PREVIEW_CHARS").and_then(|v| v.parse().ok()) {
            config.views.description_preview_chars = chars;
        }
        config.admin_email = get("PORTFOLIO_ADMIN_EMAIL");
        config.admin_password = get("PORTFOLIO_ADMIN_PASSWORD");
        if let Some(filter) = get("PORTFOLIO_LOG") {
            config.log_filter = filter;
        }

        config
    }
}

fn default_db_path() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("portfolio-studio").join("portfolio.db")
}
