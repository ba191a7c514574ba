use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::str::FromStr;

const DEV_JWT_SECRET: &str = "demporium-dev-secret";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub database_url: Option<String>,
    pub storage_url: Option<String>,
    pub storage_service_key: Option<String>,
    pub fixtures_dir: PathBuf,
    pub content_file: PathBuf,
    pub site_settings_file: PathBuf,
    pub media_dir: PathBuf,
    pub uploads_dir: PathBuf,
    pub uploads_public_path: String,
    pub body_limit_mb: usize,
    pub jwt_secret: String,
    pub jwt_expiration_minutes: u64,
}

fn optional(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn or_default(key: &str, default: &str) -> String {
    optional(key).unwrap_or_else(|| default.to_string())
}

fn parsed<T: FromStr>(key: &str, default: T) -> T {
    match optional(key) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("{} is not a valid number ({}), using the default", key, raw);
            default
        }),
    }
}

impl Config {
    /// The process-wide configuration, loaded once.
    pub fn new() -> Self {
        CONFIG.clone()
    }

    pub fn from_env() -> Self {
        let jwt_secret = optional("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET is not set, using the development secret");
            DEV_JWT_SECRET.to_string()
        });

        Config {
            bind_addr: or_default("BIND_ADDR", "127.0.0.1:3000"),
            database_url: optional("DATABASE_URL"),
            storage_url: optional("STORAGE_URL"),
            storage_service_key: optional("STORAGE_SERVICE_KEY"),
            fixtures_dir: or_default("FIXTURES_DIR", "data").into(),
            content_file: or_default("CONTENT_FILE", "data/content.json").into(),
            site_settings_file: or_default("SITE_SETTINGS_FILE", "site-settings.json").into(),
            media_dir: or_default("MEDIA_DIR", "public/images").into(),
            uploads_dir: or_default("UPLOADS_DIR", "public/uploads").into(),
            uploads_public_path: or_default("UPLOADS_PUBLIC_PATH", "/uploads"),
            body_limit_mb: parsed("BODY_LIMIT_MB", 50),
            jwt_secret,
            jwt_expiration_minutes: parsed("JWT_EXPIRATION_MINUTES", 60),
        }
    }

    /// Configuration rooted in `dir` with no managed backend, for local runs
    /// and tests.
    pub fn local(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();

        Config {
            bind_addr: "127.0.0.1:0".to_string(),
            database_url: None,
            storage_url: None,
            storage_service_key: None,
            fixtures_dir: dir.join("data"),
            content_file: dir.join("data/content.json"),
            site_settings_file: dir.join("site-settings.json"),
            media_dir: dir.join("public/images"),
            uploads_dir: dir.join("public/uploads"),
            uploads_public_path: "/uploads".to_string(),
            body_limit_mb: 50,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_expiration_minutes: 60,
        }
    }

    pub fn with_database_url(mut self, url: &str) -> Self {
        self.database_url = Some(url.to_string());
        self
    }

    pub fn with_storage(mut self, url: &str, service_key: &str) -> Self {
        self.storage_url = Some(url.to_string());
        self.storage_service_key = Some(service_key.to_string());
        self
    }

    pub fn with_body_limit_mb(mut self, mb: usize) -> Self {
        self.body_limit_mb = mb;
        self
    }

    pub fn with_jwt_secret(mut self, secret: &str) -> Self {
        self.jwt_secret = secret.to_string();
        self
    }

    /// Request body limit in bytes, clamped instead of overflowing.
    pub fn body_limit_bytes(&self) -> usize {
        self.body_limit_mb.saturating_mul(1024 * 1024)
    }

    pub fn remote_database(&self) -> bool {
        self.database_url.is_some()
    }

    pub fn remote_storage(&self) -> bool {
        self.storage_url.is_some() && self.storage_service_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok();

    let config = Config::from_env();

    tracing::info!(
        "Config loaded (database: {}, storage: {})",
        if config.remote_database() { "managed" } else { "local fixtures" },
        if config.remote_storage() { "hosted" } else { "local" },
    );

    config
});
