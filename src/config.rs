use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mongodb_uri: String,
    pub database_name: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let mongodb_uri = env::var("MONGODB_URI")?;
        let database_name = env::var("DATABASE_NAME").unwrap_or_else(|_| "myShop".to_string());
        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(5000);
        Ok(Self {
            mongodb_uri,
            database_name,
            host,
            port,
        })
    }
}
