use std::path::PathBuf;

use anyhow::Context;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Snapshot file. `None` keeps locations in memory only.
    pub db_path: Option<PathBuf>,
    pub graphiql: bool,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("PINMARK_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("PINMARK_PORT")
            .unwrap_or_else(|| "4000".into())
            .parse()
            .context("PINMARK_PORT must be a port number")?;
        let db_path = lookup("PINMARK_DB_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let graphiql = lookup("PINMARK_GRAPHIQL")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"))
            .unwrap_or(true);

        Ok(Self {
            host,
            port,
            db_path,
            graphiql,
        })
    }
}
