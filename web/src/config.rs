//! # Server Configuration
//!
//! Command line flags with environment fallbacks. `.env` is loaded before
//! parsing, so any flag may be set there too.

use crate::db::PgRepository;
use clap::Parser;
use llmops_core::{ApiToolRepository, AppResult, MemoryRepository};
use log::{info, warn};
use std::sync::Arc;

/// Server settings.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about = "LLM Ops tool service")]
pub struct ServerConfig {
    /// Address to listen on.
    #[clap(long, env = "LLMOPS_BIND", default_value = "127.0.0.1:8000")]
    pub bind: String,

    /// Postgres connection string. Without it, records live in memory.
    #[clap(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections.
    #[clap(long, env = "LLMOPS_POOL_SIZE", default_value_t = 10)]
    pub pool_size: u32,
}

impl ServerConfig {
    /// Builds the repository selected by the configuration.
    pub fn repository(&self) -> AppResult<Arc<dyn ApiToolRepository>> {
        match &self.database_url {
            Some(url) => {
                info!("using postgres repository (pool size {})", self.pool_size);
                Ok(Arc::new(PgRepository::connect(url, self.pool_size)?))
            }
            None => {
                warn!("DATABASE_URL is not set; api tools are kept in memory");
                Ok(Arc::new(MemoryRepository::default()))
            }
        }
    }
}
