use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const LISTEN_ADDR_ENV: &str = "TODO_GATEWAY_LISTEN_ADDR";
pub const STORAGE_BACKEND_ENV: &str = "TODO_GATEWAY_STORAGE_BACKEND";
pub const MONGODB_URI_ENV: &str = "TODO_GATEWAY_MONGODB_URI";
pub const MONGODB_DATABASE_ENV: &str = "TODO_GATEWAY_MONGODB_DATABASE";
pub const MONGODB_COLLECTION_ENV: &str = "TODO_GATEWAY_MONGODB_COLLECTION";
pub const FAVICON_PATH_ENV: &str = "TODO_GATEWAY_FAVICON_PATH";
pub const REQUEST_TIMEOUT_ENV: &str = "TODO_GATEWAY_REQUEST_TIMEOUT_SECS";
pub const LOG_FORMAT_ENV: &str = "TODO_GATEWAY_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mongodb")]
    Mongodb,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mongodb => write!(f, "mongodb"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "todo-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = MONGODB_URI_ENV, required_if_eq("storage", "mongodb"))]
    pub mongodb_uri: Option<String>,

    #[arg(
        long,
        env = MONGODB_DATABASE_ENV,
        default_value = todo_storage::mongo::DEFAULT_DATABASE
    )]
    pub mongodb_database: String,

    #[arg(
        long,
        env = MONGODB_COLLECTION_ENV,
        default_value = todo_storage::mongo::DEFAULT_COLLECTION
    )]
    pub mongodb_collection: String,

    #[arg(long, env = FAVICON_PATH_ENV, default_value = todo_gateway::app::DEFAULT_FAVICON_PATH)]
    pub favicon_path: PathBuf,

    #[arg(long, env = REQUEST_TIMEOUT_ENV, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_in_memory() {
        let cli = CLI::try_parse_from(["todo-gateway"]).unwrap();
        assert_eq!(cli.storage, StorageBackendArg::InMemory);
        assert_eq!(cli.listen_addr.to_string(), DEFAULT_LISTEN_ADDR);
        assert_eq!(cli.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    fn mongodb_requires_uri() {
        assert!(CLI::try_parse_from(["todo-gateway", "--storage", "mongodb"]).is_err());

        let cli = CLI::try_parse_from([
            "todo-gateway",
            "--storage",
            "mongodb",
            "--mongodb-uri",
            "mongodb://localhost:27017",
        ])
        .unwrap();
        assert_eq!(cli.storage, StorageBackendArg::Mongodb);
        assert_eq!(cli.mongodb_database, "todos");
    }

    #[test]
    fn verifies_command() {
        use clap::CommandFactory;
        CLI::command().debug_assert();
    }
}
