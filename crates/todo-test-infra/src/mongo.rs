use crate::Result;
use std::time::Duration;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::ImageExt;
use testcontainers::{ContainerAsync, GenericImage};
use typed_builder::TypedBuilder;

const MONGO_PORT: u16 = 27017;

#[derive(TypedBuilder)]
pub struct MongoServerConfig {
    #[builder(default = "7.0".to_string(), setter(into))]
    tag: String,
    #[builder(default = "todos".to_string(), setter(into))]
    database: String,
    #[builder(default = Duration::from_secs(60))]
    startup_timeout: Duration,
}

/// Test fixture for a disposable MongoDB server.
pub struct MongoServer {
    container: ContainerAsync<GenericImage>,
    config: MongoServerConfig,
}

impl MongoServer {
    /// Starts a standalone MongoDB container suitable for integration tests.
    pub async fn new(config: MongoServerConfig) -> Result<Self> {
        let container = GenericImage::new("mongo", config.tag.as_str())
            .with_exposed_port(MONGO_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stdout("Waiting for connections"))
            .with_startup_timeout(config.startup_timeout)
            .start()
            .await?;

        Ok(Self { container, config })
    }

    pub async fn host(&self) -> Result<String> {
        Ok(self.container.get_host().await?.to_string())
    }

    pub async fn port(&self) -> Result<u16> {
        Ok(self.container.get_host_port_ipv4(MONGO_PORT).await?)
    }

    /// Connection string for the container, without a database path.
    pub async fn uri(&self) -> Result<String> {
        let host = self.host().await?;
        let port = self.port().await?;
        Ok(format!("mongodb://{}:{}", host, port))
    }

    /// The database integration tests should use.
    pub fn database(&self) -> &str {
        &self.config.database
    }

    /// Returns the underlying container reference.
    pub fn container(&self) -> &ContainerAsync<GenericImage> {
        &self.container
    }
}
