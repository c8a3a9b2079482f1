//! Connection management for MongoDB
//!
//! This module provides connection management functionality including:
//! - Explicit connection establishment and termination
//! - Connection pool settings from configuration
//! - Reachability/authentication verification via ping
//! - Connection state tracking
//!
//! The manager is constructed at the call site and passed down; there is
//! no process-wide implicit client handle.

use std::sync::Arc;
use std::time::Duration;

use mongodb::{Client, Database, bson::doc, options::ClientOptions};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::ConnectionConfig;
use crate::error::{ConnectionError, Result};

/// MongoDB connection manager
///
/// Owns the client for the duration of a run: `connect` builds and
/// verifies it, `database` hands out handles, `disconnect` tears it down.
pub struct ConnectionManager {
    /// MongoDB client instance
    client: Option<Client>,

    /// Connection configuration
    config: ConnectionConfig,

    /// Current connection state
    state: Arc<RwLock<ConnectionState>>,

    /// Connection URI
    uri: String,
}

/// Connection state information
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not connected
    Disconnected,

    /// Currently connecting
    Connecting,

    /// Connected and ready
    Connected,

    /// Connection failed
    Failed(String),
}

impl ConnectionManager {
    /// Create a new connection manager
    ///
    /// # Arguments
    /// * `uri` - MongoDB connection URI
    /// * `config` - Connection configuration
    pub fn new(uri: String, config: ConnectionConfig) -> Self {
        Self {
            client: None,
            config,
            state: Arc::new(RwLock::new(ConnectionState::Disconnected)),
            uri,
        }
    }

    /// Establish and verify the connection
    ///
    /// Parses the URI, applies pool and timeout settings, constructs the
    /// client and pings the server. The driver connects lazily, so the
    /// ping is what actually verifies reachability and authentication;
    /// a failed ping is a global failure.
    ///
    /// # Returns
    /// * `Result<()>` - Success or connection error
    pub async fn connect(&mut self) -> Result<()> {
        self.set_state(ConnectionState::Connecting).await;

        let options = self.parse_uri().await?;
        let options = self.configure_options(options);

        let client = Client::with_options(options).map_err(|e| {
            ConnectionError::ConnectionFailed(e.to_string())
        })?;

        if let Err(e) = Self::ping(&client).await {
            let msg = e.inline_message();
            self.set_state(ConnectionState::Failed(msg.clone())).await;
            return Err(ConnectionError::PingFailed(msg).into());
        }

        info!("Connected to MongoDB");
        self.client = Some(client);
        self.set_state(ConnectionState::Connected).await;
        Ok(())
    }

    /// Disconnect from MongoDB
    ///
    /// Closes all connections and cleans up resources.
    pub async fn disconnect(&mut self) -> Result<()> {
        if let Some(client) = self.client.take() {
            client.shutdown().await;
            debug!("Disconnected from MongoDB");
        }
        self.set_state(ConnectionState::Disconnected).await;
        Ok(())
    }

    /// Get a database handle
    ///
    /// # Arguments
    /// * `name` - Database name
    ///
    /// # Returns
    /// * `Result<Database>` - Database handle, or `NotConnected`
    pub fn database(&self, name: &str) -> Result<Database> {
        Ok(self.client()?.database(name))
    }

    /// Get the MongoDB client
    ///
    /// # Returns
    /// * `Result<&Client>` - Reference to client, or `NotConnected`
    pub fn client(&self) -> Result<&Client> {
        self.client
            .as_ref()
            .ok_or_else(|| ConnectionError::NotConnected.into())
    }

    /// Get current connection state
    pub async fn state(&self) -> ConnectionState {
        self.state.read().await.clone()
    }

    /// Check if currently connected
    pub async fn is_connected(&self) -> bool {
        matches!(*self.state.read().await, ConnectionState::Connected)
    }

    /// Parse the connection URI into client options
    async fn parse_uri(&self) -> Result<ClientOptions> {
        // Do not echo the URI itself; it may carry credentials.
        ClientOptions::parse(&self.uri)
            .await
            .map_err(|e| ConnectionError::InvalidUri(e.to_string()).into())
    }

    /// Apply pool and timeout settings from configuration
    fn configure_options(&self, mut options: ClientOptions) -> ClientOptions {
        options.app_name = Some(format!("docdump/{}", env!("CARGO_PKG_VERSION")));
        options.max_pool_size = Some(self.config.max_pool_size);
        options.min_pool_size = Some(self.config.min_pool_size);
        options.connect_timeout = Some(Duration::from_secs(self.config.timeout));
        options.server_selection_timeout = Some(Duration::from_secs(self.config.timeout));
        options
    }

    /// Update connection state
    async fn set_state(&self, new_state: ConnectionState) {
        *self.state.write().await = new_state;
    }

    /// Verify the connection is alive and authenticated
    async fn ping(client: &Client) -> Result<()> {
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_state() {
        let state = ConnectionState::Disconnected;
        assert_eq!(state, ConnectionState::Disconnected);
    }

    #[test]
    fn test_new_manager_is_disconnected() {
        let manager = ConnectionManager::new(
            "mongodb://localhost:27017".to_string(),
            ConnectionConfig::default(),
        );
        tokio_test::block_on(async {
            assert_eq!(manager.state().await, ConnectionState::Disconnected);
            assert!(!manager.is_connected().await);
        });
        assert!(manager.client().is_err());
    }

    #[tokio::test]
    async fn test_parse_uri_rejects_garbage() {
        let manager =
            ConnectionManager::new("not a uri".to_string(), ConnectionConfig::default());
        assert!(manager.parse_uri().await.is_err());
    }

    #[tokio::test]
    async fn test_configure_options_applies_pool_settings() {
        let config = ConnectionConfig::default();
        let manager =
            ConnectionManager::new("mongodb://localhost:27017".to_string(), config.clone());

        let options = manager.parse_uri().await.unwrap();
        let options = manager.configure_options(options);

        assert_eq!(options.max_pool_size, Some(config.max_pool_size));
        assert_eq!(options.min_pool_size, Some(config.min_pool_size));
        assert_eq!(
            options.connect_timeout,
            Some(Duration::from_secs(config.timeout))
        );
    }

    #[tokio::test]
    async fn test_database_requires_connection() {
        let manager = ConnectionManager::new(
            "mongodb://localhost:27017".to_string(),
            ConnectionConfig::default(),
        );
        assert!(manager.database("produccion").is_err());
    }
}
