//! Shared utilities for end-to-end tests.

use std::net::SocketAddr;
use std::time::Duration;

use site_router::{HttpServer, Shutdown, SiteConfig};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[allow(dead_code)]
pub const ADMIN_KEY: &str = "e2e-admin-key";

/// A server running on an ephemeral local port.
pub struct RunningSite {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub task: JoinHandle<()>,
}

impl RunningSite {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger shutdown and wait for the server task to finish.
    pub async fn stop(self) {
        self.shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), self.task)
            .await
            .expect("server did not stop in time")
            .expect("server task panicked");
    }
}

/// Default config with a known admin key and a loopback address.
#[allow(dead_code)]
pub fn test_config() -> SiteConfig {
    let mut config = SiteConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.admin.api_key = ADMIN_KEY.into();
    config
}

/// Build the server from `config` and serve it in the background.
pub async fn start_site(config: SiteConfig) -> RunningSite {
    let server = HttpServer::from_config(config).expect("route table should build");
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let task = tokio::spawn(async move {
        server
            .run(listener, server_shutdown)
            .await
            .expect("server failed");
    });

    RunningSite { addr, shutdown, task }
}

/// Client that never pools or proxies, so each test sees a fresh connection.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
