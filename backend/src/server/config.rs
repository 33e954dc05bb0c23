//! HTTP server configuration object.

use std::net::SocketAddr;

use grace::domain::Storage;

/// Everything [`super::create_server`] needs to bind and serve.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) storage: Storage,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, storage: Storage) -> Self {
        Self { bind_addr, storage }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
