use std::time::Duration;

/// Configuration for the websocket link.
#[derive(Clone, Debug)]
pub struct LinkConfig {
    host: String,
    port: u16,
    path: String,
    connect_timeout: Duration,
    send_timeout: Duration,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            path: "/opencv".to_string(),
            connect_timeout: Duration::from_secs(3),
            send_timeout: Duration::from_secs(1),
        }
    }
}

impl LinkConfig {
    /// Set the server host name or address.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the server port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the websocket route (e.g. "/opencv").
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Bound the connection handshake.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Bound one outbound frame push.
    pub fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = timeout;
        self
    }

    // Getters
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn send_timeout(&self) -> Duration {
        self.send_timeout
    }

    /// Full endpoint URL, `ws://{host}:{port}{path}`.
    pub fn url(&self) -> String {
        format!("ws://{}:{}{}", self.host, self.port, self.path)
    }
}
