use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 8888;

/// Where the receiver listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiverConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl ReceiverConfig {
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Self::default()
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// URL advertised in the startup banner. Every path is accepted, `/webhook`
    /// is just the one senders are told to use.
    pub fn webhook_url(&self) -> String {
        format!("http://localhost:{}/webhook", self.port)
    }
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}
