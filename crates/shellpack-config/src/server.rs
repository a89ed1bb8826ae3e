//! Dev server binding and HMR transport negotiation.

use std::fmt;
use std::io::ErrorKind;
use std::net::TcpListener;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ConfigError, Result};

/// Port the desktop shell loads the frontend from.
pub const DEFAULT_DEV_PORT: u16 = 1420;

/// Distance between the dev server port and the HMR port.
pub const HMR_PORT_OFFSET: u16 = 1;

/// Address probed when the host binding is disabled.
const LOOPBACK: &str = "127.0.0.1";

/// Where the dev server listens.
///
/// Serialized as `false` when disabled, or as the address string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum HostBinding {
    /// Leave the runtime on its loopback default.
    #[default]
    Disabled,
    /// Listen on this address so other hosts can connect.
    Address(String),
}

impl HostBinding {
    pub fn address(&self) -> Option<&str> {
        match self {
            Self::Disabled => None,
            Self::Address(address) => Some(address),
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    /// Host a client on this machine would dial.
    pub fn dial_host(&self) -> &str {
        match self {
            Self::Disabled => "localhost",
            Self::Address(address) => address,
        }
    }

    fn probe_host(&self) -> &str {
        match self {
            Self::Disabled => LOOPBACK,
            Self::Address(address) => address,
        }
    }
}

impl From<Option<String>> for HostBinding {
    fn from(host: Option<String>) -> Self {
        host.map_or(Self::Disabled, Self::Address)
    }
}

impl fmt::Display for HostBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => write!(f, "false"),
            Self::Address(address) => write!(f, "{address}"),
        }
    }
}

impl Serialize for HostBinding {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Disabled => serializer.serialize_bool(false),
            Self::Address(address) => serializer.serialize_str(address),
        }
    }
}

impl<'de> Deserialize<'de> for HostBinding {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Address(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(false) => Ok(Self::Disabled),
            // `true` means every interface, as the dev server runtime reads it.
            Raw::Flag(true) => Ok(Self::Address("0.0.0.0".to_string())),
            Raw::Address(address) if address.is_empty() => Ok(Self::Disabled),
            Raw::Address(address) => Ok(Self::Address(address)),
        }
    }
}

/// Transport scheme for the HMR socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HmrProtocol {
    /// Plain websocket.
    #[default]
    Ws,
    /// Secure websocket.
    Wss,
}

impl HmrProtocol {
    pub fn scheme(self) -> &'static str {
        match self {
            Self::Ws => "ws",
            Self::Wss => "wss",
        }
    }
}

impl fmt::Display for HmrProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

/// Explicit HMR endpoint for clients on another host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HmrTransportConfig {
    pub protocol: HmrProtocol,
    pub host: String,
    pub port: u16,
}

impl HmrTransportConfig {
    pub fn url(&self) -> String {
        format!("{}://{}", self.protocol, authority(&self.host, self.port))
    }
}

/// Dev server settings handed to the external runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServerConfig {
    pub port: u16,

    /// Fail instead of falling back to another port.
    pub strict_port: bool,

    pub host: HostBinding,

    /// Absent means same-origin HMR.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hmr: Option<HmrTransportConfig>,

    #[serde(default)]
    pub watch_exclusions: Vec<String>,
}

impl DevServerConfig {
    /// URL the desktop shell loads.
    pub fn url(&self) -> String {
        format!("http://{}", authority(self.host.dial_host(), self.port))
    }

    /// Check the invariants the binder guarantees.
    ///
    /// Values deserialized from elsewhere go through this before use.
    pub fn validate(&self) -> Result<()> {
        if !self.strict_port {
            return Err(ConfigError::SchemaValidation {
                message: "strictPort must be true".to_string(),
                hint: Some("The desktop shell loads a fixed port; falling back is not allowed".to_string()),
            });
        }

        if let Some(hmr) = &self.hmr {
            if hmr.port == self.port {
                return Err(ConfigError::PortCollision {
                    port: self.port,
                    hmr_port: hmr.port,
                });
            }
        }

        Ok(())
    }

    /// Ports that must be free before the runtime starts, main port first.
    pub fn required_ports(&self) -> Vec<u16> {
        let mut ports = vec![self.port];
        if let Some(hmr) = &self.hmr {
            ports.push(hmr.port);
        }
        ports
    }
}

/// Builds a [`DevServerConfig`] from the resolved reachability host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevServerBinder {
    port: u16,
    secure_hmr: bool,
}

impl Default for DevServerBinder {
    fn default() -> Self {
        Self::new(DEFAULT_DEV_PORT)
    }
}

impl DevServerBinder {
    pub fn new(port: u16) -> Self {
        Self {
            port,
            secure_hmr: false,
        }
    }

    /// Use `wss` for the HMR transport.
    pub fn with_secure_hmr(mut self, secure: bool) -> Self {
        self.secure_hmr = secure;
        self
    }

    /// Bind the dev server.
    ///
    /// With a reachable host the server listens on it and HMR gets its own
    /// endpoint one port up, since a client on another host cannot rely on
    /// same-origin reload. Without one, `hmr` is left out entirely.
    pub fn bind(
        &self,
        reachable_host: Option<String>,
        watch_exclusions: Vec<String>,
    ) -> Result<DevServerConfig> {
        let hmr = match &reachable_host {
            Some(host) => Some(HmrTransportConfig {
                protocol: if self.secure_hmr {
                    HmrProtocol::Wss
                } else {
                    HmrProtocol::Ws
                },
                host: host.clone(),
                port: self.hmr_port()?,
            }),
            None => None,
        };

        let config = DevServerConfig {
            port: self.port,
            strict_port: true,
            host: HostBinding::from(reachable_host),
            hmr,
            watch_exclusions,
        };
        config.validate()?;

        tracing::debug!(
            port = config.port,
            host = %config.host,
            hmr = config.hmr.as_ref().map(HmrTransportConfig::url),
            "dev server bound"
        );

        Ok(config)
    }

    fn hmr_port(&self) -> Result<u16> {
        self.port
            .checked_add(HMR_PORT_OFFSET)
            .ok_or(ConfigError::HmrPortOverflow(self.port))
    }
}

/// `host:port`, with IPv6 literals bracketed.
fn authority(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

/// Fail with [`ConfigError::PortUnavailable`] if any port the server needs is taken.
///
/// The probe listener is dropped immediately; the runtime binds for real.
pub fn ensure_ports_available(config: &DevServerConfig) -> Result<()> {
    let host = config.host.probe_host();
    for port in config.required_ports() {
        probe_port(host, port)?;
    }
    Ok(())
}

/// Try to bind `host:port` once. Never looks for an alternative.
pub fn probe_port(host: &str, port: u16) -> Result<()> {
    match TcpListener::bind((host, port)) {
        Ok(listener) => {
            drop(listener);
            tracing::debug!(host, port, "port available");
            Ok(())
        }
        Err(err) if err.kind() == ErrorKind::AddrInUse => Err(ConfigError::PortUnavailable {
            host: host.to_string(),
            port,
        }),
        Err(source) => Err(ConfigError::PortProbe {
            host: host.to_string(),
            port,
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn local_binding_has_no_hmr() {
        let config = DevServerBinder::default().bind(None, vec![]).unwrap();
        assert_eq!(config.port, 1420);
        assert!(config.strict_port);
        assert_eq!(config.host, HostBinding::Disabled);
        assert!(config.hmr.is_none());
    }

    #[test]
    fn reachable_binding_gets_hmr_one_port_up() {
        let config = DevServerBinder::default()
            .bind(Some("192.168.1.50".to_string()), vec![])
            .unwrap();

        assert_eq!(config.host, HostBinding::Address("192.168.1.50".to_string()));
        assert_eq!(
            config.hmr,
            Some(HmrTransportConfig {
                protocol: HmrProtocol::Ws,
                host: "192.168.1.50".to_string(),
                port: 1421,
            })
        );
    }

    #[test]
    fn secure_hmr_uses_wss() {
        let config = DevServerBinder::default()
            .with_secure_hmr(true)
            .bind(Some("dev.local".to_string()), vec![])
            .unwrap();
        let hmr = config.hmr.unwrap();
        assert_eq!(hmr.protocol, HmrProtocol::Wss);
        assert_eq!(hmr.url(), "wss://dev.local:1421");
    }

    #[test]
    fn max_port_cannot_host_hmr() {
        let err = DevServerBinder::new(u16::MAX)
            .bind(Some("10.0.0.1".to_string()), vec![])
            .unwrap_err();
        assert!(matches!(err, ConfigError::HmrPortOverflow(65535)));
    }

    #[test]
    fn max_port_is_fine_without_hmr() {
        let config = DevServerBinder::new(u16::MAX).bind(None, vec![]).unwrap();
        assert_eq!(config.port, u16::MAX);
    }

    #[test]
    fn serializes_disabled_host_as_false_and_omits_hmr() {
        let config = DevServerBinder::default().bind(None, vec![]).unwrap();
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(
            value,
            json!({
                "port": 1420,
                "strictPort": true,
                "host": false,
                "watchExclusions": []
            })
        );
    }

    #[test]
    fn host_binding_deserializes_flags_and_strings() {
        let disabled: HostBinding = serde_json::from_value(json!(false)).unwrap();
        assert_eq!(disabled, HostBinding::Disabled);

        let all: HostBinding = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(all, HostBinding::Address("0.0.0.0".to_string()));

        let lan: HostBinding = serde_json::from_value(json!("192.168.1.50")).unwrap();
        assert_eq!(lan.address(), Some("192.168.1.50"));
    }

    #[test]
    fn validate_rejects_colliding_ports() {
        let config = DevServerConfig {
            port: 1420,
            strict_port: true,
            host: HostBinding::Address("10.0.0.1".to_string()),
            hmr: Some(HmrTransportConfig {
                protocol: HmrProtocol::Ws,
                host: "10.0.0.1".to_string(),
                port: 1420,
            }),
            watch_exclusions: vec![],
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::PortCollision { .. }
        ));
    }

    #[test]
    fn validate_rejects_loose_port() {
        let mut config = DevServerBinder::default().bind(None, vec![]).unwrap();
        config.strict_port = false;
        assert!(config.validate().is_err());
    }

    #[test]
    fn url_uses_dial_host() {
        let local = DevServerBinder::default().bind(None, vec![]).unwrap();
        assert_eq!(local.url(), "http://localhost:1420");

        let lan = DevServerBinder::default()
            .bind(Some("192.168.1.50".to_string()), vec![])
            .unwrap();
        assert_eq!(lan.url(), "http://192.168.1.50:1420");
    }

    #[test]
    fn urls_bracket_ipv6_hosts() {
        let config = DevServerBinder::default()
            .bind(Some("::1".to_string()), vec![])
            .unwrap();
        assert_eq!(config.url(), "http://[::1]:1420");
        assert_eq!(config.hmr.unwrap().url(), "ws://[::1]:1421");

        let bracketed = DevServerBinder::default()
            .bind(Some("[fe80::1]".to_string()), vec![])
            .unwrap();
        assert_eq!(bracketed.url(), "http://[fe80::1]:1420");
    }

    #[test]
    fn probe_reports_busy_port() {
        let listener = match TcpListener::bind((LOOPBACK, 0)) {
            Ok(listener) => listener,
            Err(err) => {
                eprintln!("Skipping probe_reports_busy_port: unable to bind socket ({err})");
                return;
            }
        };
        let port = listener.local_addr().unwrap().port();

        let err = probe_port(LOOPBACK, port).unwrap_err();
        match err {
            ConfigError::PortUnavailable { host, port: busy } => {
                assert_eq!(host, LOOPBACK);
                assert_eq!(busy, port);
            }
            other => panic!("expected PortUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn probe_accepts_free_port() {
        let port = match TcpListener::bind((LOOPBACK, 0)) {
            Ok(listener) => listener.local_addr().unwrap().port(),
            Err(err) => {
                eprintln!("Skipping probe_accepts_free_port: unable to bind socket ({err})");
                return;
            }
        };
        assert!(probe_port(LOOPBACK, port).is_ok());
    }
}
