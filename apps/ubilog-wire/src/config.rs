use config::{Config, ConfigError, Environment, File};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use ubilog_core::{Address, CoreError, DEFAULT_NET_PORT};

/// Peers a fresh node bootstraps from.
pub const DEFAULT_PEERS: [&str; 3] = ["127.0.0.1:42001", "127.0.0.1:42002", "127.0.0.1:42003"];

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WireConfig {
    /// Port assumed for peers listed without one.
    pub net_port: u16,
    #[serde(deserialize_with = "deserialize_list")]
    pub peers: Vec<String>,
    pub log_level: String,
}

fn deserialize_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ListVisitor;

    impl<'de> Visitor<'de> for ListVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a sequence of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(split_list(value))
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: de::SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(element) = seq.next_element()? {
                vec.push(element);
            }
            Ok(vec)
        }
    }

    deserializer.deserialize_any(ListVisitor)
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split([',', ';'])
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl WireConfig {
    /// Layers defaults, an optional file, then `UBILOG_*` environment.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("net_port", i64::from(DEFAULT_NET_PORT))?
            .set_default(
                "peers",
                DEFAULT_PEERS.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
            )?
            .set_default("log_level", "info")?;

        if let Some(path) = config_path {
            if path.extension().and_then(|ext| ext.to_str()) == Some("env") {
                // .env files feed the environment source below
                match dotenvy::from_path(&path) {
                    Ok(_) => tracing::info!("loaded environment from {}", path.display()),
                    Err(err) => {
                        tracing::warn!("failed to load .env from {}: {}", path.display(), err)
                    }
                }
            } else {
                builder = builder.add_source(File::from(path));
            }
        }

        builder = builder.add_source(Environment::with_prefix("UBILOG").try_parsing(true));

        builder.build()?.try_deserialize()
    }

    /// Parses configured peers, applying `net_port` where none is given.
    pub fn peer_addresses(&self) -> Result<Vec<Address>, CoreError> {
        self.peers
            .iter()
            .map(|peer| Address::parse_with_default_port(peer, self.net_port))
            .collect()
    }
}
