use std::{env, net::SocketAddr};

use anyhow::{bail, Context};
use kilo_nerve::NerveConfig;

pub const SERVICE_NAME: &str = "meds";

/// Where medication events and views are kept
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Store {
    Dynamo,
    Memory,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub store: Store,
    /// Serve on this address instead of running under Lambda
    pub listen_addr: Option<SocketAddr>,
    pub nerve: NerveConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = match lookup("MEDS_STORE").as_deref().map(str::trim) {
            None | Some("dynamo") => Store::Dynamo,
            Some("memory") => Store::Memory,
            Some(other) => bail!("MEDS_STORE must be dynamo or memory, got {:?}", other),
        };

        let listen_addr = lookup("MEDS_LISTEN_ADDR")
            .map(|raw| {
                raw.trim()
                    .parse::<SocketAddr>()
                    .with_context(|| format!("MEDS_LISTEN_ADDR is not a socket address: {}", raw))
            })
            .transpose()?;

        let nerve = NerveConfig::from_lookup(SERVICE_NAME, &lookup)?;

        Ok(Self {
            store,
            listen_addr,
            nerve,
        })
    }
}
