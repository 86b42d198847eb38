//! Host and port resolution: explicit flag, then environment, then default.

use crate::models::Engine;
use crate::{Result, error::SchemaDumpError};

/// Environment variables consulted for the host, first non-empty wins.
pub const HOST_ENV_VARS: [&str; 4] = ["HIVESERVER2_HOST", "HIVE_HOST", "IMPALA_HOST", "HOST"];

/// Environment variables consulted for the port, first non-empty wins.
pub const PORT_ENV_VARS: [&str; 4] = ["HIVESERVER2_PORT", "HIVE_PORT", "IMPALA_PORT", "PORT"];

/// Returns the name and value of the first set, non-empty variable in `keys`.
pub fn first_env(keys: &[&str]) -> Option<(String, String)> {
    keys.iter().find_map(|key| {
        std::env::var(key)
            .ok()
            .filter(|value| !value.is_empty())
            .map(|value| ((*key).to_string(), value))
    })
}

/// Resolves the server host.
///
/// Order: `flag`, then [`HOST_ENV_VARS`], then [`local_fqdn`].
pub fn resolve_host(flag: Option<&str>) -> String {
    if let Some(host) = flag {
        return host.to_string();
    }
    if let Some((key, host)) = first_env(&HOST_ENV_VARS) {
        tracing::debug!("Using host from ${}", key);
        return host;
    }
    local_fqdn()
}

/// Resolves the server port.
///
/// Order: `flag`, then [`PORT_ENV_VARS`], then the engine default. The Impala
/// default of 21050 only replaces the built-in 10000; a port given by flag or
/// environment is used as is, even when it is 10000.
///
/// # Errors
/// Returns a configuration error if the environment value is not a valid
/// port number.
pub fn resolve_port(flag: Option<u16>, engine: Engine) -> Result<u16> {
    if let Some(port) = flag {
        return Ok(port);
    }
    if let Some((key, value)) = first_env(&PORT_ENV_VARS) {
        tracing::debug!("Using port from ${}", key);
        return value.trim().parse::<u16>().map_err(|e| {
            SchemaDumpError::configuration(format!("invalid port in ${key}: {value:?} ({e})"))
        });
    }
    if engine == Engine::Impala {
        tracing::info!(
            "called as impala, setting port to {}",
            Engine::IMPALA_PORT
        );
    }
    Ok(engine.default_port())
}

/// Resolves the Kerberos service principal name.
pub fn resolve_service_name(flag: Option<&str>, engine: Engine) -> String {
    flag.map_or_else(
        || {
            if engine == Engine::Impala {
                tracing::info!("called as impala, setting service principal to impala");
            }
            engine.default_service_name().to_string()
        },
        ToString::to_string,
    )
}

/// Returns the fully qualified domain name of the local machine.
///
/// Looks up the addresses of the hostname and reverse-resolves each one; the
/// first name containing a dot wins. Falls back to the bare hostname when
/// resolution fails or yields no qualified name.
pub fn local_fqdn() -> String {
    let hostname = gethostname::gethostname().to_string_lossy().into_owned();

    let qualified = dns_lookup::lookup_host(&hostname)
        .ok()
        .into_iter()
        .flatten()
        .filter_map(|addr| dns_lookup::lookup_addr(&addr).ok())
        .find(|name| name.contains('.'));

    match qualified {
        Some(name) => name,
        None if hostname.is_empty() => "localhost".to_string(),
        None => hostname,
    }
}
