//! ODBC access to HiveServer2 and Impala.
//!
//! Cloudera's Hive and Impala ODBC drivers speak the HiveServer2 protocol,
//! including SASL/GSSAPI and TLS, so this backend only has to translate a
//! [`ConnectionConfig`] into a driver connection string.
//!
//! The connection string builder is always compiled; the driver-backed
//! connection needs the `odbc` feature and unixODBC at link time.

#[cfg(feature = "odbc")]
mod connection;

#[cfg(feature = "odbc")]
pub use connection::{OdbcConnection, OdbcCursor};

use super::{AuthMechanism, ConnectionConfig};

/// Quotes a connection string attribute value when it contains characters
/// that are significant to the ODBC connection string grammar.
fn attribute_value(value: &str) -> String {
    if value.contains([';', '{', '}', '=']) || value.trim() != value {
        format!("{{{}}}", value.replace('}', "}}"))
    } else {
        value.to_string()
    }
}

/// Builds the driver connection string for `config`.
///
/// # Example
/// ```rust
/// use hive_schemas_core::adapters::{ConnectionConfig, odbc::connection_string};
///
/// let config = ConnectionConfig::new("hs2.example.com".to_string()).with_ssl(true);
/// let dsn = connection_string(&config);
///
/// assert!(dsn.contains("Host=hs2.example.com;"));
/// assert!(dsn.contains("SSL=1;"));
/// ```
pub fn connection_string(config: &ConnectionConfig) -> String {
    let mut attributes = vec![
        ("Driver", format!("{{{}}}", config.driver.replace('}', "}}"))),
        ("Host", attribute_value(&config.host)),
        ("Port", config.port.to_string()),
    ];

    if let Some(database) = &config.database {
        attributes.push(("Schema", attribute_value(database)));
    }

    match config.auth_mechanism {
        Some(AuthMechanism::Gssapi) => {
            attributes.push(("AuthMech", "1".to_string()));
            attributes.push(("KrbServiceName", attribute_value(&config.service_name)));
            // Hive and Impala drivers name the service host attribute differently
            attributes.push(("KrbHostFQDN", attribute_value(&config.host)));
            attributes.push(("KrbFQDN", attribute_value(&config.host)));
        }
        None => attributes.push(("AuthMech", "0".to_string())),
    }

    if config.use_ssl {
        attributes.push(("SSL", "1".to_string()));
    }

    attributes
        .into_iter()
        .map(|(key, value)| format!("{key}={value};"))
        .collect()
}
