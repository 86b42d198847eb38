//! HiveServer2 / Impala connection configuration.

/// SASL mechanism passed to the client library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMechanism {
    /// Kerberos via GSSAPI; a ticket must already exist (`kinit`)
    Gssapi,
}

impl std::fmt::Display for AuthMechanism {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gssapi => write!(f, "GSSAPI"),
        }
    }
}

/// Parameters for the single connection a dump uses.
///
/// Built once from flags, environment and defaults and never changed
/// afterwards.
///
/// # Example
/// ```rust
/// use hive_schemas_core::adapters::{AuthMechanism, ConnectionConfig};
///
/// let config = ConnectionConfig::new("hs2.example.com".to_string())
///     .with_port(10000)
///     .with_kerberos(true)
///     .with_service_name("hive".to_string());
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.auth_mechanism, Some(AuthMechanism::Gssapi));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database to open the session in; `None` for the top-level connection
    pub database: Option<String>,
    /// Whether to wrap the transport in TLS
    pub use_ssl: bool,
    /// SASL mechanism, `None` for no authentication
    pub auth_mechanism: Option<AuthMechanism>,
    /// Kerberos service principal name
    pub service_name: String,
    /// ODBC driver name used by the ODBC backend
    pub driver: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        let engine = crate::models::Engine::default();
        Self {
            host: "localhost".to_string(),
            port: engine.default_port(),
            database: None,
            use_ssl: false,
            auth_mechanism: None,
            service_name: engine.default_service_name().to_string(),
            driver: engine.default_odbc_driver().to_string(),
        }
    }
}

impl std::fmt::Display for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}{}",
            self.host,
            self.port,
            self.database
                .as_ref()
                .map_or_else(String::new, |db| format!("/{db}"))
        )
    }
}

impl ConnectionConfig {
    /// Validates connection configuration parameters.
    ///
    /// # Errors
    /// Returns a configuration error for an empty host, port 0 or an empty
    /// service name.
    pub fn validate(&self) -> crate::Result<()> {
        if self.host.trim().is_empty() {
            return Err(crate::error::SchemaDumpError::configuration(
                "host cannot be empty",
            ));
        }

        if self.port == 0 {
            return Err(crate::error::SchemaDumpError::configuration(
                "port must be greater than 0",
            ));
        }

        if self.service_name.trim().is_empty() {
            return Err(crate::error::SchemaDumpError::configuration(
                "krb5 service name cannot be empty",
            ));
        }

        Ok(())
    }

    /// Creates a new connection config with Hive defaults.
    pub fn new(host: String) -> Self {
        Self {
            host,
            ..Default::default()
        }
    }

    /// Builder method to set port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Builder method to set the session database.
    pub fn with_database(mut self, database: String) -> Self {
        self.database = Some(database);
        self
    }

    /// Builder method to enable or disable TLS.
    pub fn with_ssl(mut self, use_ssl: bool) -> Self {
        self.use_ssl = use_ssl;
        self
    }

    /// Builder method to enable Kerberos, which fixes the mechanism to GSSAPI.
    pub fn with_kerberos(mut self, kerberos: bool) -> Self {
        self.auth_mechanism = if kerberos {
            Some(AuthMechanism::Gssapi)
        } else {
            None
        };
        self
    }

    /// Builder method to set the Kerberos service principal name.
    pub fn with_service_name(mut self, service_name: String) -> Self {
        self.service_name = service_name;
        self
    }

    /// Builder method to set the ODBC driver name.
    pub fn with_driver(mut self, driver: String) -> Self {
        self.driver = driver;
        self
    }
}
