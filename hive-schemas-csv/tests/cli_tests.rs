//! Command-line parsing and configuration resolution tests.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use hive_schemas_core::{AuthMechanism, Engine, Quoting, SchemaDumpError};
use hive_schemas_csv::{Cli, QuoteChar, command, try_parse_from};

const CLEARED_ENV: [(&str, Option<&str>); 9] = [
    ("HIVESERVER2_HOST", None),
    ("HIVE_HOST", None),
    ("IMPALA_HOST", None),
    ("HOST", None),
    ("HIVESERVER2_PORT", None),
    ("HIVE_PORT", None),
    ("IMPALA_PORT", None),
    ("PORT", None),
    ("HIVE_SCHEMAS_ODBC_DRIVER", None),
];

fn parse(engine: Engine, args: &[&str]) -> Cli {
    let argv = std::iter::once(hive_schemas_csv::bin_name(engine)).chain(args.iter().copied());
    try_parse_from(engine, argv).expect("arguments should parse")
}

/// Runs `f` with all host/port/driver variables cleared except `overrides`.
fn with_env<F: FnOnce()>(overrides: &[(&str, &str)], f: F) {
    let vars: Vec<(&str, Option<&str>)> = CLEARED_ENV
        .iter()
        .map(|(key, _)| {
            let value = overrides
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| *value);
            (*key, value)
        })
        .collect();
    temp_env::with_vars(vars, f);
}

mod parsing {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = parse(Engine::Hive, &[]);
        assert_eq!(cli.host, None);
        assert_eq!(cli.port, None);
        assert!(!cli.kerberos);
        assert!(!cli.ssl);
        assert_eq!(cli.delimiter, b',');
        assert_eq!(cli.quotechar, QuoteChar(Some(b'"')));
        assert_eq!(cli.escapechar, None);
        assert_eq!(cli.verbose, 0);

        let output = cli.output_config();
        assert_eq!(output.quoting(), Quoting::Always);
    }

    #[test]
    fn test_short_flags() {
        let cli = parse(
            Engine::Hive,
            &[
                "-H", "hs2.example.com", "-P", "10001", "-k", "-n", "hive2", "-S", "-d", ";",
                "-Q", "'", "-E", "\\", "-vv",
            ],
        );
        assert_eq!(cli.host.as_deref(), Some("hs2.example.com"));
        assert_eq!(cli.port, Some(10001));
        assert!(cli.kerberos);
        assert_eq!(cli.krb5_service_name.as_deref(), Some("hive2"));
        assert!(cli.ssl);
        assert_eq!(cli.delimiter, b';');
        assert_eq!(cli.quotechar, QuoteChar(Some(b'\'')));
        assert_eq!(cli.escapechar, Some(b'\\'));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_empty_quotechar_disables_quoting() {
        let cli = parse(Engine::Hive, &["--quotechar="]);
        assert_eq!(cli.quotechar, QuoteChar(None));
        assert_eq!(cli.output_config().quoting(), Quoting::Never);
    }

    #[test]
    fn test_non_integer_port_is_usage_error() {
        let result = try_parse_from(Engine::Hive, ["hive_schemas_csv", "--port", "abc"]);
        let error = result.expect_err("port must be numeric");
        assert_eq!(error.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_multi_character_delimiter_is_usage_error() {
        let result = try_parse_from(Engine::Hive, ["hive_schemas_csv", "--delimiter", "::"]);
        assert!(result.is_err());

        let result = try_parse_from(Engine::Hive, ["hive_schemas_csv", "--delimiter="]);
        assert!(result.is_err());
    }

    #[test]
    fn test_command_is_named_after_entry_point() {
        assert_eq!(command(Engine::Hive).get_name(), "hive_schemas_csv");
        assert_eq!(command(Engine::Impala).get_name(), "impala_schemas_csv");
        command(Engine::Hive).debug_assert();
    }
}

mod resolution {
    use super::*;

    #[test]
    fn test_env_hive_defaults() {
        with_env(&[], || {
            let config = parse(Engine::Hive, &[])
                .connection_config(Engine::Hive)
                .unwrap();
            assert_eq!(
                config.host,
                hive_schemas_core::adapters::config::environment::local_fqdn()
            );
            assert_eq!(config.port, 10000);
            assert_eq!(config.service_name, "hive");
            assert_eq!(config.auth_mechanism, None);
            assert_eq!(config.database, None);
            assert_eq!(config.driver, "Cloudera ODBC Driver for Apache Hive");
        });
    }

    #[test]
    fn test_env_impala_defaults() {
        with_env(&[], || {
            let config = parse(Engine::Impala, &[])
                .connection_config(Engine::Impala)
                .unwrap();
            assert_eq!(config.port, 21050);
            assert_eq!(config.service_name, "impala");
            assert_eq!(config.driver, "Cloudera ODBC Driver for Impala");
        });
    }

    #[test]
    fn test_env_impala_keeps_explicit_values() {
        with_env(&[], || {
            let config = parse(Engine::Impala, &["--port", "10000", "-n", "hive"])
                .connection_config(Engine::Impala)
                .unwrap();
            assert_eq!(config.port, 10000);
            assert_eq!(config.service_name, "hive");
        });
    }

    #[test]
    fn test_env_variables_fill_missing_flags() {
        with_env(
            &[
                ("HIVESERVER2_HOST", "hs2.example.com"),
                ("HIVE_HOST", "hive.example.com"),
                ("HIVE_PORT", "10500"),
                ("HIVE_SCHEMAS_ODBC_DRIVER", "Hive Driver"),
            ],
            || {
                let config = parse(Engine::Hive, &[])
                    .connection_config(Engine::Hive)
                    .unwrap();
                assert_eq!(config.host, "hs2.example.com");
                assert_eq!(config.port, 10500);
                assert_eq!(config.driver, "Hive Driver");
            },
        );
    }

    #[test]
    fn test_env_flags_override_variables() {
        with_env(&[("HIVESERVER2_HOST", "hs2.example.com"), ("PORT", "1")], || {
            let config = parse(Engine::Hive, &["-H", "flag.example.com", "-P", "10002"])
                .connection_config(Engine::Hive)
                .unwrap();
            assert_eq!(config.host, "flag.example.com");
            assert_eq!(config.port, 10002);
        });
    }

    #[test]
    fn test_env_invalid_port_variable_is_configuration_error() {
        with_env(&[("HIVESERVER2_PORT", "not-a-port")], || {
            let result = parse(Engine::Hive, &[]).connection_config(Engine::Hive);
            assert!(matches!(result, Err(SchemaDumpError::Configuration { .. })));
        });
    }

    #[test]
    fn test_env_kerberos_and_ssl() {
        with_env(&[], || {
            let config = parse(Engine::Hive, &["--kerberos", "--ssl"])
                .connection_config(Engine::Hive)
                .unwrap();
            assert_eq!(config.auth_mechanism, Some(AuthMechanism::Gssapi));
            assert!(config.use_ssl);
        });
    }
}

#[cfg(not(feature = "odbc"))]
mod dumping {
    use super::*;

    #[tokio::test]
    async fn test_dump_without_client_backend_fails_before_output() {
        let config = hive_schemas_core::ConnectionConfig::new("localhost".to_string());
        let output = parse(Engine::Hive, &[]).output_config();

        let error = hive_schemas_csv::dump(&config, &output)
            .await
            .expect_err("no backend compiled in");
        assert!(matches!(
            error.downcast_ref::<SchemaDumpError>(),
            Some(SchemaDumpError::UnsupportedFeature { .. })
        ));
    }
}

#[cfg(feature = "odbc")]
mod dumping_odbc {
    use super::*;

    #[tokio::test]
    async fn test_dump_with_missing_driver_fails_to_connect() {
        let config = hive_schemas_core::ConnectionConfig::new("localhost".to_string())
            .with_driver("hive-schemas-csv missing test driver".to_string());
        let output = parse(Engine::Hive, &[]).output_config();

        let error = hive_schemas_csv::dump(&config, &output)
            .await
            .expect_err("driver is not installed");
        assert!(matches!(
            error.downcast_ref::<SchemaDumpError>(),
            Some(SchemaDumpError::Connection { .. })
        ));
    }
}
