use std::fmt;

use serde::Deserialize;
use tiberius::{AuthMethod, Config as TiberiusConfig};
use tokio::net::TcpStream;
use tokio_util::compat::Compat;

/// Type alias for SQL Server client
pub type MssqlClient = tiberius::Client<Compat<TcpStream>>;

fn default_trust_cert() -> bool {
    true
}

/// Options for connecting to SQL Server.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct MssqlOptions {
    pub server: String,
    pub database: String,
    pub user: String,
    pub password: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub instance_name: Option<String>,
    #[serde(default = "default_trust_cert")]
    pub trust_cert: bool,
}

impl MssqlOptions {
    #[must_use]
    pub fn new(
        server: impl Into<String>,
        database: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            server: server.into(),
            database: database.into(),
            user: user.into(),
            password: password.into(),
            port: None,
            instance_name: None,
            trust_cert: true,
        }
    }

    #[must_use]
    pub fn with_port(mut self, port: Option<u16>) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_instance_name(mut self, instance_name: Option<String>) -> Self {
        self.instance_name = instance_name;
        self
    }

    #[must_use]
    pub fn with_trust_cert(mut self, trust_cert: bool) -> Self {
        self.trust_cert = trust_cert;
        self
    }

    pub(crate) fn tiberius_config(&self) -> TiberiusConfig {
        let mut config = TiberiusConfig::new();
        config.host(&self.server);
        config.database(&self.database);
        config.port(self.port.unwrap_or(1433));
        config.authentication(AuthMethod::sql_server(&self.user, &self.password));
        if let Some(instance) = &self.instance_name {
            config.instance_name(instance);
        }
        if self.trust_cert {
            config.trust_cert();
        }
        config
    }
}

impl fmt::Debug for MssqlOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MssqlOptions")
            .field("server", &self.server)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .field("port", &self.port)
            .field("instance_name", &self.instance_name)
            .field("trust_cert", &self.trust_cert)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_defaults() {
        let opts: MssqlOptions = serde_json::from_str(
            r#"{"server":"db","database":"app","user":"sa","password":"pw"}"#,
        )
        .unwrap();
        assert_eq!(opts, MssqlOptions::new("db", "app", "sa", "pw"));
        assert!(opts.trust_cert);
    }

    #[test]
    fn debug_redacts_password() {
        let opts = MssqlOptions::new("db", "app", "sa", "hunter2");
        assert!(!format!("{opts:?}").contains("hunter2"));
    }
}
