use tiberius::{Client, SqlBrowser};
use tokio::net::TcpStream;
use tokio::runtime::{Builder, Runtime};
use tokio_util::compat::TokioAsyncWriteCompatExt;

use super::config::{MssqlClient, MssqlOptions};
use crate::error::SqlExtError;

/// Helper function to create a new MSSQL connection
///
/// Named instances are resolved through the SQL Browser service.
///
/// # Errors
/// Returns `SqlExtError::ConnectionError` if the TCP connection fails, otherwise the
/// tiberius login error.
pub async fn create_mssql_client(options: &MssqlOptions) -> Result<MssqlClient, SqlExtError> {
    let config = options.tiberius_config();

    let tcp = if options.instance_name.is_some() {
        TcpStream::connect_named(&config).await?
    } else {
        TcpStream::connect(config.get_addr())
            .await
            .map_err(|e| SqlExtError::ConnectionError(format!("TCP connection error: {e}")))?
    };
    tcp.set_nodelay(true)
        .map_err(|e| SqlExtError::ConnectionError(format!("TCP configuration error: {e}")))?;

    Ok(Client::connect(config, tcp.compat_write()).await?)
}

/// A SQL Server connection usable from blocking code.
///
/// Owns a current-thread tokio runtime; every helper call blocks on it for exactly one
/// round trip.
pub struct MssqlConnection {
    pub(crate) runtime: Runtime,
    pub(crate) client: MssqlClient,
}

impl MssqlConnection {
    /// Open a connection with its own runtime.
    ///
    /// # Errors
    /// Returns `SqlExtError::ConnectionError` if the runtime cannot be built or the server
    /// cannot be reached, or the tiberius error from login.
    pub fn connect(options: &MssqlOptions) -> Result<Self, SqlExtError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| SqlExtError::ConnectionError(format!("tokio runtime error: {e}")))?;
        let client = runtime.block_on(create_mssql_client(options))?;
        tracing::debug!(server = %options.server, database = %options.database, "connected to SQL Server");
        Ok(Self { runtime, client })
    }
}
