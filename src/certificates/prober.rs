// Certificate Prober - Fetch the leaf certificate expiry from a live TLS endpoint

use crate::Result;
use crate::config::ProbeSettings;
use crate::error::DeadlineError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rustls::{ClientConfig, RootCertStore};
use rustls_pki_types::{CertificateDer, ServerName};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_rustls::TlsConnector;
use x509_parser::prelude::*;

/// Anything that can report a host's certificate expiry
#[async_trait]
pub trait CertificateProbe: Send + Sync {
    /// Return the `NotAfter` instant of the host's leaf certificate
    async fn probe(&self, hostname: &str) -> Result<DateTime<Utc>>;
}

/// Probes hosts over TCP + TLS using rustls
pub struct TlsProber {
    port: u16,
    connect_timeout: Duration,
    handshake_timeout: Duration,
    connector: TlsConnector,
}

impl TlsProber {
    /// Create a prober trusting the webpki root store
    pub fn new(settings: &ProbeSettings) -> Result<Self> {
        let mut root_store = RootCertStore::empty();
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        Self::with_roots(settings, root_store)
    }

    /// Create a prober that additionally trusts `root`
    pub fn with_root_certificate(
        settings: &ProbeSettings,
        root: CertificateDer<'static>,
    ) -> Result<Self> {
        let mut root_store = RootCertStore::empty();
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        root_store
            .add(root)
            .map_err(|e| DeadlineError::Configuration {
                message: format!("Invalid trust anchor: {}", e),
            })?;

        Self::with_roots(settings, root_store)
    }

    fn with_roots(settings: &ProbeSettings, root_store: RootCertStore) -> Result<Self> {
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let config = ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()
            .map_err(|e| DeadlineError::Configuration {
                message: format!("Failed to build TLS client config: {}", e),
            })?
            .with_root_certificates(root_store)
            .with_no_client_auth();

        Ok(Self {
            port: settings.port,
            connect_timeout: settings.connect_timeout(),
            handshake_timeout: settings.handshake_timeout(),
            connector: TlsConnector::from(Arc::new(config)),
        })
    }

    /// Override connect and handshake timeouts
    pub fn with_timeouts(mut self, connect_timeout: Duration, handshake_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self.handshake_timeout = handshake_timeout;
        self
    }

    /// Dial the host and return its leaf certificate in DER form.
    ///
    /// The stream is owned by this call and closed when it returns.
    pub async fn fetch_leaf(&self, hostname: &str) -> Result<CertificateDer<'static>> {
        let server_name = ServerName::try_from(hostname.to_string()).map_err(|_| {
            DeadlineError::InvalidInput {
                message: format!("Invalid DNS name: {}", hostname),
            }
        })?;

        tracing::debug!("Connecting to {}:{}", hostname, self.port);

        let stream = timeout(
            self.connect_timeout,
            TcpStream::connect((hostname, self.port)),
        )
        .await
        .map_err(|_| DeadlineError::connect_timeout(hostname, self.port, self.connect_timeout))?
        .map_err(|source| DeadlineError::Connect {
            hostname: hostname.to_string(),
            port: self.port,
            source,
        })?;

        let tls_stream = timeout(
            self.handshake_timeout,
            self.connector.connect(server_name, stream),
        )
        .await
        .map_err(|_| DeadlineError::handshake_timeout(hostname, self.handshake_timeout))?
        .map_err(|e| DeadlineError::TlsHandshake {
            hostname: hostname.to_string(),
            details: e.to_string(),
        })?;

        let (_io, connection) = tls_stream.get_ref();
        leaf_from_chain(hostname, connection.peer_certificates())
    }
}

#[async_trait]
impl CertificateProbe for TlsProber {
    async fn probe(&self, hostname: &str) -> Result<DateTime<Utc>> {
        let leaf = self.fetch_leaf(hostname).await?;
        let not_after = not_after(hostname, &leaf)?;

        tracing::debug!("{} certificate expires at {}", hostname, not_after);
        Ok(not_after)
    }
}

/// First certificate of the presented chain
fn leaf_from_chain(
    hostname: &str,
    chain: Option<&[CertificateDer<'_>]>,
) -> Result<CertificateDer<'static>> {
    chain
        .and_then(|certs| certs.first())
        .map(|leaf| leaf.clone().into_owned())
        .ok_or_else(|| DeadlineError::NoCertificate {
            hostname: hostname.to_string(),
        })
}

/// Decode the `NotAfter` instant of a DER certificate
pub fn not_after(hostname: &str, der: &[u8]) -> Result<DateTime<Utc>> {
    let (_, cert) =
        X509Certificate::from_der(der).map_err(|e| DeadlineError::CertificateParse {
            hostname: hostname.to_string(),
            details: format!("{:?}", e),
        })?;

    let timestamp = cert.validity().not_after.timestamp();

    DateTime::from_timestamp(timestamp, 0).ok_or_else(|| DeadlineError::CertificateParse {
        hostname: hostname.to_string(),
        details: format!("NotAfter out of range: {}", timestamp),
    })
}
