// Certificate probing
//
// Everything that touches raw TLS lives here: dialing the host, reading the
// presented chain and decoding the leaf's validity period.

pub mod prober;

pub use prober::{CertificateProbe, TlsProber};
