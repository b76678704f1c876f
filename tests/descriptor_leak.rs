// Repeated probe failures must not leak file descriptors

#![cfg(target_os = "linux")]

mod common;

use common::{TlsFixture, closed_port};
use ssl_deadline::certificates::{CertificateProbe, TlsProber};
use ssl_deadline::config::ProbeSettings;
use std::time::Duration;

fn open_descriptors() -> usize {
    std::fs::read_dir("/proc/self/fd").unwrap().count()
}

#[tokio::test]
async fn test_failed_probes_release_descriptors() {
    let fixture = TlsFixture::start().await;

    let refused = TlsProber::new(&ProbeSettings {
        port: closed_port(),
        ..ProbeSettings::default()
    })
    .unwrap();
    let untrusted = TlsProber::new(&fixture.probe_settings()).unwrap();

    // Warm up lazily opened runtime resources
    let _ = refused.probe("127.0.0.1").await;
    let _ = untrusted.probe("127.0.0.1").await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    let before = open_descriptors();

    for _ in 0..50 {
        assert!(refused.probe("127.0.0.1").await.is_err());
        assert!(untrusted.probe("127.0.0.1").await.is_err());
    }

    // Server-side halves close asynchronously
    tokio::time::sleep(Duration::from_millis(300)).await;
    let after = open_descriptors();

    assert!(
        after <= before + 2,
        "descriptor count grew from {} to {}",
        before,
        after
    );
}
