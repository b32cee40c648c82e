use unimark_crypto::{
    build_envelope, open_envelope, verify_envelope, Ed25519EnvelopeSigner, Ed25519EnvelopeVerifier,
    VerifyFailureKind, CURRENT_VERSION,
};

#[test]
fn wire_header_carries_the_current_version_and_requested_format() {
    let signer = Ed25519EnvelopeSigner::from_secret([0x01; 32]);
    let bytes = build_envelope(1, b"manifest payload bytes", &signer).unwrap();

    let raw = open_envelope(&bytes).unwrap();
    assert_eq!(raw.version, CURRENT_VERSION);
    assert_eq!(raw.format, 1);
    assert_eq!(raw.payload, b"manifest payload bytes");
}

#[test]
fn verification_pipeline_reports_corrupt_envelope_for_non_deflate_bytes() {
    let resolver = |_: &str| None;
    let verifier = Ed25519EnvelopeVerifier;
    let err = unimark_crypto::verify_envelope(b"\x00\x01garbage", &resolver, &verifier).unwrap_err();
    assert_eq!(err, VerifyFailureKind::CorruptEnvelope);
}

#[test]
fn verification_pipeline_reports_missing_signer_id() {
    let signer = Ed25519EnvelopeSigner::from_secret([0x02; 32]);
    let bytes = build_envelope(0, b"{\"timestamp\":\"2024-05-04T14:27:04Z\"}", &signer).unwrap();

    let resolver = |_: &str| None;
    let verifier = Ed25519EnvelopeVerifier;
    let err = verify_envelope(&bytes, &resolver, &verifier).unwrap_err();
    assert_eq!(err, VerifyFailureKind::MissingSignerId);
}
