// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end tests: a capabilities response and a report response, as a
//! QMP client would hand them over, go through chain parsing and report
//! validation.

use base64::{engine::general_purpose, Engine as _};
use openssl::bn::{BigNum, BigNumContext, BigNumRef};
use openssl::ec::{EcGroup, EcKey};
use openssl::ecdsa::EcdsaSig;
use openssl::nid::Nid;
use openssl::pkey::Private;
use openssl::sha::sha256;
use sevreport::envelope::{self, Capabilities, Nonce};
use sevreport::report::layout::*;
use sevreport::report::{bignum_to_le, validate, CertificateChain, Error, Verdict};
use sevreport::store::{MemoTrustAnchorStore, PlatformFamily};

const TEST_USAGE: [u8; 4] = [0x02, 0x10, 0x00, 0x00];

fn le(n: &BigNumRef, width: usize) -> Vec<u8> {
    bignum_to_le(n, width).unwrap()
}

fn put(buf: &mut [u8], f: Field, v: &[u8]) {
    buf[f.offset..f.end()].copy_from_slice(v);
}

/// A platform with its PEK key and the chain blob it would return
struct Platform {
    key: EcKey<Private>,
    chain: Vec<u8>,
}

impl Platform {
    fn new() -> Self {
        let group = EcGroup::from_curve_name(Nid::SECP384R1).unwrap();
        let key = EcKey::generate(&group).unwrap();

        let mut ctx = BigNumContext::new().unwrap();
        let mut x = BigNum::new().unwrap();
        let mut y = BigNum::new().unwrap();
        key.public_key()
            .affine_coordinates(&group, &mut x, &mut y, &mut ctx)
            .unwrap();

        let mut chain = vec![0u8; CERT_LEN * PLATFORM_CERTS];
        let pek = &mut chain[..CERT_LEN];
        put(pek, CERT_KEY_USAGE, &TEST_USAGE);
        put(pek, PUBKEY_X, &le(&x, PUBKEY_X.width));
        put(pek, PUBKEY_Y, &le(&y, PUBKEY_Y.width));
        // OCA and CEK are opaque here
        chain[CERT_LEN..].fill(0x5a);

        Platform { key, chain }
    }

    fn capabilities_response(&self) -> String {
        serde_json::json!({
            "return": {
                "pdh": "AAAA",
                "cert-chain": general_purpose::STANDARD.encode(&self.chain),
                "cpu0-id": "AAAA",
                "cbitpos": 47,
                "reduced-phys-bits": 1
            }
        })
        .to_string()
    }

    fn report(&self, nonce: &Nonce, algo: u16) -> Vec<u8> {
        let mut report = vec![0u8; REPORT_MIN_LEN];
        put(&mut report, MNONCE, nonce.as_bytes());
        put(&mut report, LAUNCH_DIGEST, &[0x42; 32]);
        put(&mut report, KEY_USAGE, &TEST_USAGE);
        put(&mut report, ALGO_ID, &algo.to_le_bytes());

        let digest = sha256(&report[..SIGNED_PREFIX.end()]);
        let sig = EcdsaSig::sign(&digest, &self.key).unwrap();
        put(&mut report, SIG_R, &le(sig.r(), SIG_R.width));
        put(&mut report, SIG_S, &le(sig.s(), SIG_S.width));
        report
    }

    /// Report response wrapped twice, as some monitor proxies return it
    fn report_response(&self, nonce: &Nonce, algo: u16) -> String {
        let j = serde_json::json!({
            "return": { "data": general_purpose::STANDARD.encode(self.report(nonce, algo)) }
        })
        .to_string();
        general_purpose::STANDARD.encode(j)
    }
}

fn run(p: &Platform, response: &str, nonce: &Nonce) -> Verdict {
    let caps = Capabilities::decode(&p.capabilities_response()).unwrap();
    let chain = CertificateChain::parse(&caps.cert_chain().unwrap()).unwrap();
    let report = envelope::decode_report_response(response).unwrap();

    validate(chain.signing_cert(), &report, nonce.as_bytes())
}

#[test]
fn end_to_end_ok() {
    let p = Platform::new();
    let nonce = Nonce::generate().unwrap();

    let v = run(&p, &p.report_response(&nonce, ALGO_ECDSA_SHA256), &nonce);
    assert_eq!(v, Verdict::Verified);
}

#[test]
fn end_to_end_stale_report() {
    let p = Platform::new();
    let old = Nonce::generate().unwrap();
    let fresh = Nonce::generate().unwrap();

    let v = run(&p, &p.report_response(&old, ALGO_ECDSA_SHA256), &fresh);
    assert_eq!(v, Verdict::Rejected(Error::NonceMismatch));
}

#[test]
fn end_to_end_sha256_algorithm() {
    let p = Platform::new();
    let nonce = Nonce::generate().unwrap();

    let v = run(&p, &p.report_response(&nonce, ALGO_SHA256), &nonce);
    assert!(matches!(
        v,
        Verdict::Rejected(Error::UnsupportedAlgorithmOrUsage(_))
    ));
}

#[test]
fn end_to_end_other_platform() {
    let p = Platform::new();
    let q = Platform::new();
    let nonce = Nonce::generate().unwrap();

    // report from q, chain from p
    let v = run(&p, &q.report_response(&nonce, ALGO_ECDSA_SHA256), &nonce);
    assert_eq!(v, Verdict::Rejected(Error::InvalidSignature));
}

#[test]
fn injected_trust_anchors() {
    let p = Platform::new();
    let nonce = Nonce::generate().unwrap();

    let mut tas = MemoTrustAnchorStore::new();
    tas.load_json(r#"[{"family": "milan", "ask": "AQID", "ark": "BAUG"}]"#)
        .unwrap();

    let chain = CertificateChain::parse_with(&p.chain, &tas, PlatformFamily::Milan).unwrap();
    assert_eq!(chain.ask, vec![1, 2, 3]);
    assert_eq!(chain.ark, vec![4, 5, 6]);
    assert_eq!(chain.oca, vec![0x5a; CERT_LEN]);

    let report = p.report(&nonce, ALGO_ECDSA_SHA256);
    assert!(validate(chain.signing_cert(), &report, nonce.as_bytes()).is_verified());

    let r = CertificateChain::parse_with(&p.chain, &tas, PlatformFamily::Rome);
    assert!(matches!(r, Err(Error::UnknownPlatformFamily(_))));
}
