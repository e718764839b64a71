// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! Synthetic PEKs and reports signed with throw-away keys.

use super::byteorder::bignum_to_le;
use super::key::CURVE;
use super::layout::*;
use openssl::bn::{BigNum, BigNumContext};
use openssl::ec::{EcGroup, EcKey};
use openssl::ecdsa::EcdsaSig;
use openssl::pkey::Private;
use openssl::sha::sha256;

pub const TEST_USAGE: [u8; 4] = [0x02, 0x10, 0x00, 0x00];
pub const TEST_NONCE: [u8; 16] = [
    0x64, 0x16, 0x8e, 0x10, 0xeb, 0x15, 0x99, 0xe9, 0xdc, 0xe6, 0xad, 0xf8, 0x54, 0x96, 0xfd, 0x8f,
];

pub fn signing_key() -> EcKey<Private> {
    let group = EcGroup::from_curve_name(CURVE).unwrap();
    EcKey::generate(&group).unwrap()
}

pub fn cert_with_key(key: &EcKey<Private>, usage: [u8; 4]) -> Vec<u8> {
    let mut ctx = BigNumContext::new().unwrap();
    let mut x = BigNum::new().unwrap();
    let mut y = BigNum::new().unwrap();
    key.public_key()
        .affine_coordinates(key.group(), &mut x, &mut y, &mut ctx)
        .unwrap();

    let mut cert = vec![0u8; CERT_LEN];
    cert[CERT_KEY_USAGE.offset..CERT_KEY_USAGE.end()].copy_from_slice(&usage);
    // ECDSA curve id for P-384
    cert[PUBKEY_CURVE.offset] = 0x02;
    cert[PUBKEY_X.offset..PUBKEY_X.end()]
        .copy_from_slice(&bignum_to_le(&x, PUBKEY_X.width).unwrap());
    cert[PUBKEY_Y.offset..PUBKEY_Y.end()]
        .copy_from_slice(&bignum_to_le(&y, PUBKEY_Y.width).unwrap());
    cert
}

/// Fill in the header of a report, leaving the signature block empty
pub fn unsigned_report(nonce: [u8; 16], usage: [u8; 4], algo: u16) -> Vec<u8> {
    let mut report = vec![0u8; REPORT_MIN_LEN];
    report[MNONCE.offset..MNONCE.end()].copy_from_slice(&nonce);
    report[LAUNCH_DIGEST.offset..LAUNCH_DIGEST.end()].fill(0xaa);
    report[POLICY.offset] = 0x01;
    report[KEY_USAGE.offset..KEY_USAGE.end()].copy_from_slice(&usage);
    report[ALGO_ID.offset..ALGO_ID.end()].copy_from_slice(&algo.to_le_bytes());
    report
}

/// (Re)sign the report in place with `key`
pub fn sign(report: &mut [u8], key: &EcKey<Private>) {
    let digest = sha256(&report[SIGNED_PREFIX.offset..SIGNED_PREFIX.end()]);
    let sig = EcdsaSig::sign(&digest, key).unwrap();

    report[SIG_R.offset..SIG_R.end()].copy_from_slice(&bignum_to_le(sig.r(), SIG_R.width).unwrap());
    report[SIG_S.offset..SIG_S.end()].copy_from_slice(&bignum_to_le(sig.s(), SIG_S.width).unwrap());
}

/// A PEK and a report it validly signed over `TEST_NONCE`
pub fn signed_pair() -> (Vec<u8>, Vec<u8>) {
    let key = signing_key();
    let cert = cert_with_key(&key, TEST_USAGE);
    let mut report = unsigned_report(TEST_NONCE, TEST_USAGE, ALGO_ECDSA_SHA256);
    sign(&mut report, &key);
    (cert, report)
}
