// Copyright 2023-2025 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::attestation::AttestationReport;
use super::errors::Error;
use super::key::{certificate_usage, extract_public_key};
use super::layout::ALGO_ECDSA_SHA256;
use super::signature::decode_signature;
use openssl::hash::{Hasher, MessageDigest};

/// Outcome of validating an attestation report
#[derive(Debug, PartialEq, Eq)]
pub enum Verdict {
    Verified,
    Rejected(Error),
}

impl Verdict {
    pub fn is_verified(&self) -> bool {
        matches!(self, Verdict::Verified)
    }
}

impl From<Result<(), Error>> for Verdict {
    fn from(r: Result<(), Error>) -> Self {
        match r {
            Ok(()) => Verdict::Verified,
            Err(e) => Verdict::Rejected(e),
        }
    }
}

/// Validate a SEV attestation report against the PEK certificate that is
/// supposed to have signed it and the nonce the guest owner sent along with
/// the request.  The gates run in order and the first failure is returned:
/// nonce, then signature usage and algorithm, then the ECDSA signature.
pub fn validate(signing_cert: &[u8], report: &[u8], expected_nonce: &[u8]) -> Verdict {
    let v: Verdict = check(signing_cert, report, expected_nonce).into();

    match &v {
        Verdict::Verified => log::debug!("attestation report verified"),
        Verdict::Rejected(e) => log::warn!("attestation report rejected: {e}"),
    }

    v
}

fn check(signing_cert: &[u8], raw: &[u8], expected_nonce: &[u8]) -> Result<(), Error> {
    let report = AttestationReport::decode(raw)?;

    // a freshness check on public data, no need for constant time
    if report.mnonce.as_slice() != expected_nonce {
        return Err(Error::NonceMismatch);
    }
    log::debug!("mnonce ok");

    if report.algorithm != ALGO_ECDSA_SHA256 {
        return Err(Error::UnsupportedAlgorithmOrUsage(format!(
            "algorithm {:#06x}",
            report.algorithm
        )));
    }

    let usage = certificate_usage(signing_cert)?;
    if report.key_usage != usage {
        return Err(Error::UnsupportedAlgorithmOrUsage(format!(
            "report usage {} does not match certificate usage {}",
            hex::encode(report.key_usage),
            hex::encode(usage)
        )));
    }
    log::debug!("signature usage and algorithm ok");

    let pkey = extract_public_key(signing_cert)?;
    let sig = decode_signature(report.as_bytes())?;

    let digest = sha256(report.signed_bytes()).map_err(|_| Error::InvalidSignature)?;

    let ec_key = pkey.to_ec_key().map_err(|e| {
        log::debug!("PEK is not a P-384 point: {e}");
        Error::InvalidSignature
    })?;

    let ok = sig
        .to_ecdsa_sig()
        .and_then(|s| s.verify(&digest, &ec_key))
        .map_err(|_| Error::InvalidSignature)?;

    if !ok {
        return Err(Error::InvalidSignature);
    }

    Ok(())
}

fn sha256(data: &[u8]) -> Result<Vec<u8>, openssl::error::ErrorStack> {
    let mut h = Hasher::new(MessageDigest::sha256())?;
    h.update(data)?;
    Ok(h.finish()?.to_vec())
}
