// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use super::layout::*;

/// A decoded view over a SEV attestation report, as returned by
/// `query-sev-attestation-report`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttestationReport {
    /// The nonce supplied by the guest owner when requesting the report
    pub mnonce: [u8; 16],

    /// Measurement of the guest at launch
    pub launch_digest: [u8; 32],

    /// The guest policy
    pub policy: u32,

    /// Usage of the key that signed the report, which must match the PEK's
    pub key_usage: [u8; 4],

    /// Signature algorithm, only the low 16 bits are meaningful
    pub algorithm: u16,

    /// Raw report, kept for the digest and the signature
    raw: Vec<u8>,
}

impl AttestationReport {
    /// Decode a report, checking only that it is long enough to hold the
    /// signature block.  Trailing bytes are kept but ignored.
    pub fn decode(buf: &[u8]) -> Result<Self, Error> {
        if buf.len() < REPORT_MIN_LEN {
            return Err(Error::MalformedReport(format!(
                "expecting at least {REPORT_MIN_LEN} bytes, got {}",
                buf.len()
            )));
        }

        Ok(AttestationReport {
            mnonce: fixed(buf, MNONCE)?,
            launch_digest: fixed(buf, LAUNCH_DIGEST)?,
            policy: u32::from_le_bytes(fixed(buf, POLICY)?),
            key_usage: fixed(buf, KEY_USAGE)?,
            algorithm: u16::from_le_bytes(fixed(buf, ALGO_ID)?),
            raw: buf.to_vec(),
        })
    }

    /// The bytes covered by the report signature
    pub fn signed_bytes(&self) -> &[u8] {
        &self.raw[SIGNED_PREFIX.offset..SIGNED_PREFIX.end()]
    }

    /// The full report
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }
}

fn fixed<const N: usize>(buf: &[u8], f: Field) -> Result<[u8; N], Error> {
    f.slice(buf)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| Error::MalformedReport(format!("truncated {} field", f.name)))
}
