// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! QMP (QEMU Machine Protocol) commands used to obtain SEV attestation
//! material, and decoders for their JSON responses.  Talking to the monitor
//! is left to the caller.

use base64::{engine::general_purpose, Engine as _};
use openssl::rand::rand_bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Length of the mnonce field of the attestation report
pub const NONCE_LEN: usize = 16;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(String),
    #[error("base64 error: {0}")]
    Base64(String),
    #[error("monitor returned an error: {0}")]
    Monitor(String),
    #[error("nonce must be {NONCE_LEN} bytes, got {0}")]
    BadNonceLength(usize),
    #[error("random number generator: {0}")]
    Rng(String),
}

fn b64decode(v: &str) -> Result<Vec<u8>, Error> {
    general_purpose::STANDARD
        .decode(v.trim())
        .map_err(|e| Error::Base64(e.to_string()))
}

/// The per-session nonce bound into the attestation report
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Nonce([u8; NONCE_LEN]);

impl Nonce {
    /// Draw a fresh nonce from the openssl CSPRNG
    pub fn generate() -> Result<Self, Error> {
        let mut n = [0u8; NONCE_LEN];
        rand_bytes(&mut n).map_err(|e| Error::Rng(e.to_string()))?;
        Ok(Nonce(n))
    }

    pub fn from_base64(v: &str) -> Result<Self, Error> {
        Self::try_from(b64decode(v)?.as_slice())
    }

    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Nonce {
    type Error = Error;

    fn try_from(v: &[u8]) -> Result<Self, Error> {
        v.try_into()
            .map(Nonce)
            .map_err(|_| Error::BadNonceLength(v.len()))
    }
}

#[derive(Debug, Deserialize)]
struct QmpError {
    class: String,
    desc: String,
}

/// A QMP response: either `{"return": ...}` or `{"error": ...}`
#[derive(Debug, Deserialize)]
struct Response<T> {
    #[serde(rename = "return")]
    ret: Option<T>,
    error: Option<QmpError>,
}

fn unwrap_response<T: DeserializeOwned>(j: &[u8]) -> Result<T, Error> {
    let r: Response<T> = serde_json::from_slice(j).map_err(|e| Error::Json(e.to_string()))?;

    match (r.ret, r.error) {
        (_, Some(e)) => Err(Error::Monitor(format!("{}: {}", e.class, e.desc))),
        (Some(v), None) => Ok(v),
        (None, None) => Err(Error::Json("missing return field".to_string())),
    }
}

/// The `query-sev-capabilities` command
pub fn capabilities_request() -> String {
    json!({ "execute": "query-sev-capabilities" }).to_string()
}

/// The `query-sev-attestation-report` command, carrying the session nonce
pub fn attestation_report_request(nonce: &Nonce) -> String {
    json!({
        "execute": "query-sev-attestation-report",
        "arguments": { "mnonce": nonce.to_base64() }
    })
    .to_string()
}

/// SEV platform capabilities, as returned by `query-sev-capabilities`
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Capabilities {
    /// Platform Diffie-Hellman key, base64 encoded
    pub pdh: String,

    /// PEK, OCA and CEK certificates, base64 encoded
    #[serde(rename = "cert-chain")]
    pub cert_chain: String,

    /// Unique ID of the first CPU, base64 encoded
    #[serde(rename = "cpu0-id")]
    pub cpu0_id: Option<String>,

    #[serde(rename = "cbitpos")]
    pub cbit_pos: u32,

    #[serde(rename = "reduced-phys-bits")]
    pub reduced_phys_bits: u32,
}

impl Capabilities {
    /// Decode a `query-sev-capabilities` response
    pub fn decode(j: &str) -> Result<Self, Error> {
        unwrap_response(j.as_bytes())
    }

    /// The raw certificate chain
    pub fn cert_chain(&self) -> Result<Vec<u8>, Error> {
        b64decode(&self.cert_chain)
    }

    /// The raw PDH certificate
    pub fn pdh(&self) -> Result<Vec<u8>, Error> {
        b64decode(&self.pdh)
    }
}

#[derive(Debug, Deserialize)]
struct ReportData {
    data: String,
}

/// Decode a `query-sev-attestation-report` response into the raw report.
/// Some transports wrap the whole JSON response in another layer of base64,
/// which is peeled off first.
pub fn decode_report_response(v: &str) -> Result<Vec<u8>, Error> {
    let v = v.trim();

    let j = if v.starts_with('{') {
        v.as_bytes().to_vec()
    } else {
        b64decode(v)?
    };

    let r: ReportData = unwrap_response(&j)?;

    b64decode(&r.data)
}
