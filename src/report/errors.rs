// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

#[derive(thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid cert chain length: {0}")]
    InvalidChainLength(String),
    #[error("decoding trust anchor: {0}")]
    TrustAnchorDecodeError(String),
    #[error("no trust anchors for platform family {0}")]
    UnknownPlatformFamily(String),
    #[error("malformed certificate: {0}")]
    MalformedCertificate(String),
    #[error("malformed attestation report: {0}")]
    MalformedReport(String),
    #[error("invalid mnonce")]
    NonceMismatch,
    #[error("invalid signature usage or algorithm: {0}")]
    UnsupportedAlgorithmOrUsage(String),
    #[error("invalid signature on attestation report")]
    InvalidSignature,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidChainLength(e)
            | Error::TrustAnchorDecodeError(e)
            | Error::UnknownPlatformFamily(e)
            | Error::MalformedCertificate(e)
            | Error::MalformedReport(e)
            | Error::UnsupportedAlgorithmOrUsage(e) => {
                write!(f, "{}", e)
            }
            Error::NonceMismatch | Error::InvalidSignature => write!(f, "{}", self),
        }
    }
}
