// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use super::layout::{CERT_LEN, PLATFORM_CERTS};
use crate::store::{self, ITrustAnchorStore, MemoTrustAnchorStore, PlatformFamily};
use std::sync::OnceLock;

/// The bundled trust anchors, loaded once per process
fn builtin_anchors() -> Result<&'static MemoTrustAnchorStore, Error> {
    static BUILTIN: OnceLock<Result<MemoTrustAnchorStore, store::Error>> = OnceLock::new();

    BUILTIN
        .get_or_init(MemoTrustAnchorStore::builtin)
        .as_ref()
        .map_err(|e| Error::TrustAnchorDecodeError(e.to_string()))
}

/// The SEV certificate chain, ordered from the report signer up to AMD's
/// root of trust.  PEK, OCA and CEK come from the platform; ASK and ARK come
/// from the trust anchor store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateChain {
    /// Platform Endorsement Key certificate, signs the attestation report
    pub pek: Vec<u8>,
    /// Owner Certificate Authority certificate
    pub oca: Vec<u8>,
    /// Chip Endorsement Key certificate
    pub cek: Vec<u8>,
    /// AMD SEV Signing Key certificate
    pub ask: Vec<u8>,
    /// AMD Root Key certificate
    pub ark: Vec<u8>,
}

impl CertificateChain {
    /// Split the `cert-chain` blob returned by `query-sev-capabilities` and
    /// complete it with the bundled Rome trust anchors.
    pub fn parse(blob: &[u8]) -> Result<Self, Error> {
        Self::parse_with(blob, builtin_anchors()?, PlatformFamily::Rome)
    }

    /// Split the `cert-chain` blob and complete it with the trust anchors
    /// registered for `family` in `tas`.
    pub fn parse_with(
        blob: &[u8],
        tas: &impl ITrustAnchorStore,
        family: PlatformFamily,
    ) -> Result<Self, Error> {
        if blob.len() != CERT_LEN * PLATFORM_CERTS {
            return Err(Error::InvalidChainLength(format!(
                "expecting {} bytes, got {}",
                CERT_LEN * PLATFORM_CERTS,
                blob.len()
            )));
        }

        // the order is fixed by the firmware: PEK, OCA, CEK
        let mut certs = blob.chunks_exact(CERT_LEN).map(<[u8]>::to_vec);
        let (pek, oca, cek) = match (certs.next(), certs.next(), certs.next()) {
            (Some(pek), Some(oca), Some(cek)) => (pek, oca, cek),
            _ => return Err(Error::InvalidChainLength("short chain".to_string())),
        };

        let ta = tas
            .lookup(family)
            .ok_or_else(|| Error::UnknownPlatformFamily(family.to_string()))?;

        let ask = ta
            .decode_ask()
            .map_err(|e| Error::TrustAnchorDecodeError(format!("decode ask: {e}")))?;
        let ark = ta
            .decode_ark()
            .map_err(|e| Error::TrustAnchorDecodeError(format!("decode ark: {e}")))?;

        log::debug!("parsed SEV certificate chain for {family}");

        Ok(CertificateChain {
            pek,
            oca,
            cek,
            ask,
            ark,
        })
    }

    /// The certificate whose key signs the attestation report
    pub fn signing_cert(&self) -> &[u8] {
        &self.pek
    }

    /// All certificates, signer first
    pub fn as_vec(&self) -> Vec<&[u8]> {
        vec![&self.pek, &self.oca, &self.cek, &self.ask, &self.ark]
    }
}
