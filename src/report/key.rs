// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::byteorder::bignum_from_le;
use super::errors::Error;
use super::layout::*;
use openssl::bn::BigNum;
use openssl::ec::{EcGroup, EcKey};
use openssl::error::ErrorStack;
use openssl::nid::Nid;
use openssl::pkey::Public;

/// The curve of every ECDSA key used by the SEV firmware to sign reports
pub const CURVE: Nid = Nid::SECP384R1;

/// The ECDSA public key carried by a SEV certificate.  The coordinates are
/// taken verbatim: whether the point lies on the curve is only checked when
/// the key is turned into an [`EcKey`].
#[derive(Debug)]
pub struct EcdsaPublicKey {
    pub x: BigNum,
    pub y: BigNum,
}

impl EcdsaPublicKey {
    /// Bind the coordinates to P-384, failing if the point is not on the curve
    pub fn to_ec_key(&self) -> Result<EcKey<Public>, ErrorStack> {
        let group = EcGroup::from_curve_name(CURVE)?;
        EcKey::from_public_key_affine_coordinates(&group, &self.x, &self.y)
    }
}

/// Read the public key out of a SEV certificate (normally the PEK)
pub fn extract_public_key(cert: &[u8]) -> Result<EcdsaPublicKey, Error> {
    let x = PUBKEY_X.slice(cert).ok_or_else(|| truncated(cert, PUBKEY_X))?;
    let y = PUBKEY_Y.slice(cert).ok_or_else(|| truncated(cert, PUBKEY_Y))?;

    Ok(EcdsaPublicKey {
        x: bignum_from_le(x).map_err(|e| Error::MalformedCertificate(format!("qx: {e}")))?,
        y: bignum_from_le(y).map_err(|e| Error::MalformedCertificate(format!("qy: {e}")))?,
    })
}

/// Read the key usage field of a SEV certificate
pub fn certificate_usage(cert: &[u8]) -> Result<[u8; 4], Error> {
    CERT_KEY_USAGE
        .slice(cert)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| truncated(cert, CERT_KEY_USAGE))
}

fn truncated(cert: &[u8], f: Field) -> Error {
    Error::MalformedCertificate(format!(
        "{} needs {} bytes, certificate has {}",
        f.name,
        f.end(),
        cert.len()
    ))
}
