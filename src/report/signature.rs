// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::byteorder::bignum_from_le;
use super::errors::Error;
use super::layout::*;
use openssl::bn::BigNum;
use openssl::ecdsa::EcdsaSig;
use openssl::error::ErrorStack;

/// The (r, s) pair that signs a SEV attestation report
#[derive(Debug)]
pub struct ReportSignature {
    pub r: BigNum,
    pub s: BigNum,
}

impl ReportSignature {
    pub fn to_ecdsa_sig(&self) -> Result<EcdsaSig, ErrorStack> {
        EcdsaSig::from_private_components(self.r.to_owned()?, self.s.to_owned()?)
    }
}

/// Read the signature block out of a raw attestation report
pub fn decode_signature(report: &[u8]) -> Result<ReportSignature, Error> {
    if report.len() < REPORT_MIN_LEN {
        return Err(Error::MalformedReport(format!(
            "expecting at least {REPORT_MIN_LEN} bytes, got {}",
            report.len()
        )));
    }

    let component = |f: Field| -> Result<BigNum, Error> {
        let b = f
            .slice(report)
            .ok_or_else(|| Error::MalformedReport(format!("truncated {}", f.name)))?;
        bignum_from_le(b).map_err(|e| Error::MalformedReport(format!("{}: {e}", f.name)))
    };

    Ok(ReportSignature {
        r: component(SIG_R)?,
        s: component(SIG_S)?,
    })
}
