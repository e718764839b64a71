// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! The report module decodes the SEV certificate chain and attestation
//! report, and validates the report against the PEK.
//!
//! # Example
//!
//! The following example assumes that `cert_chain` holds the decoded
//! `cert-chain` field of a `query-sev-capabilities` response, `report` the
//! decoded `query-sev-attestation-report` data, and `nonce` the mnonce that
//! was sent with that request.
//!
//! ```no_run
//! use sevreport::report::{validate, CertificateChain, Verdict};
//!
//! # let (cert_chain, report, nonce) = (vec![0u8; 6252], vec![0u8; 0xd0], [0u8; 16]);
//! let chain = CertificateChain::parse(&cert_chain).expect("parsing cert chain");
//!
//! match validate(chain.signing_cert(), &report, &nonce) {
//!     Verdict::Verified => println!("ok"),
//!     Verdict::Rejected(e) => println!("{e}"),
//! }
//! ```

pub use self::attestation::AttestationReport;
pub use self::byteorder::{bignum_from_le, bignum_to_le, reverse_bytes};
pub use self::chain::CertificateChain;
pub use self::errors::Error;
pub use self::key::{certificate_usage, extract_public_key, EcdsaPublicKey};
pub use self::signature::{decode_signature, ReportSignature};
pub use self::validator::{validate, Verdict};

mod attestation;
mod byteorder;
mod chain;
mod errors;
mod key;
pub mod layout;
mod signature;
#[cfg(test)]
mod testutil;
mod validator;
