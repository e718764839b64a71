// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! AMD SEV attestation report verification.
//!
//! This crate verifies the attestation report that the SEV firmware
//! produces for a guest at launch, as returned by the QEMU monitor's
//! `query-sev-attestation-report` command.  For detailed information about
//! the format, see §6.8 of the [SEV API] specification.
//!
//! The API allows:
//! * Splitting the SEV certificate chain and completing it with the AMD
//!   trust anchors of the relevant CPU family
//! * Checking that a report is bound to the caller's nonce
//! * Cryptographically verifying the report signature against the PEK
//! * Decoding the QMP envelopes the report and the certificates come in
//!
//! [SEV API]: https://www.amd.com/system/files/TechDocs/55766_SEV-KM_API_Specification.pdf

pub mod envelope;
pub mod report;
pub mod store;
