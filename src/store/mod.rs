// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! Trust anchors (ASK and ARK certificates) indexed by CPU family.  These
//! are versioned, operator-supplied configuration: each processor generation
//! ships its own pair.

pub use self::anchor::{PlatformFamily, TrustAnchor};
pub use self::errors::Error;
pub use self::itrustanchorstore::ITrustAnchorStore;
pub use self::memo_trustanchorstore::MemoTrustAnchorStore;

mod anchor;
mod errors;
mod itrustanchorstore;
mod memo_trustanchorstore;
