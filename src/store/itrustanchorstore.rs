// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::anchor::{PlatformFamily, TrustAnchor};

/// Interface to the store where the ASK/ARK pairs are stashed.
pub trait ITrustAnchorStore {
    /// Lookup the trust anchors of the given CPU family
    fn lookup(&self, family: PlatformFamily) -> Option<TrustAnchor>;
}
