// Copyright 2023-2025 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::anchor::{PlatformFamily, TrustAnchor};
use super::errors::Error;
use super::ITrustAnchorStore;
use std::collections::HashMap;
use std::sync::RwLock;

const BUILTIN_ANCHORS: &str = include_str!("../../assets/trust-anchors.json");

/// The store where the active ASK/ARK pairs are stashed.  Entries are
/// indexed by CPU family; loading a family twice replaces the older entry.
#[derive(Debug)]
pub struct MemoTrustAnchorStore {
    p: RwLock<HashMap<PlatformFamily, TrustAnchor>>,
}

impl Default for MemoTrustAnchorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoTrustAnchorStore {
    /// Returns a new empty TrustAnchorStore
    pub fn new() -> Self {
        Self {
            p: Default::default(),
        }
    }

    /// Returns a TrustAnchorStore pre-loaded with the bundled anchors
    pub fn builtin() -> Result<Self, Error> {
        let mut s = Self::new();
        s.load_json(BUILTIN_ANCHORS)?;
        Ok(s)
    }

    /// Add to an existing (and possibly empty) TrustAnchorStore the trust
    /// anchors loaded from the given JSON file
    pub fn load_json(&mut self, j: &str) -> Result<(), Error> {
        let tas: Vec<TrustAnchor> =
            serde_json::from_str(j).map_err(|e| Error::Syntax(e.to_string()))?;

        // reject the whole document before touching the store
        if let Some(ta) = tas.iter().find(|ta| ta.ask.is_empty() || ta.ark.is_empty()) {
            return Err(Error::Sema(format!(
                "empty certificate in {} trust anchor",
                ta.family
            )));
        }

        let mut p = self
            .p
            .write()
            .map_err(|e| Error::Sema(format!("trust anchor store poisoned: {e}")))?;

        for ta in tas.into_iter() {
            log::debug!("loaded trust anchors for {}", ta.family);
            p.insert(ta.family, ta);
        }

        Ok(())
    }
}

impl ITrustAnchorStore for MemoTrustAnchorStore {
    /// Lookup the trust anchors of the given CPU family
    fn lookup(&self, family: PlatformFamily) -> Option<TrustAnchor> {
        self.p.read().ok()?.get(&family).cloned()
    }
}
