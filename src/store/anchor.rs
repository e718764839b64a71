// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use base64::{engine::general_purpose, DecodeError, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// AMD EPYC processor generations that carry the SEV firmware.  Each one
/// has its own ASK and ARK pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFamily {
    Naples,
    Rome,
    Milan,
}

impl fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlatformFamily::Naples => "naples",
            PlatformFamily::Rome => "rome",
            PlatformFamily::Milan => "milan",
        };
        f.write_str(s)
    }
}

impl FromStr for PlatformFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "naples" => Ok(PlatformFamily::Naples),
            "rome" => Ok(PlatformFamily::Rome),
            "milan" => Ok(PlatformFamily::Milan),
            unknown => Err(format!("unknown platform family {unknown}")),
        }
    }
}

/// The pair of certificates that close a SEV chain for a given CPU family
#[derive(Clone, Deserialize, Serialize, Debug, PartialEq, Eq)]
pub struct TrustAnchor {
    /// The CPU family the anchors belong to
    pub family: PlatformFamily,

    /// The AMD SEV Signing Key certificate, in AMD's proprietary format,
    /// standard base64 encoded
    pub ask: String,

    /// The AMD Root Key certificate, in AMD's proprietary format, standard
    /// base64 encoded
    pub ark: String,
}

impl TrustAnchor {
    /// Decode the ASK certificate
    pub fn decode_ask(&self) -> Result<Vec<u8>, DecodeError> {
        general_purpose::STANDARD.decode(&self.ask)
    }

    /// Decode the ARK certificate
    pub fn decode_ark(&self) -> Result<Vec<u8>, DecodeError> {
        general_purpose::STANDARD.decode(&self.ark)
    }
}
