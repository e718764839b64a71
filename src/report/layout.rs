// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! Byte layout of the SEV attestation report and of the SEV (PEK)
//! certificate.  Every field sits at a fixed offset with a fixed width.

/// A fixed-position field inside an opaque byte buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub offset: usize,
    pub width: usize,
}

impl Field {
    pub const fn new(name: &'static str, offset: usize, width: usize) -> Self {
        Self {
            name,
            offset,
            width,
        }
    }

    /// One past the last byte of the field
    pub const fn end(&self) -> usize {
        self.offset + self.width
    }

    /// Borrow the field from `buf`, or `None` if `buf` is too short
    pub fn slice<'a>(&self, buf: &'a [u8]) -> Option<&'a [u8]> {
        buf.get(self.offset..self.end())
    }

    /// A field nested in this one, with `offset` relative to our start
    pub const fn sub(&self, name: &'static str, offset: usize, width: usize) -> Field {
        Field::new(name, self.offset + offset, width)
    }
}

// attestation report
pub const MNONCE: Field = Field::new("mnonce", 0x00, 0x10);
pub const LAUNCH_DIGEST: Field = Field::new("launch-digest", 0x10, 0x20);
pub const POLICY: Field = Field::new("policy", 0x30, 0x04);
pub const SIGNED_PREFIX: Field = Field::new("signed-prefix", 0x00, 0x34);
pub const KEY_USAGE: Field = Field::new("sig-usage", 0x34, 0x04);
pub const ALGORITHM: Field = Field::new("sig-algo", 0x38, 0x04);
// XXX only the low two bytes of sig-algo are compared; whether the upper
// half carries meaning is not settled
pub const ALGO_ID: Field = ALGORITHM.sub("sig-algo-id", 0x00, 0x02);
pub const SIGNATURE: Field = Field::new("signature", 0x40, 0x90);
pub const SIG_R: Field = SIGNATURE.sub("sig-r", 0x00, 0x48);
pub const SIG_S: Field = SIGNATURE.sub("sig-s", 0x48, 0x48);

pub const REPORT_MIN_LEN: usize = SIGNATURE.end();

// SEV certificate (PEK, OCA, CEK)
pub const CERT_LEN: usize = 0x824;
pub const CERT_KEY_USAGE: Field = Field::new("pubkey-usage", 0x08, 0x04);
pub const CERT_PUBKEY: Field = Field::new("pubkey", 0x10, 0x404);
pub const PUBKEY_CURVE: Field = CERT_PUBKEY.sub("curve", 0x00, 0x04);
pub const PUBKEY_X: Field = CERT_PUBKEY.sub("qx", 0x04, 0x48);
pub const PUBKEY_Y: Field = CERT_PUBKEY.sub("qy", 0x4c, 0x48);

/// Number of SEV certificates in the chain returned by the monitor
pub const PLATFORM_CERTS: usize = 3;

// signature algorithms
pub const ALGO_SHA256: u16 = 0x0001;
pub const ALGO_ECDSA_SHA256: u16 = 0x0002;
pub const ALGO_RSA_SHA384: u16 = 0x0101;
