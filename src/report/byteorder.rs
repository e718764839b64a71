// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! The SEV firmware stores multi-precision integers (key coordinates,
//! signature components) as little-endian limbs, zero padded to 0x48 bytes.

use openssl::bn::{BigNum, BigNumRef};
use openssl::error::ErrorStack;

/// Returns a copy of `b` with the byte order reversed
pub fn reverse_bytes(b: &[u8]) -> Vec<u8> {
    b.iter().rev().copied().collect()
}

/// Interpret `b` as an unsigned little-endian integer
pub fn bignum_from_le(b: &[u8]) -> Result<BigNum, ErrorStack> {
    BigNum::from_slice(&reverse_bytes(b))
}

/// Serialise `n` as a little-endian integer of exactly `width` bytes
pub fn bignum_to_le(n: &BigNumRef, width: usize) -> Result<Vec<u8>, ErrorStack> {
    let mut v = n.to_vec_padded(width as i32)?;
    v.reverse();
    Ok(v)
}
