// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

/// Errors raised while loading trust anchors
#[derive(thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The store JSON could not be parsed
    #[error("trust anchor syntax error: {0}")]
    Syntax(String),
    /// The store JSON parsed, but an entry is unusable
    #[error("trust anchor semantic error: {0}")]
    Sema(String),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Syntax(e) | Error::Sema(e) => write!(f, "{}", e),
        }
    }
}
