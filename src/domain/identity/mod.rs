// SPDX-License-Identifier: MPL-2.0
//! Identity domain types: roles and login credentials.

mod credentials;
mod role;

pub use credentials::{
    sanitize_digits, CredentialError, Identifier, OneTimeCode, CODE_LEN, IDENTIFIER_LEN,
};
pub use role::{Role, UnknownRole};
