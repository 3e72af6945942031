//! A simulator of a Thales-style Hardware Security Module (HSM) used in
//! retail payment networks.
//!
//! This crate implements the command-processing core of the simulator: a
//! binary framing and field-oriented message parser, a command dispatcher
//! with handlers for PIN verification, PIN-block translation, CVV
//! verification and diagnostics, and the DES/Triple-DES cryptographic
//! primitives those handlers rely on (LMK key unwrapping, ISO-0 PIN-block
//! extraction, Visa PVV/CVV calculation).
//!
//! The TCP accept/read loop and CLI entrypoint live in the `hsm-server`
//! binary and build on top of [`session::run_session`]; they are thin
//! wrappers, not part of the cryptographic core.
//!
//! # Disclaimer
//!
//! This library is provided "as is", for testing and development use
//! against payment applications. It is not a certified HSM and must not
//! be used to protect production cryptographic material.

pub mod context;
pub mod crypto;
pub mod dispatch;
pub mod error;
pub mod message;
pub mod pin;
pub mod session;
