//! The message codec: wire framing plus per-command field schemas.

pub mod commands;
pub mod fields;
pub mod frame;

#[cfg(test)]
mod tests;
