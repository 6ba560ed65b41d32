//! Fault definitions.
//!
//! This core has no runtime exceptions on the cycle path: every anomaly is
//! data, not control flow. A [`Fault`] produced during decode rides in the
//! emitted micro-op for a downstream stage (or an external trap handler) to
//! interpret; nothing here aborts, retries, or returns `Result`.

use thiserror::Error;

/// Decode-detected anomalies, carried through the pipeline as data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Fault {
    /// The instruction encoding is invalid or not implemented.
    ///
    /// The associated value is the offending instruction word. An illegal
    /// encoding decodes to a micro-op carrying this fault with inert control
    /// fields — never to a silent no-op.
    #[error("IllegalInstruction({0:#010x})")]
    IllegalInstruction(u32),
}
