use thiserror::Error;

/// Errors raised while configuring or constructing a simulation.
///
/// Stepping never fails; these only surface from constructors,
/// deserialization and [`SimParams::validate`](crate::SimParams::validate).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("length mismatch for {what}: expected {expected}, found {found}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("particle {particle} has {degree} bonds but valence {valence}")]
    ValenceExceeded {
        particle: usize,
        degree: usize,
        valence: u16,
    },

    #[error("invalid bond {i}-{j}: {reason}")]
    InvalidBond {
        i: usize,
        j: usize,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, SimError>;
