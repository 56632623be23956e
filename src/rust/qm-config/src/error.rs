// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Error definitions for configuration assembly.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Possible values for pulse operation: \"control\" or \"measurement\", got \"{0}\"")]
    InvalidPulseOperation(String),

    #[error("Pulse length must be between 16 and 2^31-1 ns, got {0}")]
    PulseLengthOutOfRange(i64),

    #[error("Waveform type must be \"constant\" or \"arbitrary\", got \"{0}\"")]
    InvalidWaveformKind(String),

    #[error("Port index must be a positive integer, got {0}")]
    InvalidPortIndex(i64),

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be a non-negative multiple of {multiple} ns, got {value}")]
    InvalidDuration {
        field: &'static str,
        value: i64,
        multiple: i64,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Check that `value` lies within the closed range `[min, max]`.
pub(crate) fn check_range<T>(field: &'static str, value: T, min: T, max: T) -> Result<T>
where
    T: PartialOrd + Copy + Into<f64>,
{
    // NaN is never contained and ends up in the error branch.
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(Error::OutOfRange {
            field,
            value: value.into(),
            min: min.into(),
            max: max.into(),
        })
    }
}
