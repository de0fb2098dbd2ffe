use std::fmt;

/// Why a reducer refused an action. The draft it was handed must be discarded.
#[derive(Debug, Clone, PartialEq)]
pub enum ReduceError {
    ArrangementOutOfRange { index: usize, len: usize },
    DuplicateSampleId(String),
    InvalidSettings(&'static str),
    NonFiniteValue(&'static str),
}

impl fmt::Display for ReduceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArrangementOutOfRange { index, len } => {
                write!(f, "arrangement index {} out of range ({} arrangements)", index, len)
            }
            Self::DuplicateSampleId(id) => write!(f, "sample id {:?} already exists", id),
            Self::InvalidSettings(reason) => write!(f, "invalid global settings: {}", reason),
            Self::NonFiniteValue(field) => write!(f, "{} must be a finite number", field),
        }
    }
}

impl std::error::Error for ReduceError {}

/// A structural rule of `DrumMachineState` that does not hold.
#[derive(Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    TrackCountMismatch { arrangement: usize, rows: usize, samples: usize },
    RowLengthMismatch { arrangement: usize, track: usize, len: usize, expected: usize },
    CurrentArrangementOutOfRange { index: usize, len: usize },
    DuplicateArrangementId(String),
    DuplicateSampleId(String),
    VolumeOutOfRange { arrangement: usize, cell: Option<(usize, usize)> },
    CursorOutOfRange { x: usize, y: usize },
    InvalidSettings(&'static str),
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TrackCountMismatch { arrangement, rows, samples } => write!(
                f,
                "arrangement {} has {} trigger rows but there are {} samples",
                arrangement, rows, samples
            ),
            Self::RowLengthMismatch { arrangement, track, len, expected } => write!(
                f,
                "arrangement {} row {} has {} triggers, expected {}",
                arrangement, track, len, expected
            ),
            Self::CurrentArrangementOutOfRange { index, len } => write!(
                f,
                "current arrangement {} out of range ({} arrangements)",
                index, len
            ),
            Self::DuplicateArrangementId(id) => write!(f, "duplicate arrangement id {:?}", id),
            Self::DuplicateSampleId(id) => write!(f, "duplicate sample id {:?}", id),
            Self::VolumeOutOfRange { arrangement, cell: None } => {
                write!(f, "arrangement {} volume outside 0..=1", arrangement)
            }
            Self::VolumeOutOfRange { arrangement, cell: Some((track, beat)) } => write!(
                f,
                "trigger volume outside 0..=1 at arrangement {} track {} beat {}",
                arrangement, track, beat
            ),
            Self::CursorOutOfRange { x, y } => write!(f, "cursor ({}, {}) outside the grid", x, y),
            Self::InvalidSettings(reason) => write!(f, "invalid global settings: {}", reason),
        }
    }
}

impl std::error::Error for InvariantViolation {}

