//! Failure taxonomy of the frame-resolution pipeline.
//!
//! Every variant is terminal for the image being processed. Callers driving
//! many images record the `Display` text and move on to the next one.

#[derive(Debug, Clone, PartialEq)]
pub enum FrameError {
    /// The upstream line detector produced no lines.
    EmptyInput,
    /// Clustering left more border groups than a frame can plausibly have.
    TooManyGroups { groups: usize, max: usize },
    /// No pair of representative lines intersects.
    NoIntersections,
    /// Intersections exist but not exactly four of them.
    WrongIntersectionCount { found: usize },
    /// Quadrant assignment could not fill all four corner roles.
    ClassificationFailed { reason: String },
    /// The projective fit needs exactly four correspondences.
    WrongCorrespondenceCount { found: usize },
    /// The correspondences do not admit a projective transform.
    DegenerateTransform { reason: String },
    /// A pipeline parameter is outside its valid range.
    InvalidParameter(String),
}

impl std::fmt::Display for FrameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "no lines supplied by the line detector"),
            Self::TooManyGroups { groups, max } => write!(
                f,
                "too many line groups: {} (max {}); detector parameters need tuning",
                groups, max
            ),
            Self::NoIntersections => write!(f, "no border intersections found"),
            Self::WrongIntersectionCount { found } => {
                write!(f, "expected 4 border intersections, found {}", found)
            }
            Self::ClassificationFailed { reason } => {
                write!(f, "corner classification failed: {}", reason)
            }
            Self::WrongCorrespondenceCount { found } => {
                write!(f, "projective fit needs 4 correspondences, got {}", found)
            }
            Self::DegenerateTransform { reason } => {
                write!(f, "degenerate transform: {}", reason)
            }
            Self::InvalidParameter(msg) => write!(f, "invalid parameter: {}", msg),
        }
    }
}

impl std::error::Error for FrameError {}

pub type FrameResult<T> = Result<T, FrameError>;
