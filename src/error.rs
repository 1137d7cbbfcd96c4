use core::fmt;

/// A caller precondition violated by the input of a checked operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The thrust setpoint has no direction.
    ZeroThrust,
    /// The path segment starts and ends at the same point.
    DegenerateSegment,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ZeroThrust => f.write_str("thrust setpoint is the zero vector"),
            Error::DegenerateSegment => f.write_str("line segment has zero length"),
        }
    }
}
