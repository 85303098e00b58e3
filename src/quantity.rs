use std::fmt::{Display, Formatter};

/// Instantaneous output level in kilowatts.
///
/// The `Display` rendering uses the shortest-roundtrip `f64` formatting,
/// so a value written to the log parses back bit-exact.
#[derive(
    Clone,
    Copy,
    PartialEq,
    PartialOrd,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::Sum,
)]
pub struct Kilowatts(pub f64);

impl Display for Kilowatts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} kW", self.0)
    }
}

impl std::fmt::Debug for Kilowatts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}
