use std::fmt::{Display, Formatter};

use crate::quantity::Kilowatts;

/// The configured source variants. Adding one is a matter of declaring its
/// name, initial level, and low-output threshold below.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SourceKind {
    Solar,
    Wind,
    Hydro,
}

impl SourceKind {
    pub const ALL: [Self; 3] = [Self::Solar, Self::Wind, Self::Hydro];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Solar => "Solar Energy",
            Self::Wind => "Wind Energy",
            Self::Hydro => "Hydro Energy",
        }
    }

    pub const fn initial(self) -> Kilowatts {
        match self {
            Self::Solar => Kilowatts(100.0),
            Self::Wind => Kilowatts(200.0),
            Self::Hydro => Kilowatts(300.0),
        }
    }

    pub const fn threshold(self) -> Kilowatts {
        match self {
            Self::Solar => Kilowatts(50.0),
            Self::Wind => Kilowatts(100.0),
            Self::Hydro => Kilowatts(200.0),
        }
    }
}

/// One energy source with its owned, mutable output level.
#[derive(Clone, Copy, Debug)]
pub struct EnergySource {
    kind: SourceKind,
    energy: Kilowatts,
}

impl EnergySource {
    pub const fn new(kind: SourceKind) -> Self {
        Self { kind, energy: kind.initial() }
    }

    pub const fn kind(&self) -> SourceKind {
        self.kind
    }

    pub const fn source_name(&self) -> &'static str {
        self.kind.name()
    }

    /// Report the current output level. «Generation» is a pure accessor:
    /// the level only changes through [`Self::set_energy`].
    pub const fn generate_energy(&self) -> Kilowatts {
        self.energy
    }

    /// Overwrite the output level unconditionally. Negative and absurd
    /// values are accepted as-is.
    pub const fn set_energy(&mut self, energy: Kilowatts) {
        self.energy = energy;
    }

    /// Flag a diagnostic when the output is strictly below the variant's
    /// threshold. The threshold value itself is healthy.
    pub fn check_for_issues(&self) -> Option<LowOutput> {
        (self.generate_energy() < self.kind.threshold()).then(|| LowOutput {
            source_name: self.source_name(),
            energy: self.energy,
            threshold: self.kind.threshold(),
        })
    }
}

/// Low-output diagnostic for a single source.
#[derive(Clone, Copy, Debug)]
pub struct LowOutput {
    pub source_name: &'static str,
    pub energy: Kilowatts,
    pub threshold: Kilowatts,
}

impl Display for LowOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} output is low: {} is below the {} threshold",
            self.source_name, self.energy, self.threshold,
        )
    }
}
