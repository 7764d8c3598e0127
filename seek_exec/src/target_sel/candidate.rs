//! Candidate targets and their weights

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;
use std::fmt::Display;

// Internal
use sim_if::{world::BodyId, Supervisor};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A body considered as a possible navigation target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    /// Name the body was found under
    pub name: String,

    /// Handle to the body, used only for lookups through the supervisor
    pub body: BodyId,

    /// Weight used to rank the candidate
    pub weight: Weight,
}

/// A comparable weight for a candidate body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weight {
    /// The weight value, either a mass in kilograms or a volume in cubic meters depending on
    /// `kind`.
    pub value: f64,

    /// Where the value came from
    pub kind: WeightKind,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Source of a candidate's weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WeightKind {
    /// Explicit mass property, authoritative.
    Mass,

    /// Product of the size property, used as a proxy for lightness when no mass is set.
    Volume,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Candidate {
    /// True if the candidate's weight comes from an explicit mass.
    pub fn is_authoritative(&self) -> bool {
        self.weight.kind == WeightKind::Mass
    }
}

impl Weight {
    /// Weigh a body.
    ///
    /// An explicit mass greater than zero is preferred. Otherwise the product of the three
    /// components of the body's size is used. A body with neither gets an infinite weight, which
    /// is never valid.
    pub fn of_body<S>(supervisor: &S, body: BodyId) -> Self
    where
        S: Supervisor + ?Sized,
    {
        if let Some(mass) = supervisor.body_mass(body) {
            if mass > 0.0 {
                return Self {
                    value: mass,
                    kind: WeightKind::Mass,
                };
            }
        }

        match supervisor.body_size(body) {
            Some(size) => Self {
                value: size[0] * size[1] * size[2],
                kind: WeightKind::Volume,
            },
            None => Self {
                value: std::f64::INFINITY,
                kind: WeightKind::Volume,
            },
        }
    }

    /// A weight is valid if it is finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.value.is_finite() && self.value > 0.0
    }
}

impl Display for WeightKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightKind::Mass => write!(f, "MASS"),
            WeightKind::Volume => write!(f, "volume"),
        }
    }
}
