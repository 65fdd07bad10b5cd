use crate::collision::CollisionModes;
use crate::math::Real;
use crate::particles::BondTypeId;
use core::fmt;

/// The role a bond type plays in the collision parameters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BondRole {
    /// The bond created between the centers of two colliding particles.
    Centers,
    /// The bond created between virtual sites, or between a glued particle and its virtual site.
    VirtualSites,
}

impl fmt::Display for BondRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BondRole::Centers => f.pad("center"),
            BondRole::VirtualSites => f.pad("virtual-site"),
        }
    }
}

/// Errors that can occur when configuring collision detection.
///
/// A rejected configuration has no side effect: the previous parameters stay
/// active and nothing is broadcast.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq)]
pub enum ConfigError {
    /// A virtual-site mode was requested but the particle store cannot hold virtual sites.
    #[error("collision modes {0:?} require virtual sites, which are not available")]
    VirtualSitesUnavailable(CollisionModes),
    /// A virtual-site mode was requested on more than one rank.
    #[error("collision modes {modes:?} only work on a single rank, not {n_ranks}")]
    MultiRankUnsupported {
        /// The requested modes.
        modes: CollisionModes,
        /// The number of ranks of the simulation.
        n_ranks: usize,
    },
    /// The bond type is not defined.
    #[error("the {role} bond type {bond_type} does not exist")]
    UnknownBondType {
        /// What the bond type would have been used for.
        role: BondRole,
        /// The undefined bond type.
        bond_type: BondTypeId,
    },
    /// The center bond type is not a pair bond.
    #[error("the center bond type {bond_type} must be a pair bond, not of arity {arity}")]
    InvalidCenterBondArity {
        /// The offending bond type.
        bond_type: BondTypeId,
        /// Its arity.
        arity: usize,
    },
    /// The virtual-site bond type has an arity the active modes cannot handle.
    #[error("the virtual-site bond type {bond_type} has unsupported arity {arity}")]
    InvalidVirtualSiteBondArity {
        /// The offending bond type.
        bond_type: BondTypeId,
        /// Its arity.
        arity: usize,
    },
    /// A mode requiring `BOND` was requested without it.
    #[error("collision modes {0:?} also require the BOND mode")]
    ImpliedModeMissing(CollisionModes),
    /// A distance parameter is negative, zero where it must be positive, or not finite.
    #[error("invalid value {value} for the collision parameter `{parameter}`")]
    InvalidDistance {
        /// The name of the parameter.
        parameter: &'static str,
        /// Its rejected value.
        value: Real,
    },
}

impl ConfigError {
    /// A stable numeric code identifying this kind of error.
    pub fn code(&self) -> i32 {
        match self {
            ConfigError::VirtualSitesUnavailable(_) => 1,
            ConfigError::MultiRankUnsupported { .. } => 2,
            ConfigError::UnknownBondType { .. } => 3,
            ConfigError::InvalidCenterBondArity { .. } => 4,
            ConfigError::InvalidVirtualSiteBondArity { .. } => 5,
            ConfigError::ImpliedModeMissing(_) => 6,
            ConfigError::InvalidDistance { .. } => 7,
        }
    }
}
