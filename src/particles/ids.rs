use core::fmt;

/// The global, rank-independent identity of a particle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct ParticleId(pub u32);

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The type tag of a particle, used to select interactions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct ParticleType(pub u32);

impl ParticleType {
    /// The background type given to particles that no longer take part in
    /// any type-specific interaction.
    pub const DEFAULT: ParticleType = ParticleType(0);
}

impl fmt::Display for ParticleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The identifier of a bonded interaction type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct BondTypeId(pub u32);

impl fmt::Display for BondTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A handle to a particle copy in a rank-local particle store.
///
/// Unlike a [`ParticleId`], a handle may designate a ghost copy and is only
/// meaningful for the store that produced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParticleHandle(pub usize);
