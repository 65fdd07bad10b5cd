use crate::particles::BondTypeId;

/// Registry of the bonded interaction types known to the simulation.
///
/// The collision subsystem only needs to know how many partners each bond
/// type connects.
pub trait BondTypes {
    /// The arity of `bond_type`, i.e., the number of partners stored after the
    /// bond type in a bond list, or `None` if this bond type is not defined.
    fn arity(&self, bond_type: BondTypeId) -> Option<usize>;
}

/// A bond type registry backed by a plain vector of arities.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BondTypeTable {
    arities: Vec<usize>,
}

impl BondTypeTable {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a new bond type with the given arity and returns its identifier.
    pub fn push(&mut self, arity: usize) -> BondTypeId {
        self.arities.push(arity);
        BondTypeId(self.arities.len() as u32 - 1)
    }

    /// The number of defined bond types.
    pub fn len(&self) -> usize {
        self.arities.len()
    }

    /// Is this registry empty?
    pub fn is_empty(&self) -> bool {
        self.arities.is_empty()
    }
}

impl BondTypes for BondTypeTable {
    #[inline]
    fn arity(&self, bond_type: BondTypeId) -> Option<usize> {
        self.arities.get(bond_type.0 as usize).copied()
    }
}

impl<T: BondTypes + ?Sized> BondTypes for &T {
    #[inline]
    fn arity(&self, bond_type: BondTypeId) -> Option<usize> {
        (**self).arity(bond_type)
    }
}
