use crate::particles::{BondTypeId, BondTypes, ParticleId};
use smallvec::SmallVec;

/// The bonds stored on a single particle.
///
/// Bonds are packed one after the other as `[bond_type, partner_1, ..., partner_n]`
/// where `n` is the arity declared for `bond_type`. The list itself does not know
/// the arities, so it can only be traversed with the help of a [`BondTypes`] registry.
///
/// Bonds are only ever appended. Most particles carry a handful of bonds, which
/// fit in the inline storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BondList {
    words: SmallVec<[u32; 4]>,
}

impl BondList {
    /// An empty bond list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a bond of type `bond_type` to the given partners.
    ///
    /// The number of partners must match the arity of `bond_type`.
    pub fn push(&mut self, bond_type: BondTypeId, partners: &[ParticleId]) {
        self.words.push(bond_type.0);
        self.words.extend(partners.iter().map(|p| p.0));
    }

    /// Is this list empty?
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterates through the bonds of this list, using `bond_types` to step over
    /// bonds of different arities.
    pub fn iter<'a, B: BondTypes + ?Sized>(&'a self, bond_types: &'a B) -> BondIter<'a, B> {
        BondIter {
            words: &self.words,
            bond_types,
            pos: 0,
        }
    }

    /// The number of bonds stored in this list.
    pub fn len<B: BondTypes + ?Sized>(&self, bond_types: &B) -> usize {
        self.iter(bond_types).count()
    }

    /// Does this list contain a bond of type `bond_type` whose first partner is `partner`?
    #[inline]
    pub fn contains<B: BondTypes + ?Sized>(
        &self,
        bond_types: &B,
        bond_type: BondTypeId,
        partner: ParticleId,
    ) -> bool {
        self.iter(bond_types)
            .any(|bond| bond.bond_type == bond_type && bond.partner(0) == Some(partner))
    }
}

/// A bond read from a [`BondList`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Bond<'a> {
    /// The type of this bond.
    pub bond_type: BondTypeId,
    partners: &'a [u32],
}

impl<'a> Bond<'a> {
    /// The number of partners of this bond.
    pub fn arity(&self) -> usize {
        self.partners.len()
    }

    /// The `i`-th partner of this bond.
    pub fn partner(&self, i: usize) -> Option<ParticleId> {
        self.partners.get(i).copied().map(ParticleId)
    }

    /// All the partners of this bond.
    pub fn partners(&self) -> impl Iterator<Item = ParticleId> + 'a {
        self.partners.iter().copied().map(ParticleId)
    }
}

/// Iterator through the bonds of a [`BondList`].
pub struct BondIter<'a, B: ?Sized> {
    words: &'a [u32],
    bond_types: &'a B,
    pos: usize,
}

impl<'a, B: BondTypes + ?Sized> Iterator for BondIter<'a, B> {
    type Item = Bond<'a>;

    fn next(&mut self) -> Option<Bond<'a>> {
        let bond_type = BondTypeId(*self.words.get(self.pos)?);

        let Some(arity) = self.bond_types.arity(bond_type) else {
            log::warn!(
                "Bond list contains unknown bond type {}, skipping the rest of the list.",
                bond_type
            );
            self.pos = self.words.len();
            return None;
        };

        let start = self.pos + 1;
        let end = start + arity;

        if end > self.words.len() {
            log::warn!(
                "Bond of type {} is truncated ({} partners expected).",
                bond_type,
                arity
            );
            self.pos = self.words.len();
            return None;
        }

        self.pos = end;
        Some(Bond {
            bond_type,
            partners: &self.words[start..end],
        })
    }
}
