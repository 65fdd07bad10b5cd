use crate::math::{Point, Real};
use crate::particles::ParticleId;
use core::slice;

/// A collision detected during force evaluation, waiting to be resolved.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CollisionRecord {
    /// The first colliding particle. In glue-to-surface mode, this is always
    /// the particle being glued.
    pub id1: ParticleId,
    /// The second colliding particle.
    pub id2: ParticleId,
    /// Where virtual sites created for this collision are placed.
    pub point: Point<Real>,
}

impl CollisionRecord {
    /// Creates a new collision record.
    #[inline]
    pub fn new(id1: ParticleId, id2: ParticleId, point: Point<Real>) -> Self {
        Self { id1, id2, point }
    }

    /// Does this record involve exactly the particles `a` and `b`, in any order?
    pub fn involves(&self, a: ParticleId, b: ParticleId) -> bool {
        (self.id1 == a && self.id2 == b) || (self.id1 == b && self.id2 == a)
    }
}

/// The collisions detected by this rank during the current step.
///
/// Records are only appended during detection, then drained all at once by the
/// resolution. The queue never deduplicates: the same pair may be recorded twice
/// if nothing marked it between two detections.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionQueue {
    records: Vec<CollisionRecord>,
}

impl CollisionQueue {
    /// An empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record at the end of this queue.
    #[inline]
    pub fn push(&mut self, record: CollisionRecord) {
        self.records.push(record);
    }

    /// The number of queued records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Is this queue empty?
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The queued records, in detection order.
    pub fn records(&self) -> &[CollisionRecord] {
        &self.records
    }

    /// Iterates through the queued records, in detection order.
    pub fn iter(&self) -> slice::Iter<'_, CollisionRecord> {
        self.records.iter()
    }

    /// Discards every record, keeping the allocated capacity for the next step.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<'a> IntoIterator for &'a CollisionQueue {
    type Item = &'a CollisionRecord;
    type IntoIter = slice::Iter<'a, CollisionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
