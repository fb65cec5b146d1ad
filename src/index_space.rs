use core::ops::Range;
use serde::{Deserialize, Serialize};




/**
 * Identifier for a Cartesian axis. `I` is radial, `J` azimuthal and `K`
 * vertical in a shearing sheet.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    I,
    J,
    K,
}




#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]


/**
 * Represents a box-shaped region in a discrete 3D index space. Indexes are
 * `(i, j, k)` tuples of signed 64-bit integers, so that ghost zones below
 * the interior have negative indexes.
 */
pub struct IndexSpace {
    di: Range<i64>,
    dj: Range<i64>,
    dk: Range<i64>,
}




// ============================================================================
impl IndexSpace {


    pub fn new(di: Range<i64>, dj: Range<i64>, dk: Range<i64>) -> Self {

        assert!(
            di.start <= di.end && dj.start <= dj.end && dk.start <= dk.end,
            "index space has negative volume");

        Self { di, dj, dk }
    }


    /**
     * Return the number of indexes on each axis, as `(ni, nj, nk)`.
     */
    pub fn dim(&self) -> (usize, usize, usize) {
        ((self.di.end - self.di.start) as usize,
         (self.dj.end - self.dj.start) as usize,
         (self.dk.end - self.dk.start) as usize)
    }


    /**
     * Return the number of elements in this index space.
     */
    pub fn len(&self) -> usize {
        let (l, m, n) = self.dim();
        l * m * n
    }


    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }


    /**
     * Return the minimum index (inclusive).
     */
    pub fn start(&self) -> (i64, i64, i64) {
        (self.di.start, self.dj.start, self.dk.start)
    }


    /**
     * Return the maximum index (exclusive).
     */
    pub fn end(&self) -> (i64, i64, i64) {
        (self.di.end, self.dj.end, self.dk.end)
    }


    /**
     * Return the index range on the given axis.
     */
    pub fn range(&self, axis: Axis) -> Range<i64> {
        match axis {
            Axis::I => self.di.clone(),
            Axis::J => self.dj.clone(),
            Axis::K => self.dk.clone(),
        }
    }


    /**
     * Determine whether this index space contains the given index.
     */
    pub fn contains(&self, index: (i64, i64, i64)) -> bool {
        self.di.contains(&index.0) && self.dj.contains(&index.1) && self.dk.contains(&index.2)
    }


    /**
     * Determine whether another index space is a subset of this one.
     */
    pub fn contains_space(&self, other: &Self) -> bool {
        other.di.start >= self.di.start && other.di.end <= self.di.end &&
        other.dj.start >= self.dj.start && other.dj.end <= self.dj.end &&
        other.dk.start >= self.dk.start && other.dk.end <= self.dk.end
    }


    /**
     * Expand this index space by the given number of elements on each axis.
     */
    pub fn extend_all(&self, delta: i64) -> Self {
        Self::new(
            self.di.start - delta .. self.di.end + delta,
            self.dj.start - delta .. self.dj.end + delta,
            self.dk.start - delta .. self.dk.end + delta)
    }


    /**
     * Expand this index space by the given number of elements on both sides
     * of a single axis.
     */
    pub fn extend(&self, delta: i64, axis: Axis) -> Self {
        match axis {
            Axis::I => Self::new(self.di.start - delta .. self.di.end + delta, self.dj.clone(), self.dk.clone()),
            Axis::J => Self::new(self.di.clone(), self.dj.start - delta .. self.dj.end + delta, self.dk.clone()),
            Axis::K => Self::new(self.di.clone(), self.dj.clone(), self.dk.start - delta .. self.dk.end + delta),
        }
    }


    /**
     * Return the slab of `width` indexes lying just below the lower edge of
     * this index space on the given axis.
     */
    pub fn lower_slab(&self, width: i64, axis: Axis) -> Self {
        match axis {
            Axis::I => Self::new(self.di.start - width .. self.di.start, self.dj.clone(), self.dk.clone()),
            Axis::J => Self::new(self.di.clone(), self.dj.start - width .. self.dj.start, self.dk.clone()),
            Axis::K => Self::new(self.di.clone(), self.dj.clone(), self.dk.start - width .. self.dk.start),
        }
    }


    /**
     * Return the slab of `width` indexes lying just above the upper edge of
     * this index space on the given axis.
     */
    pub fn upper_slab(&self, width: i64, axis: Axis) -> Self {
        match axis {
            Axis::I => Self::new(self.di.end .. self.di.end + width, self.dj.clone(), self.dk.clone()),
            Axis::J => Self::new(self.di.clone(), self.dj.end .. self.dj.end + width, self.dk.clone()),
            Axis::K => Self::new(self.di.clone(), self.dj.clone(), self.dk.end .. self.dk.end + width),
        }
    }


    /**
     * Return the linear offset for the given index, in a memory buffer
     * aligned with the start of this index space. The `i` index increases
     * fastest, so radial pencils are contiguous.
     */
    pub fn offset(&self, index: (i64, i64, i64)) -> usize {
        let (ni, nj, _) = self.dim();
        let i = (index.0 - self.di.start) as usize;
        let j = (index.1 - self.dj.start) as usize;
        let k = (index.2 - self.dk.start) as usize;
        (k * nj + j) * ni + i
    }


    /**
     * Return an iterator which traverses the index space in memory order
     * (`i` fastest, then `j`, then `k`).
     */
    pub fn iter(&self) -> impl Iterator<Item = (i64, i64, i64)> + '_ {
        self.dk.clone().flat_map(move |k| {
            self.dj.clone().flat_map(move |j| self.di.clone().map(move |i| (i, j, k)))
        })
    }
}




/**
 * Less imposing factory function to construct an IndexSpace object.
 */
pub fn range3d(di: Range<i64>, dj: Range<i64>, dk: Range<i64>) -> IndexSpace {
    IndexSpace::new(di, dj, dk)
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::{range3d, Axis};

    #[test]
    fn offsets_follow_iteration_order() {
        let space = range3d(-2..3, 0..4, 1..3);
        for (n, index) in space.iter().enumerate() {
            assert_eq!(space.offset(index), n);
        }
        assert_eq!(space.iter().count(), space.len());
    }

    #[test]
    fn slabs_lie_outside_the_space() {
        let space = range3d(0..8, 0..6, 0..1);
        let lower = space.lower_slab(3, Axis::I);
        let upper = space.upper_slab(3, Axis::I);
        assert_eq!(lower.start(), (-3, 0, 0));
        assert_eq!(upper.end(), (11, 6, 1));
        assert!(lower.iter().all(|index| !space.contains(index)));
        assert!(upper.iter().all(|index| !space.contains(index)));
        assert!(space.extend(3, Axis::I).contains_space(&lower));
    }
}
