use std::marker::PhantomData;

use crate::Bitable;

/// A set of [`Bitable`] values packed into a single `u64`.
///
/// Bits that have no `T` variant can still be addressed by index, which lets
/// the set carry positions the enum does not name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bitmask<T: Bitable>(pub u64, PhantomData<T>);

impl<T: Bitable> Default for Bitmask<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Bitable> Bitmask<T> {
    /// Create a new bitmask from a slice of values.
    pub fn new(values: &[T]) -> Self {
        let mut bits = 0;
        for value in values {
            bits |= value.bit();
        }
        Self(bits, PhantomData)
    }

    /// Create an empty bitmask.
    pub const fn empty() -> Self {
        Self(0, PhantomData)
    }

    /// Raw bits of the mask.
    #[inline]
    pub const fn bits(&self) -> u64 {
        self.0
    }

    /// Check if the bitmask contains a specific value.
    #[inline]
    pub fn contains(&self, bit: T) -> bool {
        (self.0 & bit.bit()) != 0
    }

    /// Insert a value to the bitmask.
    #[inline]
    pub fn insert(&mut self, bit: T) {
        self.0 |= bit.bit();
    }

    /// Remove a value from the bitmask.
    #[inline]
    pub fn remove(&mut self, bit: T) {
        self.0 &= !bit.bit();
    }

    /// Check whether the bit at `index` is set. Indices past 63 are never set.
    #[inline]
    pub fn contains_index(&self, index: u32) -> bool {
        index < u64::BITS && (self.0 >> index) & 1 == 1
    }

    /// Set or clear the bit at `index`. Indices past 63 are ignored.
    #[inline]
    pub fn set_index(&mut self, index: u32, value: bool) {
        if index >= u64::BITS {
            return;
        }
        if value {
            self.0 |= 1 << index;
        } else {
            self.0 &= !(1 << index);
        }
    }

    /// Iterate over the indices of set bits in ascending order.
    pub fn iter_indices(&self) -> impl Iterator<Item = u32> {
        let bits = self.0;
        (0..u64::BITS).filter(move |i| (bits >> i) & 1 == 1)
    }

    /// Check if the bitmask is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}
