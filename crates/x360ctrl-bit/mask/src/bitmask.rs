use std::fmt;
use std::marker::PhantomData;
use std::ops::{BitAnd, BitOr, BitXor};

use crate::Bitable;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bitmask<T: Bitable>(pub u64, PhantomData<T>);

impl<T: Bitable> Bitmask<T> {
    /// Create a new bitmask from a slice of values.
    pub fn new(values: &[T]) -> Self {
        let bits = values.iter().fold(0, |acc, v| acc | v.bit());
        Self(bits, PhantomData)
    }

    /// Create an empty bitmask.
    pub const fn empty() -> Self {
        Self(0, PhantomData)
    }

    /// Create a new bitmask from a raw value.
    ///
    /// Bits that don't belong to any variant are kept as is.
    pub const fn from_value(value: u64) -> Self {
        Self(value, PhantomData)
    }

    /// Raw value of the bitmask.
    #[inline]
    pub const fn value(&self) -> u64 {
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

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Check if the bitmask is subset of another bitmask.
    #[inline]
    pub fn is_subset(&self, other: &Bitmask<T>) -> bool {
        self.0 & other.0 == self.0
    }

    /// Check if the bitmask is superset of another bitmask.
    #[inline]
    pub fn is_superset(&self, other: &Bitmask<T>) -> bool {
        other.is_subset(self)
    }

    /// Bits set in exactly one of the two masks.
    #[inline]
    pub fn symmetric_difference(&self, other: &Bitmask<T>) -> Self {
        Self(self.0 ^ other.0, PhantomData)
    }

    /// Bits set in both masks.
    #[inline]
    pub fn intersection(&self, other: &Bitmask<T>) -> Self {
        Self(self.0 & other.0, PhantomData)
    }

    /// Bits set in either mask.
    #[inline]
    pub fn union(&self, other: &Bitmask<T>) -> Self {
        Self(self.0 | other.0, PhantomData)
    }

    /// Count the number of bits set in the bitmask.
    #[inline]
    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate over the variants contained in the mask, in declaration order.
    pub fn iter(&self) -> Iter<T> {
        Iter {
            mask: *self,
            pos: 0,
        }
    }
}

impl<T: Bitable> Default for Bitmask<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Bitable> From<T> for Bitmask<T> {
    fn from(value: T) -> Self {
        Self(value.bit(), PhantomData)
    }
}

impl<T: Bitable> BitAnd for Bitmask<T> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(&rhs)
    }
}

impl<T: Bitable> BitOr for Bitmask<T> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(&rhs)
    }
}

impl<T: Bitable> BitXor for Bitmask<T> {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        self.symmetric_difference(&rhs)
    }
}

impl<T: Bitable + fmt::Debug> fmt::Debug for Bitmask<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Bitable> IntoIterator for Bitmask<T> {
    type Item = T;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Iter<T> {
        self.iter()
    }
}

/// Iterator over the members of a [`Bitmask`].
pub struct Iter<T: Bitable> {
    mask: Bitmask<T>,
    pos: usize,
}

impl<T: Bitable> Iterator for Iter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        while let Some(value) = T::ALL.get(self.pos) {
            self.pos += 1;
            if self.mask.contains(*value) {
                return Some(*value);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::Bitmask;
    use crate::Bitable;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestFlag {
        A = 0,
        B = 1,
        C = 4,
        D = 9,
    }

    impl Bitable for TestFlag {
        const ALL: &'static [Self] =
            &[TestFlag::A, TestFlag::B, TestFlag::C, TestFlag::D];

        fn bit(&self) -> u64 {
            1u64 << (*self as u64)
        }

        fn index(&self) -> u32 {
            *self as u32
        }
    }

    #[test]
    fn empty_creates_no_bits_set() {
        let mask = Bitmask::<TestFlag>::empty();
        assert!(mask.is_empty());
        assert_eq!(mask.iter().count(), 0);
        assert_eq!(mask, Bitmask::default());
    }

    #[test]
    fn new_sets_bits_from_slice_and_handles_duplicates() {
        let mask = Bitmask::new(&[TestFlag::C, TestFlag::A, TestFlag::C]);
        assert!(mask.contains(TestFlag::A));
        assert!(!mask.contains(TestFlag::B));
        assert!(mask.contains(TestFlag::C));
        assert_eq!(mask.value(), 0b1_0001);
        assert_eq!(mask.count(), 2);
    }

    #[test]
    fn insert_and_remove_toggle_bits() {
        let mut mask = Bitmask::empty();
        mask.insert(TestFlag::D);
        mask.insert(TestFlag::B);
        assert!(mask.contains(TestFlag::D));

        mask.remove(TestFlag::D);
        assert!(!mask.contains(TestFlag::D));
        assert!(mask.contains(TestFlag::B));
    }

    #[test]
    fn set_operations_match_raw_bit_arithmetic() {
        let prev = Bitmask::<TestFlag>::from_value(0b01);
        let curr = Bitmask::<TestFlag>::from_value(0b10);

        let changed = curr ^ prev;
        assert_eq!(changed.value(), 0b11);
        assert_eq!((curr & changed).value(), 0b10);
        assert_eq!((prev & changed).value(), 0b01);
        assert_eq!((prev | curr).value(), 0b11);
    }

    #[test]
    fn subset_and_superset() {
        let a = Bitmask::new(&[TestFlag::A]);
        let ab = Bitmask::new(&[TestFlag::A, TestFlag::B]);

        assert!(Bitmask::empty().is_subset(&a));
        assert!(a.is_subset(&ab));
        assert!(ab.is_superset(&a));
        assert!(!ab.is_subset(&a));
    }

    #[test]
    fn iter_yields_members_in_declaration_order() {
        let mask = Bitmask::new(&[TestFlag::D, TestFlag::A, TestFlag::C]);
        let members: Vec<_> = mask.into_iter().collect();
        assert_eq!(members, vec![TestFlag::A, TestFlag::C, TestFlag::D]);
    }

    #[test]
    fn debug_lists_members() {
        let mask = Bitmask::new(&[TestFlag::B, TestFlag::D]);
        assert_eq!(format!("{mask:?}"), "{B, D}");
    }
}
