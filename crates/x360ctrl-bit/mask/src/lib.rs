mod bitmask;

pub use bitmask::{Bitmask, Iter};

/// A fieldless enum whose variants occupy distinct bits of a mask.
pub trait Bitable: Copy + 'static {
    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    fn bit(&self) -> u64;
    fn index(&self) -> u32;
}
