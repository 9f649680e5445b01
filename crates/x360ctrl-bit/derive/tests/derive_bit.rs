use x360ctrl_bit_derive::Bit;
use x360ctrl_bit_mask::{Bitable, Bitmask};

#[derive(Bit, Debug, Clone, Copy, PartialEq, Eq)]
enum Implicit {
    A,
    B,
    C,
}

#[derive(Bit, Debug, Clone, Copy, PartialEq, Eq)]
enum Sparse {
    Up = 0,
    Down,
    Start = 4,
    A = 12,
    B,
}

#[test]
fn implicit_variants_take_consecutive_bits() {
    assert_eq!(Implicit::A.bit(), 1 << 0);
    assert_eq!(Implicit::B.bit(), 1 << 1);
    assert_eq!(Implicit::C.bit(), 1 << 2);
    assert_eq!(Implicit::C.index(), 2);
}

#[test]
fn explicit_discriminants_are_bit_positions() {
    assert_eq!(Sparse::Up.bit(), 0x0001);
    assert_eq!(Sparse::Down.bit(), 0x0002);
    assert_eq!(Sparse::Start.bit(), 0x0010);
    assert_eq!(Sparse::A.bit(), 0x1000);
    assert_eq!(Sparse::B.bit(), 0x2000);
    assert_eq!(Sparse::B.index(), 13);
}

#[test]
fn all_lists_variants_in_declaration_order() {
    assert_eq!(
        Sparse::ALL,
        &[Sparse::Up, Sparse::Down, Sparse::Start, Sparse::A, Sparse::B]
    );
}

#[test]
fn derived_type_works_with_bitmask() {
    let mask = Bitmask::<Sparse>::from_value(0x3011);
    let members: Vec<_> = mask.iter().collect();
    assert_eq!(members, vec![Sparse::Up, Sparse::Start, Sparse::A, Sparse::B]);
}
