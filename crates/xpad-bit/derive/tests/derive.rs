use xpad_bit_derive::Bit;
use xpad_bit_mask::{Bitable, Bitmask};

#[derive(Bit, Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Implicit {
    A,
    B,
    X,
    Y,
}

#[derive(Bit, Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Explicit {
    Y = 1,
    X = 2,
    Start = 12,
    DPadUp = 16,
}

#[test]
fn implicit_variants_use_declaration_index() {
    assert_eq!(Implicit::A.bit(), 1u64 << 0);
    assert_eq!(Implicit::B.bit(), 1u64 << 1);
    assert_eq!(Implicit::X.bit(), 1u64 << 2);
    assert_eq!(Implicit::Y.bit(), 1u64 << 3);
    assert_eq!(Implicit::Y.index(), 3);
}

#[test]
fn explicit_discriminants_pick_the_bit() {
    assert_eq!(Explicit::Y.index(), 1);
    assert_eq!(Explicit::X.bit(), 1u64 << 2);
    assert_eq!(Explicit::Start.index(), 12);
    assert_eq!(Explicit::DPadUp.bit(), 1u64 << 16);
}

#[test]
fn derived_values_work_in_bitmask() {
    let mask = Bitmask::new(&[Explicit::Start, Explicit::DPadUp]);
    assert!(mask.contains_index(12));
    assert!(mask.contains(Explicit::DPadUp));
    assert!(!mask.contains(Explicit::Y));
}
