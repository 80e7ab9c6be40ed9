mod bitmask;
mod decode;

pub use bitmask::Bitmask;
pub use decode::decode_bits;

/// A value that occupies a single bit of a [`Bitmask`].
pub trait Bitable {
    fn bit(&self) -> u64;
    fn index(&self) -> u32;
}
