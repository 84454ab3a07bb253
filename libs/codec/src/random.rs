//! Random alphanumeric strings.

use rand::distr::{Alphanumeric, Distribution};
use rand::Rng;

/// Generates a string of `len` characters drawn uniformly from `[a-zA-Z0-9]`.
pub fn random_alphanumeric(len: usize) -> String {
    random_alphanumeric_with(&mut rand::rng(), len)
}

/// Like [`random_alphanumeric`], drawing from the given generator.
pub fn random_alphanumeric_with<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(Alphanumeric.sample(&mut *rng)))
        .collect()
}
