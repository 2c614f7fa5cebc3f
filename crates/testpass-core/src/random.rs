//! Randomization utilities used to seed puzzle-style questions.
//!
//! All draws take the RNG explicitly so an attempt can be replayed from its
//! seed. Bounds are inclusive on both ends everywhere in this crate.

use rand::Rng;

use crate::error::EngineError;

/// Draw an integer uniformly from `lower..=upper`.
///
/// The bounds may be given in either order; `random_int(rng, 5, 5)` is
/// always `5`.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, lower: usize, upper: usize) -> usize {
    let (lower, upper) = if lower <= upper {
        (lower, upper)
    } else {
        (upper, lower)
    };
    rng.gen_range(lower..=upper)
}

/// Pick one element uniformly at random.
///
/// A single-element slice always yields that element. An empty slice means a
/// question was loaded with nothing to choose from and is reported as
/// [`EngineError::InvalidArgument`].
pub fn random_choice<'a, T, R: Rng + ?Sized>(
    rng: &mut R,
    items: &'a [T],
) -> Result<&'a T, EngineError> {
    match items.len() {
        0 => Err(EngineError::InvalidArgument(
            "cannot choose from an empty list".into(),
        )),
        1 => Ok(&items[0]),
        len => Ok(&items[random_int(rng, 0, len - 1)]),
    }
}

/// Shuffle `items` in place (Fisher-Yates).
pub fn random_shuffle<T, R: Rng + ?Sized>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = random_int(rng, 0, i);
        items.swap(i, j);
    }
}
