use rand::Rng;
use rand::seq::SliceRandom;

use crate::schema::ParkStub;

/// Number of parks in one guide.
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// Uniformly pick `min(count, parks.len())` distinct parks, without replacement.
pub fn select_sample<R: Rng + ?Sized>(parks: &[ParkStub], count: usize, rng: &mut R) -> Vec<ParkStub> {
    parks.choose_multiple(rng, count).cloned().collect()
}
