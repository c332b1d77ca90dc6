use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::snake::Point;

/// Random samples tried before falling back to scanning the free cells.
const MAX_SAMPLES: usize = 64;

/// Picks a uniformly random cell of the `width` x `height` board that is not
/// in `occupied`, or `None` when every cell is taken.
pub fn place_food<R: Rng + ?Sized>(
    occupied: &HashSet<Point>,
    width: i32,
    height: i32,
    rng: &mut R,
) -> Option<Point> {
    if width <= 0 || height <= 0 {
        return None;
    }

    for _ in 0..MAX_SAMPLES {
        let p = Point::new(rng.gen_range(0..width), rng.gen_range(0..height));
        if !occupied.contains(&p) {
            return Some(p);
        }
    }

    // Nearly full board: choose among what's left
    let free: Vec<Point> = (0..height)
        .flat_map(|y| (0..width).map(move |x| Point::new(x, y)))
        .filter(|p| !occupied.contains(p))
        .collect();

    free.choose(rng).copied()
}
