use rand::Rng;

use crate::Coords;

pub const WIDTH: i32 = 600;
pub const HEIGHT: i32 = 400;
pub const BLOCK: i32 = 10;

/// Uniformly random block-aligned cell within the board bounds.
pub fn random_cell<R: Rng>(rng: &mut R) -> Coords {
    let x = rng.gen_range(0..WIDTH / BLOCK) * BLOCK;
    let y = rng.gen_range(0..HEIGHT / BLOCK) * BLOCK;
    (x, y)
}

/// Draws random cells until one falls outside `excluded`. Exclusion sets
/// are tiny compared to the 60x40 board, so rejection sampling terminates
/// quickly in practice.
pub fn random_free_cell<R: Rng>(rng: &mut R, excluded: impl Fn(Coords) -> bool) -> Coords {
    loop {
        let cell = random_cell(rng);
        if !excluded(cell) {
            return cell;
        }
    }
}

pub fn in_bounds((x, y): Coords) -> bool {
    x >= 0 && x < WIDTH && y >= 0 && y < HEIGHT
}

/// Wraps both axes modulo the board size, e.g. x = -10 lands on 590.
pub fn wrap((x, y): Coords) -> Coords {
    (x.rem_euclid(WIDTH), y.rem_euclid(HEIGHT))
}
