use rand::{Rng, RngCore};

pub const MAP_MIN: i64 = 0;
pub const MAP_MAX: i64 = 100;

/// `[x, y]` grid coordinate
pub type Position = [i64; 2];

pub fn random_position(rng: &mut dyn RngCore) -> Position {
    [
        rng.gen_range(MAP_MIN..=MAP_MAX),
        rng.gen_range(MAP_MIN..=MAP_MAX),
    ]
}

pub fn format_position(position: &[i64]) -> String {
    let parts: Vec<String> = position.iter().map(|v| v.to_string()).collect();
    format!("[{}]", parts.join(", "))
}
