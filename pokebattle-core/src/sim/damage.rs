//! Damage math, kept as free functions so each piece can be checked against
//! known values.

// Simplified generation 1 formula: https://bulbapedia.bulbagarden.net/wiki/Damage

/// Critical multiplier for a percent roll in `1..=100`: 2 on a draw of 10 or
/// under, 1 otherwise.
pub fn critical_multiplier(roll: u32) -> u32 {
    if roll <= 10 {
        2
    } else {
        1
    }
}

/// Same-type attack bonus: 1.5 when the move's type matches any of the
/// user's types.
pub fn stab_multiplier(move_type: &str, user_types: &[String]) -> f64 {
    if user_types.iter().any(|t| t == move_type) {
        1.5
    } else {
        1.0
    }
}

/// Damage dealt by one attack. Intermediates stay in `f64`; the final value
/// is floored, so fractional inputs shrink and never round up.
pub fn compute_damage(
    level: u32,
    critical: u32,
    attack: u32,
    defense: u32,
    power: u32,
    stab: f64,
) -> u32 {
    let base = (2.0 * level as f64 * critical as f64) / 5.0 + 2.0;
    let raw = (base * (attack as f64 / defense as f64) * power as f64) / 50.0 + 2.0;
    (raw * stab).floor() as u32
}
