//! Sip counts derived from a prompt's punishment and a player's drink.

use super::roster::Drink;

/// Sips a player drinking `drink` takes for a prompt of severity
/// `punishment`.
///
/// Beer counts one and a half sips per point, wine one, spirits half a sip;
/// fractions round up. Players who are not drinking take none. Counts too
/// large for a `u32` saturate.
#[must_use]
pub fn sips_for(punishment: u32, drink: Drink) -> u32 {
    match drink {
        Drink::Beer => u32::try_from((u64::from(punishment) * 3).div_ceil(2)).unwrap_or(u32::MAX),
        Drink::Wine => punishment,
        Drink::Strong => punishment.div_ceil(2),
        Drink::None => 0,
    }
}
