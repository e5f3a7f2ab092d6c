//! Built-in steering for demo and headless play
//!
//! Picks the most urgent falling item and returns the avatar left edge that
//! would sit under it.

use super::avatar::Avatar;
use super::state::FallingItem;

/// Aim at the lowest item that would cost a life; with none of those, the
/// lowest item of any kind (power-ups are worth chasing).
pub fn catch_target(avatar: &Avatar, items: &[FallingItem], shielded: bool) -> Option<f32> {
    let costs_life = |item: &FallingItem| !shielded && !item.kind.is_special();
    let urgent = items
        .iter()
        .filter(|item| costs_life(item))
        .max_by(|a, b| a.bottom().total_cmp(&b.bottom()));
    let pick = urgent.or_else(|| items.iter().max_by(|a, b| a.bottom().total_cmp(&b.bottom())));
    pick.map(|item| item.center_x() - avatar.size.x / 2.0)
}

/// Put the base under the lowest falling critter
pub fn stack_target(base: &Avatar, falling: &[FallingItem]) -> Option<f32> {
    falling
        .iter()
        .max_by(|a, b| a.bottom().total_cmp(&b.bottom()))
        .map(|item| item.center_x() - base.size.x / 2.0)
}
