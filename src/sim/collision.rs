//! Player/pursuer contact detection
//!
//! Contact is a proximity test between interpolated centres, measured the
//! short way around the torus. Outcomes depend on the pursuer's mode; the
//! session applies them (see `GameState::resolve_collisions`).

use glam::Vec2;

use super::pursuer::{Mode, Pursuer};
use crate::toroidal_distance;

/// What happens when the player touches a pursuer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Frightened pursuer at this index is eaten
    Eat(usize),
    /// Chasing pursuer at this index catches the player
    Caught(usize),
}

/// True if two centres are within `radius` on the torus
pub fn touching(a: Vec2, b: Vec2, size: Vec2, radius: f32) -> bool {
    toroidal_distance(a, b, size) <= radius
}

/// Contacts in pursuer order.
///
/// Returning pursuers are immune. Scanning stops at the first catch, so at
/// most one life is lost per tick; frightened pursuers touched before that
/// are still eaten.
pub fn find_contacts(player: Vec2, pursuers: &[Pursuer], size: Vec2, radius: f32) -> Vec<Contact> {
    let mut contacts = Vec::new();
    for (i, pursuer) in pursuers.iter().enumerate() {
        if !touching(player, pursuer.mover.position(size), size, radius) {
            continue;
        }
        match pursuer.mode {
            Mode::Frightened => contacts.push(Contact::Eat(i)),
            Mode::Chase => {
                contacts.push(Contact::Caught(i));
                break;
            }
            Mode::ReturningToBase => {}
        }
    }
    contacts
}
