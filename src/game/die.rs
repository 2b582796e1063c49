//! A single six-sided die.
//!
//! A die carries a stable identifier, its current face and a held flag.
//! Held dice keep their face through rolls until they are reset.

use std::fmt;

use rand::Rng;

use crate::error::GameError;

/// Number of faces on every die.
pub const FACES: u8 = 6;

/// Identifies a die on the table. Identifiers are 1-based and follow the
/// order the dice were created in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DieId(u32);

impl DieId {
    pub const fn new(n: u32) -> Self {
        DieId(n)
    }

    /// Returns the identifier of the die at a zero-based table position.
    pub const fn from_index(index: usize) -> Self {
        DieId(index as u32 + 1)
    }

    /// Parses an identifier as typed by a caller, e.g. `"3"`.
    pub fn parse(s: &str) -> Option<DieId> {
        s.trim().parse::<u32>().ok().filter(|&n| n > 0).map(DieId)
    }
}

impl fmt::Display for DieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A six-sided die that can be held between rolls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Die {
    id: DieId,
    face: u8,
    held: bool,
}

impl Die {
    /// Creates an unheld die showing a random face.
    pub fn new<R: Rng>(id: DieId, rng: &mut R) -> Self {
        Die {
            id,
            face: random_face(rng),
            held: false,
        }
    }

    /// Creates an unheld die showing the given face.
    pub fn with_face(id: DieId, face: u8) -> Result<Self, GameError> {
        if !(1..=FACES).contains(&face) {
            return Err(GameError::InvalidFace(face));
        }
        Ok(Die {
            id,
            face,
            held: false,
        })
    }

    /// Rolls the die unless it is held.
    pub fn roll<R: Rng>(&mut self, rng: &mut R) {
        if !self.held {
            self.face = random_face(rng);
        }
    }

    pub fn hold(&mut self) {
        self.held = true;
    }

    /// Releases the die and gives it a fresh face.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.held = false;
        self.face = random_face(rng);
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn face(&self) -> u8 {
        self.face
    }

    pub fn id(&self) -> DieId {
        self.id
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.face)
    }
}

fn random_face<R: Rng>(rng: &mut R) -> u8 {
    rng.gen_range(1..=FACES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn new_die_is_unheld_and_in_range() {
        let mut rng = SmallRng::seed_from_u64(1);
        for i in 0..100 {
            let die = Die::new(DieId::from_index(i), &mut rng);
            assert!(!die.is_held());
            assert!((1..=6).contains(&die.face()));
        }
    }

    #[test]
    fn rolls_stay_in_range_and_cover_all_faces() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut die = Die::new(DieId::new(1), &mut rng);
        let mut seen = [false; 6];
        for _ in 0..600 {
            die.roll(&mut rng);
            let face = die.face();
            assert!((1..=6).contains(&face));
            seen[(face - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "every face should appear: {:?}", seen);
    }

    #[test]
    fn held_die_keeps_its_face() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut die = Die::with_face(DieId::new(1), 4).unwrap();
        die.hold();
        die.hold();
        assert!(die.is_held());
        for _ in 0..50 {
            die.roll(&mut rng);
            assert_eq!(die.face(), 4);
        }
    }

    #[test]
    fn reset_releases_the_die() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut die = Die::with_face(DieId::new(2), 6).unwrap();
        die.hold();
        die.reset(&mut rng);
        assert!(!die.is_held());
        assert!((1..=6).contains(&die.face()));
    }

    #[test]
    fn with_face_rejects_out_of_range() {
        assert_eq!(
            Die::with_face(DieId::new(1), 0),
            Err(GameError::InvalidFace(0))
        );
        assert_eq!(
            Die::with_face(DieId::new(1), 7),
            Err(GameError::InvalidFace(7))
        );
    }

    #[test]
    fn die_id_parse() {
        assert_eq!(DieId::parse("3"), Some(DieId::new(3)));
        assert_eq!(DieId::parse(" 12 "), Some(DieId::new(12)));
        assert_eq!(DieId::parse("0"), None);
        assert_eq!(DieId::parse("x"), None);
        assert_eq!(DieId::from_index(0), DieId::new(1));
    }

    #[test]
    fn display_shows_face() {
        let die = Die::with_face(DieId::new(1), 5).unwrap();
        assert_eq!(die.to_string(), "5");
    }
}
