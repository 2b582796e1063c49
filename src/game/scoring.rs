//! The fixed scoring rule.
//!
//! A roll qualifies when it shows a 6, a 5 and a 4 somewhere among its dice.
//! A qualifying roll scores the sum of every face minus [`SCORE_OFFSET`],
//! which is what the remaining dice contribute.

/// Faces a roll must contain to score, in the order they are held.
pub const QUALIFYING_FACES: [u8; 3] = [6, 5, 4];

/// Subtracted from the face sum of a qualifying roll.
pub const SCORE_OFFSET: i32 = 15;

/// Returns true if the faces include every qualifying face.
pub fn qualifies(faces: &[u8]) -> bool {
    QUALIFYING_FACES.iter().all(|q| faces.contains(q))
}

/// Scores a roll, or returns `None` if it does not qualify.
pub fn score(faces: &[u8]) -> Option<i32> {
    if !qualifies(faces) {
        return None;
    }
    let total: i32 = faces.iter().map(|&f| f as i32).sum();
    Some(total - SCORE_OFFSET)
}
