use crate::domain::market::Decision;

pub const PROMISING_MIN_SCORE: u8 = 3;
pub const AVOID_BELOW_SCORE: u8 = 2;

impl Decision {
    /// `>= 3` is promising, `< 2` is avoid, exactly 2 waits.
    pub fn from_score(score: u8) -> Self {
        if score >= PROMISING_MIN_SCORE {
            Decision::Promising
        } else if score < AVOID_BELOW_SCORE {
            Decision::Avoid
        } else {
            Decision::Wait
        }
    }
}
