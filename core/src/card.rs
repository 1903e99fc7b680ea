use serde::Serialize;

use crate::{CardId, PairId};

/// A single card on the board as the engine sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub symbol: &'static str,
    pub pair_id: PairId,
    pub is_flipped: bool,
    pub is_matched: bool,
}

impl Card {
    pub const fn new(id: CardId, symbol: &'static str, pair_id: PairId) -> Self {
        Self {
            id,
            symbol,
            pair_id,
            is_flipped: false,
            is_matched: false,
        }
    }

    pub const fn is_face_down(&self) -> bool {
        !self.is_flipped && !self.is_matched
    }

    pub fn matches(&self, other: &Card) -> bool {
        self.pair_id == other.pair_id && self.id != other.id
    }
}
