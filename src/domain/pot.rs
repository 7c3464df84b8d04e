use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::seat::SeatIndex;

/// Один из оспариваемых банков: главный или сайд-пот, возникший из-за
/// олл-ина ниже максимальной ставки стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    /// Фишки в этом банке.
    pub amount: Chips,
    /// Места, претендующие на банк. Набор фиксируется в момент создания
    /// слоя; фолды учитываются позже, при распределении.
    pub eligible_seats: Vec<SeatIndex>,
}

impl Pot {
    pub fn new(amount: Chips, eligible_seats: Vec<SeatIndex>) -> Self {
        Self {
            amount,
            eligible_seats,
        }
    }
}
