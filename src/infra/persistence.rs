//! Строки хранилища и репозиторий раздач.
//!
//! Движок не знает технологию хранения: он оперирует снапшотом из трёх
//! видов строк и пишет через compare-and-swap по версии. Глобальных
//! реестров раздач в процессе нет — только репозиторий.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::HandId;
use crate::engine::events::HandEvent;

/// Строка раздачи. Все колонки, кроме id, опциональны: legacy-строки
/// писались до добавления части колонок, реконструкция обязана
/// переварить пропуски.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct HandRow {
    pub hand_id: HandId,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub dealer_pos: Option<i64>,
    #[serde(default)]
    pub small_blind_pos: Option<i64>,
    #[serde(default)]
    pub big_blind_pos: Option<i64>,
    /// -1 или NULL — хода никто не ждёт.
    #[serde(default)]
    pub acting_pos: Option<i64>,
    #[serde(default)]
    pub current_bet: Option<u64>,
    #[serde(default)]
    pub min_raise: Option<u64>,
    /// Борд кодеком карт: "Ah Kd 7c".
    #[serde(default)]
    pub board: Option<String>,
    /// CSV мест, действовавших с границы улицы: "0,2,5".
    #[serde(default)]
    pub acted: Option<String>,
    /// Hex-seed перестановки колоды (64 символа).
    #[serde(default)]
    pub seed: Option<String>,
    #[serde(default)]
    pub version: Option<u64>,
}

/// Строка места.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SeatRow {
    pub seat_pos: i64,
    #[serde(default)]
    pub user_ref: Option<u64>,
    #[serde(default)]
    pub stack: Option<u64>,
    #[serde(default)]
    pub bet: Option<u64>,
    #[serde(default)]
    pub total_contributed: Option<u64>,
    #[serde(default)]
    pub in_hand: Option<bool>,
    #[serde(default)]
    pub is_all_in: Option<bool>,
    /// "Ah Kd" или NULL, пока карты не сданы.
    #[serde(default)]
    pub hole: Option<String>,
}

/// Строка банка.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PotRow {
    #[serde(default)]
    pub amount: Option<u64>,
    /// CSV претендентов: "0,1,3".
    #[serde(default)]
    pub eligible: Option<String>,
}

/// Консистентный снапшот раздачи — результат одной транзакции чтения.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct HandSnapshot {
    pub hand: HandRow,
    pub seats: Vec<SeatRow>,
    pub pots: Vec<PotRow>,
}

impl HandSnapshot {
    /// Версия строки (отсутствующая колонка читается как 0).
    pub fn version(&self) -> u64 {
        self.hand.version.unwrap_or(0)
    }
}

/// Результат записи с compare-and-swap по версии.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// В хранилище уже не та версия, что ожидалась.
    Conflict { current_version: u64 },
}

/// Репозиторий раздач.
///
/// Контракт:
/// - `load_hand` отдаёт консистентный снапшот (включая версию) одним
///   чтением — никакого окна между проверкой и действием;
/// - `save_hand` атомарно сверяет `expected_version` с текущей версией
///   строки и пишет новый снапшот вместе с событиями.
///   `expected_version = None` означает создание новой записи.
pub trait HandRepository {
    fn load_hand(&self, hand_id: HandId) -> Option<HandSnapshot>;

    fn save_hand(
        &mut self,
        hand_id: HandId,
        expected_version: Option<u64>,
        snapshot: HandSnapshot,
        events: &[HandEvent],
    ) -> SaveOutcome;
}

/// In-memory реализация для тестов и dev-CLI.
///
/// Снапшоты лежат как JSON-документы — в том же виде, в котором их
/// хранит настоящий документный стор; чтение проходит через полный
/// decode, так что опциональность колонок honest-проверяется и здесь.
#[derive(Debug, Default)]
pub struct InMemoryHandRepository {
    hands: HashMap<HandId, Value>,
    journals: HashMap<HandId, Vec<Value>>,
}

impl InMemoryHandRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Журнал событий раздачи (для тестов и отладки).
    pub fn journal(&self, hand_id: HandId) -> Vec<HandEvent> {
        self.journals
            .get(&hand_id)
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| serde_json::from_value(v.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl HandRepository for InMemoryHandRepository {
    fn load_hand(&self, hand_id: HandId) -> Option<HandSnapshot> {
        self.hands
            .get(&hand_id)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    fn save_hand(
        &mut self,
        hand_id: HandId,
        expected_version: Option<u64>,
        snapshot: HandSnapshot,
        events: &[HandEvent],
    ) -> SaveOutcome {
        let current = self.load_hand(hand_id).map(|s| s.version());
        match (current, expected_version) {
            (None, None) => {}
            (Some(cur), Some(exp)) if cur == exp => {}
            (Some(cur), _) => return SaveOutcome::Conflict {
                current_version: cur,
            },
            (None, Some(_)) => return SaveOutcome::Conflict { current_version: 0 },
        }

        let doc = serde_json::to_value(&snapshot)
            .expect("снапшот из плоских строк всегда сериализуем");
        self.hands.insert(hand_id, doc);

        let journal = self.journals.entry(hand_id).or_default();
        for event in events {
            if let Ok(v) = serde_json::to_value(event) {
                journal.push(v);
            }
        }
        SaveOutcome::Saved
    }
}
