//! HandSeed — 32-байтовый seed раздачи.
//!
//! Колода никогда не хранится в БД: хранится только seed и уже
//! раскрытые карты. Перестановка колоды — чистая функция seed
//! (см. `domain::deck`), поэтому повтор операции всегда сдаёт те же карты.
//!
//! Seed следующей раздачи выводится детерминированным hash-reseeding:
//!     new = H(domain || old || hand_id || hand_no)

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// 32-байтовый seed для перестановки колоды.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSeed {
    pub bytes: [u8; 32],
}

impl HandSeed {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Seed из u64 — для тестов и dev-CLI.
    pub fn from_u64(x: u64) -> Self {
        let mut b = [0u8; 32];
        b[..8].copy_from_slice(&x.to_le_bytes());
        Self { bytes: b }
    }

    /// Свежий случайный seed для новой раздачи.
    pub fn random() -> Self {
        let mut b = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut b);
        Self { bytes: b }
    }

    /// Доменное хэш-расширение: seed следующей раздачи из текущего
    /// с включением контекста (id раздачи + её порядковый номер за столом).
    pub fn derive(&self, hand_id: u64, hand_no: u64) -> Self {
        let mut hasher = Sha256::new();

        hasher.update(b"HOLDEM_ENGINE_SEED_V1");
        hasher.update(self.bytes);
        hasher.update(hand_id.to_le_bytes());
        hasher.update(hand_no.to_le_bytes());

        let hash = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&hash[..32]);

        Self { bytes: out }
    }

    /// Hex-представление для хранения в строке раздачи.
    pub fn to_hex(&self) -> String {
        let mut s = String::with_capacity(64);
        for b in self.bytes {
            s.push_str(&format!("{b:02x}"));
        }
        s
    }

    /// Обратный парсинг hex-строки (ровно 64 символа).
    pub fn from_hex(s: &str) -> Result<Self, String> {
        if s.len() != 64 || !s.is_ascii() {
            return Err(format!("seed hex must have 64 ascii chars, got {:?}", s.len()));
        }
        let mut bytes = [0u8; 32];
        for (i, chunk) in s.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk).map_err(|e| e.to_string())?;
            bytes[i] = u8::from_str_radix(pair, 16).map_err(|e| e.to_string())?;
        }
        Ok(Self { bytes })
    }
}
