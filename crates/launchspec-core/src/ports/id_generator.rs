//! IdGenerator port - App ID 生成の抽象化
//!
//! 新しい App の `id` はプロセス全体のカウンタではなく、構築時に渡された
//! IdGenerator から取得する。テストでは決定的な ID を使える。
//!
//! # 実装
//! - **SequentialIdGenerator**: `app_1`, `app_2`, ...（フォームのデフォルト値用）
//! - **UlidGenerator**: ULID ベース（衝突しにくい ID が欲しい場合）

use std::sync::atomic::{AtomicU64, Ordering};

use ulid::Ulid;

use crate::domain::ids::{APP_ID_PREFIX, AppId};
use crate::ports::Clock;

/// IdGenerator は App の ID を生成
///
/// # Thread Safety
/// - `Send + Sync` を要求（コレクション間で `Arc` 共有するため）
pub trait IdGenerator: Send + Sync {
    /// App ID を生成
    fn generate_app_id(&self) -> AppId;
}

/// SequentialIdGenerator は連番の ID を生成
///
/// 1 から始まり、呼ぶたびに 1 ずつ増える。
#[derive(Debug)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// 任意の値から始める（テストや再起動後の再開用）
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate_app_id(&self) -> AppId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        AppId::new(format!("{APP_ID_PREFIX}{n}"))
    }
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// Clock を使って現在時刻ベースの ULID を生成します。
/// App ID は小文字が慣例なので、ULID は小文字にして埋め込む。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_app_id(&self) -> AppId {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        let ulid = Ulid::from_parts(timestamp_ms, rand::random());
        AppId::new(format!(
            "{APP_ID_PREFIX}{}",
            ulid.to_string().to_lowercase()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, SystemClock};
    use chrono::{TimeZone, Utc};

    #[test]
    fn sequential_generator_counts_from_one() {
        let id_gen = SequentialIdGenerator::new();

        assert_eq!(id_gen.generate_app_id().as_str(), "app_1");
        assert_eq!(id_gen.generate_app_id().as_str(), "app_2");
        assert_eq!(id_gen.generate_app_id().as_str(), "app_3");
    }

    #[test]
    fn sequential_generator_can_resume() {
        let id_gen = SequentialIdGenerator::starting_at(41);
        assert_eq!(id_gen.generate_app_id().as_str(), "app_41");
    }

    #[test]
    fn ulid_generator_generates_unique_ids() {
        let id_gen = UlidGenerator::new(SystemClock);

        let id1 = id_gen.generate_app_id();
        let id2 = id_gen.generate_app_id();

        assert_ne!(id1, id2);
        assert!(id1.as_str().starts_with(APP_ID_PREFIX));
        assert_eq!(id1.as_str(), id1.as_str().to_lowercase());
    }

    #[test]
    fn ulid_generator_with_fixed_clock_shares_timestamp() {
        let fixed_time = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let id_gen = UlidGenerator::new(FixedClock::new(fixed_time));

        let id1 = id_gen.generate_app_id();
        let id2 = id_gen.generate_app_id();

        // ランダム部分があるので ID は異なる
        assert_ne!(id1, id2);

        // timestamp 部分（先頭 10 文字）は同じ
        let body1 = &id1.as_str()[APP_ID_PREFIX.len()..];
        let body2 = &id2.as_str()[APP_ID_PREFIX.len()..];
        assert_eq!(&body1[..10], &body2[..10]);

        let ulid = Ulid::from_string(&body1.to_uppercase()).unwrap();
        assert_eq!(ulid.timestamp_ms(), fixed_time.timestamp_millis() as u64);
    }
}
