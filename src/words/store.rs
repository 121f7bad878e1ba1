use super::word::{ValidatedWord, WordEntry, keyword_pattern};
use crate::error::{Error, Result};
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::info;

/// Storage port for the word list.
///
/// Listings are ordered by id. Keyword searches match a trimmed keyword as a
/// case-insensitive substring of either the English or the Japanese text,
/// folding case with [`fold_case`](super::fold_case) rather than SQLite's
/// ASCII-only `LIKE`; a blank keyword does not filter.
#[async_trait]
pub trait WordStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<WordEntry>>;

    async fn find_all(&self) -> Result<Vec<WordEntry>>;

    async fn create(&self, word: &ValidatedWord) -> Result<WordEntry>;

    /// Overwrite both texts of an existing word. `NotFound` if `id` is unknown.
    async fn update(&self, id: i64, word: &ValidatedWord) -> Result<WordEntry>;

    /// `NotFound` if `id` is unknown.
    async fn delete(&self, id: i64) -> Result<()>;

    async fn count_all(&self) -> Result<u64>;

    async fn find_page(&self, offset: u64, limit: u64) -> Result<Vec<WordEntry>>;

    async fn count_by_keyword(&self, keyword: &str) -> Result<u64>;

    async fn find_page_by_keyword(
        &self,
        keyword: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<WordEntry>>;

    /// One word drawn uniformly from the whole list, `None` if it is empty.
    async fn select_random(&self) -> Result<Option<WordEntry>>;

    /// Up to `count` distinct Japanese texts in random order, taken from words
    /// other than `exclude_id` and never equal to that word's own Japanese.
    async fn select_random_distractors(&self, exclude_id: i64, count: usize)
    -> Result<Vec<String>>;
}

#[derive(Clone)]
pub struct SqliteWordStore {
    pool: SqlitePool,
}

impl SqliteWordStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn to_count(value: i64) -> u64 {
    value.max(0) as u64
}

#[async_trait]
impl WordStore for SqliteWordStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<WordEntry>> {
        let word = sqlx::query_as("SELECT id, english, japanese FROM word WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(word)
    }

    async fn find_all(&self) -> Result<Vec<WordEntry>> {
        let words = sqlx::query_as("SELECT id, english, japanese FROM word ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(words)
    }

    async fn create(&self, word: &ValidatedWord) -> Result<WordEntry> {
        let mut tx = self.pool.begin().await?;
        let created: WordEntry = sqlx::query_as(
            "INSERT INTO word (english, japanese, english_folded, japanese_folded) \
             VALUES (?1, ?2, ?3, ?4) \
             RETURNING id, english, japanese",
        )
        .bind(word.english())
        .bind(word.japanese())
        .bind(word.english_folded())
        .bind(word.japanese_folded())
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        info!(id = created.id, english = created.english, "Word created");
        Ok(created)
    }

    async fn update(&self, id: i64, word: &ValidatedWord) -> Result<WordEntry> {
        let mut tx = self.pool.begin().await?;
        let updated: Option<WordEntry> = sqlx::query_as(
            "UPDATE word SET english = ?1, japanese = ?2, english_folded = ?3, \
             japanese_folded = ?4 WHERE id = ?5 \
             RETURNING id, english, japanese",
        )
        .bind(word.english())
        .bind(word.japanese())
        .bind(word.english_folded())
        .bind(word.japanese_folded())
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let updated = updated.ok_or(Error::NotFound)?;
        tx.commit().await?;

        info!(id, english = updated.english, "Word updated");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM word WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound);
        }
        tx.commit().await?;

        info!(id, "Word deleted");
        Ok(())
    }

    async fn count_all(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM word")
            .fetch_one(&self.pool)
            .await?;
        Ok(to_count(count))
    }

    async fn find_page(&self, offset: u64, limit: u64) -> Result<Vec<WordEntry>> {
        let words = sqlx::query_as(
            "SELECT id, english, japanese FROM word ORDER BY id LIMIT ?1 OFFSET ?2",
        )
        .bind(to_sql_int(limit))
        .bind(to_sql_int(offset))
        .fetch_all(&self.pool)
        .await?;
        Ok(words)
    }

    async fn count_by_keyword(&self, keyword: &str) -> Result<u64> {
        let Some(pattern) = keyword_pattern(keyword) else {
            return self.count_all().await;
        };

        let count: i64 = sqlx::query_scalar(
            r"SELECT COUNT(*) FROM word
              WHERE english_folded LIKE ?1 ESCAPE '\'
                 OR japanese_folded LIKE ?1 ESCAPE '\'",
        )
        .bind(pattern)
        .fetch_one(&self.pool)
        .await?;
        Ok(to_count(count))
    }

    async fn find_page_by_keyword(
        &self,
        keyword: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<WordEntry>> {
        let Some(pattern) = keyword_pattern(keyword) else {
            return self.find_page(offset, limit).await;
        };

        let words = sqlx::query_as(
            r"SELECT id, english, japanese FROM word
              WHERE english_folded LIKE ?1 ESCAPE '\'
                 OR japanese_folded LIKE ?1 ESCAPE '\'
              ORDER BY id LIMIT ?2 OFFSET ?3",
        )
        .bind(pattern)
        .bind(to_sql_int(limit))
        .bind(to_sql_int(offset))
        .fetch_all(&self.pool)
        .await?;
        Ok(words)
    }

    async fn select_random(&self) -> Result<Option<WordEntry>> {
        let word =
            sqlx::query_as("SELECT id, english, japanese FROM word ORDER BY RANDOM() LIMIT 1")
                .fetch_optional(&self.pool)
                .await?;
        Ok(word)
    }

    async fn select_random_distractors(
        &self,
        exclude_id: i64,
        count: usize,
    ) -> Result<Vec<String>> {
        let distractors = sqlx::query_scalar(
            "SELECT japanese FROM (
                 SELECT DISTINCT japanese FROM word
                 WHERE id <> ?1
                   AND japanese NOT IN (SELECT japanese FROM word WHERE id = ?1)
             )
             ORDER BY RANDOM() LIMIT ?2",
        )
        .bind(exclude_id)
        .bind(i64::try_from(count).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;
        Ok(distractors)
    }
}
