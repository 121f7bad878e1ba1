use sqlx::SqlitePool;
use std::collections::HashSet;
use std::path::Path;
use tangocho::words::{ValidatedWord, WordForm};

/// Statistics from an import operation
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Entries read from the word list
    pub parsed: usize,
    /// Rows inserted into the database
    pub inserted: usize,
    /// Entries skipped as invalid or repeated
    pub skipped: usize,
}

/// Read a word list: a JSON array of `{"english": .., "japanese": ..}` objects.
pub fn parse_word_list(path: &Path) -> Result<Vec<WordForm>, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Import words into the database.
///
/// Entries are validated the same way the admin form validates them, so
/// stored text is trimmed and within length limits. A pair that appears
/// more than once in the list is inserted only once. `limit` caps the
/// number of rows inserted, in list order.
pub async fn import_words(
    pool: &SqlitePool,
    entries: Vec<WordForm>,
    limit: Option<usize>,
) -> Result<ImportStats, Box<dyn std::error::Error>> {
    let mut stats = ImportStats {
        parsed: entries.len(),
        ..ImportStats::default()
    };

    let mut seen = HashSet::new();
    let mut words: Vec<ValidatedWord> = entries
        .into_iter()
        .filter_map(|entry| {
            let Ok(word) = entry.validate() else {
                stats.skipped += 1;
                return None;
            };
            if !seen.insert((word.english().to_string(), word.japanese().to_string())) {
                stats.skipped += 1;
                return None;
            }
            Some(word)
        })
        .collect();

    if let Some(limit) = limit {
        words.truncate(limit);
    }

    const BATCH_SIZE: usize = 500;

    let mut tx = pool.begin().await?;
    for chunk in words.chunks(BATCH_SIZE) {
        let placeholders = vec!["(?, ?, ?, ?)"; chunk.len()].join(", ");
        let sql = format!(
            "INSERT INTO word (english, japanese, english_folded, japanese_folded) \
             VALUES {placeholders}"
        );

        let mut q = sqlx::query(&sql);
        for word in chunk {
            q = q
                .bind(word.english())
                .bind(word.japanese())
                .bind(word.english_folded())
                .bind(word.japanese_folded());
        }

        let result = q.execute(&mut *tx).await?;
        stats.inserted += result.rows_affected() as usize;
    }
    tx.commit().await?;

    Ok(stats)
}
