use crate::words::fold_case;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();
    pool
}

pub async fn seed_words(pool: &SqlitePool, words: &[(&str, &str)]) {
    for (english, japanese) in words {
        sqlx::query(
            "INSERT INTO word (english, japanese, english_folded, japanese_folded) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(english)
        .bind(japanese)
        .bind(fold_case(english))
        .bind(fold_case(japanese))
        .execute(pool)
        .await
        .unwrap();
    }
}
