use sqlx::SqlitePool;

use crate::errors::AppError;

/// Next free rank in `table`: one past the current maximum, or 1 for an empty table.
///
/// `table` and `parent_column` are compile-time identifiers, never user input.
pub async fn next_order(
    pool: &SqlitePool,
    table: &'static str,
    parent: Option<(&'static str, i64)>,
) -> Result<i64, AppError> {
    let next: i64 = match parent {
        Some((parent_column, parent_id)) => {
            sqlx::query_scalar(&format!(
                r#"SELECT COALESCE(MAX("order"), 0) + 1 FROM {table} WHERE {parent_column} = ?"#
            ))
            .bind(parent_id)
            .fetch_one(pool)
            .await?
        }
        None => {
            sqlx::query_scalar(&format!(
                r#"SELECT COALESCE(MAX("order"), 0) + 1 FROM {table}"#
            ))
            .fetch_one(pool)
            .await?
        }
    };
    Ok(next)
}

/// Uses the requested rank, or appends after the current last row.
pub async fn order_or_next(
    pool: &SqlitePool,
    requested: Option<i64>,
    table: &'static str,
    parent: Option<(&'static str, i64)>,
) -> Result<i64, AppError> {
    match requested {
        Some(order) => Ok(order),
        None => next_order(pool, table, parent).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::empty_pool;

    #[tokio::test]
    async fn test_next_order_empty_table_starts_at_one() {
        let (_dir, pool) = empty_pool().await;
        assert_eq!(next_order(&pool, "sections", None).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_next_order_scoped_to_parent() {
        let (_dir, pool) = empty_pool().await;
        sqlx::query(r#"INSERT INTO resume_sections (title, "order") VALUES ('A', 1), ('B', 2)"#)
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(
            r#"INSERT INTO resume_paragraphs (section_id, title, "order") VALUES (1, 'p', 7)"#,
        )
        .execute(&pool)
        .await
        .unwrap();

        let first = next_order(&pool, "resume_paragraphs", Some(("section_id", 1)))
            .await
            .unwrap();
        let second = next_order(&pool, "resume_paragraphs", Some(("section_id", 2)))
            .await
            .unwrap();
        assert_eq!((first, second), (8, 1));
    }
}
