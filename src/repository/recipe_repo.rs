//! Recipe Repository
//!
//! SQLite-backed CRUD for recipes. Ingredient lines and tags are ordered
//! sequences stored as JSON text columns.

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{DomainError, DomainResult, Recipe};
use super::db::DbConn;
use super::traits::{Repository, SearchableRepository};

pub struct RecipeRepository {
    conn: DbConn,
}

const RECIPE_COLUMNS: &str =
    "id, owner_id, title, ingredients, steps, author, prep_time, image_url, tags, created_at, updated_at";

impl RecipeRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    /// List an owner's recipes carrying a tag
    pub async fn list_by_tag(&self, owner_id: u32, tag: &str) -> DomainResult<Vec<Recipe>> {
        let all = self.list_by_owner(owner_id).await?;
        Ok(all.into_iter().filter(|r| r.has_tag(tag)).collect())
    }
}

#[async_trait]
impl Repository<Recipe> for RecipeRepository {
    async fn create(&self, entity: &Recipe) -> DomainResult<Recipe> {
        let conn = self.conn.lock().await;

        let ingredients = serde_json::to_string(&entity.ingredients)
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        let tags = serde_json::to_string(&entity.tags)
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        let now = chrono::Utc::now().timestamp_millis();

        conn.execute(
            "INSERT INTO recipes (owner_id, title, ingredients, steps, author, prep_time, image_url, tags, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                entity.owner_id,
                entity.title,
                ingredients,
                entity.steps,
                entity.author,
                entity.prep_time,
                entity.image_url,
                tags,
                now,
                now
            ],
        )
        .map_err(|e| DomainError::Storage(e.to_string()))?;

        let mut created = entity.clone();
        created.id = conn.last_insert_rowid() as u32;
        created.created_at = Some(now);
        created.updated_at = Some(now);
        Ok(created)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Recipe>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn
            .prepare(&format!("SELECT {} FROM recipes WHERE id = ?", RECIPE_COLUMNS))
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        let mut rows = stmt
            .query(params![id])
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        if let Ok(Some(row)) = rows.next() {
            Ok(Some(row_to_recipe(row)?))
        } else {
            Ok(None)
        }
    }

    async fn list_by_owner(&self, owner_id: u32) -> DomainResult<Vec<Recipe>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM recipes WHERE owner_id = ? ORDER BY updated_at DESC, id",
                RECIPE_COLUMNS
            ))
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        let mut rows = stmt
            .query(params![owner_id])
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        let mut recipes = Vec::new();
        while let Ok(Some(row)) = rows.next() {
            recipes.push(row_to_recipe(row)?);
        }
        Ok(recipes)
    }

    async fn update(&self, entity: &Recipe) -> DomainResult<Recipe> {
        let conn = self.conn.lock().await;

        let ingredients = serde_json::to_string(&entity.ingredients)
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        let tags = serde_json::to_string(&entity.tags)
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        let now = chrono::Utc::now().timestamp_millis();

        let changed = conn
            .execute(
                "UPDATE recipes SET title = ?, ingredients = ?, steps = ?, author = ?, prep_time = ?, image_url = ?, tags = ?, updated_at = ? WHERE id = ?",
                params![
                    entity.title,
                    ingredients,
                    entity.steps,
                    entity.author,
                    entity.prep_time,
                    entity.image_url,
                    tags,
                    now,
                    entity.id
                ],
            )
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        if changed == 0 {
            return Err(DomainError::NotFound(format!("Recipe {}", entity.id)));
        }

        let mut updated = entity.clone();
        updated.updated_at = Some(now);
        Ok(updated)
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        // Remove the recipe from every container it belongs to, then close
        // the position gaps those removals leave behind.
        for (member_table, container_column) in
            [("notebook_recipes", "notebook_id"), ("book_recipes", "book_id")]
        {
            let mut container_ids = Vec::new();
            {
                let mut stmt = tx
                    .prepare(&format!(
                        "SELECT {} FROM {} WHERE recipe_id = ?",
                        container_column, member_table
                    ))
                    .map_err(|e| DomainError::Storage(e.to_string()))?;
                let mut rows = stmt
                    .query(params![id])
                    .map_err(|e| DomainError::Storage(e.to_string()))?;
                while let Ok(Some(row)) = rows.next() {
                    let cid: u32 = row.get(0).map_err(|e| DomainError::Storage(e.to_string()))?;
                    container_ids.push(cid);
                }
            }

            tx.execute(
                &format!("DELETE FROM {} WHERE recipe_id = ?", member_table),
                params![id],
            )
            .map_err(|e| DomainError::Storage(e.to_string()))?;

            for cid in container_ids {
                super::collection::renumber_in_tx(&tx, member_table, container_column, cid)?;
            }
        }

        tx.execute("DELETE FROM recipes WHERE id = ?", params![id])
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        tx.commit().map_err(|e| DomainError::Storage(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl SearchableRepository<Recipe> for RecipeRepository {
    async fn search(&self, owner_id: u32, query: &str) -> DomainResult<Vec<Recipe>> {
        let conn = self.conn.lock().await;

        let pattern = format!("%{}%", query);
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM recipes WHERE owner_id = ? AND title LIKE ? ORDER BY title, id",
                RECIPE_COLUMNS
            ))
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        let mut rows = stmt
            .query(params![owner_id, pattern])
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        let mut recipes = Vec::new();
        while let Ok(Some(row)) = rows.next() {
            recipes.push(row_to_recipe(row)?);
        }
        Ok(recipes)
    }
}

/// Convert a database row to Recipe
fn row_to_recipe(row: &rusqlite::Row<'_>) -> DomainResult<Recipe> {
    let ingredients_json: String = row.get(3).unwrap_or_else(|_| "[]".to_string());
    let tags_json: String = row.get(8).unwrap_or_else(|_| "[]".to_string());

    Ok(Recipe {
        id: row.get(0).map_err(|e| DomainError::Storage(e.to_string()))?,
        owner_id: row.get(1).map_err(|e| DomainError::Storage(e.to_string()))?,
        title: row.get(2).map_err(|e| DomainError::Storage(e.to_string()))?,
        ingredients: serde_json::from_str(&ingredients_json).unwrap_or_default(),
        steps: row.get(4).unwrap_or_default(),
        author: row.get(5).ok(),
        prep_time: row.get(6).ok(),
        image_url: row.get(7).ok(),
        tags: serde_json::from_str(&tags_json).unwrap_or_default(),
        created_at: row.get(9).ok(),
        updated_at: row.get(10).ok(),
    })
}
