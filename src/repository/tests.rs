//! Repository Integration Tests
//!
//! Tests for the repositories with an in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::domain::{
        Book, BookStatus, ContainerKind, DomainError, Notebook, Recipe,
    };
    use crate::repository::{
        init_db_in_memory, BookRepository, CollectionPositioningOperations, CollectionRepository,
        DbConn, NotebookRepository, RecipeRepository, Repository, SearchableRepository,
    };

    fn setup_test_db() -> DbConn {
        init_db_in_memory().expect("Failed to init test DB")
    }

    async fn create_recipe(conn: &DbConn, title: &str) -> u32 {
        let repo = RecipeRepository::new(conn.clone());
        let created = repo
            .create(&Recipe::new(0, 1, title.to_string()))
            .await
            .expect("Failed to create recipe");
        created.id
    }

    async fn create_notebook(conn: &DbConn, title: &str) -> u32 {
        let repo = NotebookRepository::new(conn.clone());
        let created = repo
            .create(&Notebook::new(0, 1, title.to_string()))
            .await
            .expect("Failed to create notebook");
        created.id
    }

    /// Notebook collection plus a notebook holding `titles` in order
    async fn collection_with_members(
        conn: &DbConn,
        titles: &[&str],
    ) -> (CollectionRepository, u32, Vec<u32>) {
        let collection = CollectionRepository::new(conn.clone(), ContainerKind::Notebook);
        let notebook_id = create_notebook(conn, "Sunday dinners").await;

        let mut recipe_ids = Vec::new();
        for title in titles {
            let rid = create_recipe(conn, title).await;
            collection.add_member(notebook_id, rid).await.expect("add failed");
            recipe_ids.push(rid);
        }
        (collection, notebook_id, recipe_ids)
    }

    /// Positions of a container must always be exactly 0..n-1
    async fn assert_contiguous(collection: &CollectionRepository, container_id: u32) {
        let members = collection.members(container_id).await.expect("members failed");
        for (i, m) in members.iter().enumerate() {
            assert_eq!(m.position, i as i32, "gap or duplicate at index {}", i);
        }
    }

    // ---- recipe CRUD ----

    #[tokio::test]
    async fn test_create_and_find_recipe() {
        let conn = setup_test_db();
        let repo = RecipeRepository::new(conn.clone());

        let mut recipe = Recipe::new(0, 1, "Borscht".to_string());
        recipe.ingredients = vec!["beets".to_string(), "cabbage".to_string()];
        recipe.steps = "Simmer everything.".to_string();
        recipe.add_tag("soup".to_string());

        let created = repo.create(&recipe).await.expect("create failed");
        assert!(created.id > 0);

        let found = repo.find_by_id(created.id).await.expect("find failed").unwrap();
        assert_eq!(found.title, "Borscht");
        assert_eq!(found.ingredients, vec!["beets", "cabbage"]);
        assert!(found.has_tag("soup"));
    }

    #[tokio::test]
    async fn test_update_recipe() {
        let conn = setup_test_db();
        let repo = RecipeRepository::new(conn.clone());

        let mut created = repo
            .create(&Recipe::new(0, 1, "Original".to_string()))
            .await
            .unwrap();
        created.title = "Updated".to_string();
        created.author = Some("Grandma Rosa".to_string());

        repo.update(&created).await.expect("update failed");
        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.title, "Updated");
        assert_eq!(found.author.as_deref(), Some("Grandma Rosa"));
    }

    #[tokio::test]
    async fn test_update_missing_recipe_is_not_found() {
        let conn = setup_test_db();
        let repo = RecipeRepository::new(conn.clone());

        let ghost = Recipe::new(999, 1, "Ghost".to_string());
        let err = repo.update(&ghost).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_by_owner_scopes_rows() {
        let conn = setup_test_db();
        let repo = RecipeRepository::new(conn.clone());

        repo.create(&Recipe::new(0, 1, "Mine".to_string())).await.unwrap();
        repo.create(&Recipe::new(0, 2, "Theirs".to_string())).await.unwrap();

        let mine = repo.list_by_owner(1).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "Mine");
    }

    #[tokio::test]
    async fn test_search_recipes_by_title() {
        let conn = setup_test_db();
        let repo = RecipeRepository::new(conn.clone());

        repo.create(&Recipe::new(0, 1, "Apple pie".to_string())).await.unwrap();
        repo.create(&Recipe::new(0, 1, "Apple strudel".to_string())).await.unwrap();
        repo.create(&Recipe::new(0, 1, "Goulash".to_string())).await.unwrap();

        let hits = repo.search(1, "apple").await.unwrap();
        assert_eq!(hits.len(), 2);
    }

    // ---- membership: add ----

    #[tokio::test]
    async fn test_add_into_empty_container_assigns_zero() {
        let conn = setup_test_db();
        let collection = CollectionRepository::new(conn.clone(), ContainerKind::Notebook);
        let notebook_id = create_notebook(&conn, "Empty").await;
        let rid = create_recipe(&conn, "First").await;

        let position = collection.add_member(notebook_id, rid).await.expect("add failed");
        assert_eq!(position, 0);
    }

    #[tokio::test]
    async fn test_add_appends_after_tail() {
        let conn = setup_test_db();
        let (collection, notebook_id, _) = collection_with_members(&conn, &["r1", "r2"]).await;
        let r3 = create_recipe(&conn, "r3").await;

        let position = collection.add_member(notebook_id, r3).await.expect("add failed");
        assert_eq!(position, 2);

        let ids = collection.member_recipe_ids(notebook_id).await.unwrap();
        assert_eq!(ids.last(), Some(&r3));
        assert_contiguous(&collection, notebook_id).await;
    }

    #[tokio::test]
    async fn test_duplicate_add_fails_and_leaves_one_row() {
        let conn = setup_test_db();
        let (collection, notebook_id, recipe_ids) = collection_with_members(&conn, &["r1"]).await;

        let err = collection.add_member(notebook_id, recipe_ids[0]).await.unwrap_err();
        assert!(matches!(err, DomainError::Duplicate(_)));

        let members = collection.members(notebook_id).await.unwrap();
        assert_eq!(members.len(), 1);
    }

    #[tokio::test]
    async fn test_add_unknown_container_or_recipe() {
        let conn = setup_test_db();
        let collection = CollectionRepository::new(conn.clone(), ContainerKind::Notebook);
        let notebook_id = create_notebook(&conn, "N").await;
        let rid = create_recipe(&conn, "R").await;

        let err = collection.add_member(999, rid).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
        let err = collection.add_member(notebook_id, 999).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    // ---- membership: remove ----

    #[tokio::test]
    async fn test_remove_middle_member_renumbers() {
        let conn = setup_test_db();
        let (collection, notebook_id, ids) =
            collection_with_members(&conn, &["r1", "r2", "r3"]).await;

        collection.remove_member(notebook_id, ids[1]).await.expect("remove failed");

        let members = collection.members(notebook_id).await.unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].recipe_id, ids[0]);
        assert_eq!(members[0].position, 0);
        assert_eq!(members[1].recipe_id, ids[2]);
        assert_eq!(members[1].position, 1);
    }

    #[tokio::test]
    async fn test_remove_last_member_leaves_empty_container() {
        let conn = setup_test_db();
        let (collection, notebook_id, ids) = collection_with_members(&conn, &["only"]).await;

        collection.remove_member(notebook_id, ids[0]).await.expect("remove failed");
        let members = collection.members(notebook_id).await.unwrap();
        assert!(members.is_empty());
    }

    #[tokio::test]
    async fn test_remove_absent_member_is_not_found() {
        let conn = setup_test_db();
        let (collection, notebook_id, ids) = collection_with_members(&conn, &["r1"]).await;

        collection.remove_member(notebook_id, ids[0]).await.unwrap();
        let err = collection.remove_member(notebook_id, ids[0]).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    // ---- membership: reorder ----

    #[tokio::test]
    async fn test_reorder_round_trip() {
        let conn = setup_test_db();
        let (collection, notebook_id, ids) =
            collection_with_members(&conn, &["r1", "r2", "r3"]).await;

        let new_order = vec![ids[2], ids[0], ids[1]];
        collection.reorder(notebook_id, &new_order).await.expect("reorder failed");

        assert_eq!(collection.member_recipe_ids(notebook_id).await.unwrap(), new_order);
        assert_contiguous(&collection, notebook_id).await;
    }

    #[tokio::test]
    async fn test_reorder_is_idempotent() {
        let conn = setup_test_db();
        let (collection, notebook_id, ids) =
            collection_with_members(&conn, &["r1", "r2", "r3"]).await;

        let order = vec![ids[1], ids[2], ids[0]];
        collection.reorder(notebook_id, &order).await.unwrap();
        collection.reorder(notebook_id, &order).await.unwrap();

        assert_eq!(collection.member_recipe_ids(notebook_id).await.unwrap(), order);
        assert_contiguous(&collection, notebook_id).await;
    }

    #[tokio::test]
    async fn test_reorder_rejects_non_permutation() {
        let conn = setup_test_db();
        let (collection, notebook_id, ids) =
            collection_with_members(&conn, &["r1", "r2", "r3"]).await;

        // Too short
        let err = collection.reorder(notebook_id, &ids[..2]).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidOrder(_)));

        // Unknown id swapped in
        let bad = vec![ids[0], ids[1], 9999];
        let err = collection.reorder(notebook_id, &bad).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidOrder(_)));

        // Repeated id
        let dup = vec![ids[0], ids[0], ids[1]];
        let err = collection.reorder(notebook_id, &dup).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidOrder(_)));

        // A rejected reorder must leave the stored order untouched
        assert_eq!(collection.member_recipe_ids(notebook_id).await.unwrap(), ids);
        assert_contiguous(&collection, notebook_id).await;
    }

    #[tokio::test]
    async fn test_reorder_unknown_container() {
        let conn = setup_test_db();
        let collection = CollectionRepository::new(conn.clone(), ContainerKind::Notebook);

        let err = collection.reorder(999, &[]).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_positions_stay_contiguous_across_mixed_operations() {
        let conn = setup_test_db();
        let (collection, notebook_id, mut ids) =
            collection_with_members(&conn, &["a", "b", "c", "d"]).await;

        collection.remove_member(notebook_id, ids[1]).await.unwrap();
        ids.remove(1);
        assert_contiguous(&collection, notebook_id).await;

        let e = create_recipe(&conn, "e").await;
        collection.add_member(notebook_id, e).await.unwrap();
        ids.push(e);
        assert_contiguous(&collection, notebook_id).await;

        ids.reverse();
        collection.reorder(notebook_id, &ids).await.unwrap();
        assert_contiguous(&collection, notebook_id).await;

        collection.remove_member(notebook_id, ids[0]).await.unwrap();
        assert_contiguous(&collection, notebook_id).await;
    }

    #[tokio::test]
    async fn test_book_collection_is_independent_of_notebook_collection() {
        let conn = setup_test_db();
        let notebook_members = CollectionRepository::new(conn.clone(), ContainerKind::Notebook);
        let book_members = CollectionRepository::new(conn.clone(), ContainerKind::Book);

        let notebook_id = create_notebook(&conn, "N").await;
        let book_repo = BookRepository::new(conn.clone());
        let book = book_repo.create(&Book::new(0, 1, "B".to_string())).await.unwrap();
        let rid = create_recipe(&conn, "shared").await;

        notebook_members.add_member(notebook_id, rid).await.unwrap();
        book_members.add_member(book.id, rid).await.unwrap();

        notebook_members.remove_member(notebook_id, rid).await.unwrap();
        assert_eq!(book_members.member_recipe_ids(book.id).await.unwrap(), vec![rid]);
    }

    // ---- cascades ----

    #[tokio::test]
    async fn test_deleting_notebook_removes_memberships() {
        let conn = setup_test_db();
        let (collection, notebook_id, ids) =
            collection_with_members(&conn, &["r1", "r2"]).await;

        let notebook_repo = NotebookRepository::new(conn.clone());
        notebook_repo.delete(notebook_id).await.expect("delete failed");

        assert!(collection.members(notebook_id).await.unwrap().is_empty());

        // Recipes themselves survive
        let recipe_repo = RecipeRepository::new(conn.clone());
        assert!(recipe_repo.find_by_id(ids[0]).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_deleting_recipe_removes_it_from_containers_and_renumbers() {
        let conn = setup_test_db();
        let (collection, notebook_id, ids) =
            collection_with_members(&conn, &["r1", "r2", "r3"]).await;

        let recipe_repo = RecipeRepository::new(conn.clone());
        recipe_repo.delete(ids[0]).await.expect("delete failed");

        let members = collection.members(notebook_id).await.unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].recipe_id, ids[1]);
        assert_contiguous(&collection, notebook_id).await;
    }

    // ---- books ----

    #[tokio::test]
    async fn test_book_status_persists() {
        let conn = setup_test_db();
        let repo = BookRepository::new(conn.clone());

        let book = repo.create(&Book::new(0, 1, "Family vol. 1".to_string())).await.unwrap();
        assert_eq!(book.status, BookStatus::Draft);

        repo.set_status(book.id, BookStatus::Ready).await.unwrap();
        let found = repo.find_by_id(book.id).await.unwrap().unwrap();
        assert_eq!(found.status, BookStatus::Ready);
    }

    #[tokio::test]
    async fn test_reindex_members_closes_gaps() {
        let conn = setup_test_db();
        let (collection, notebook_id, ids) =
            collection_with_members(&conn, &["r1", "r2", "r3"]).await;

        // Gapped positions, as a crashed partial write would leave them
        {
            let guard = conn.lock().await;
            guard
                .execute(
                    "UPDATE notebook_recipes SET position = position * 10 WHERE notebook_id = ?",
                    rusqlite::params![notebook_id],
                )
                .unwrap();
        }

        collection.reindex_members(notebook_id).await.expect("reindex failed");
        assert_contiguous(&collection, notebook_id).await;
        assert_eq!(collection.member_recipe_ids(notebook_id).await.unwrap(), ids);
    }

    #[tokio::test]
    async fn test_next_position_helper() {
        let conn = setup_test_db();
        let (collection, notebook_id, _) = collection_with_members(&conn, &["r1", "r2"]).await;

        assert_eq!(collection.next_position(notebook_id).await.unwrap(), 2);

        let empty = create_notebook(&conn, "empty").await;
        assert_eq!(collection.next_position(empty).await.unwrap(), 0);
    }
}
