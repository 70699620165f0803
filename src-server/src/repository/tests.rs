//! Repository Integration Tests
//!
//! Every repository against an in-memory SQLite database.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rusqlite::Connection;
    use shootboard_core::models::{
        Card, CardCategory, Expense, ExpenseCategory, MediaType, Need, ScoutingMedia, Todo,
        DEFAULT_SCOUTING_CATEGORY,
    };

    use crate::domain::DomainError;
    use crate::repository::db::{column_exists, run_migrations};
    use crate::repository::{
        init_db, init_memory_db, CardRepository, Db, ExpenseRepository, MutableRepository,
        NeedRepository, Repository, ScoutingRepository, SettingsRepository, TodoRepository,
    };

    fn setup_test_db() -> Db {
        init_memory_db().expect("Failed to init test DB")
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    fn card(id: &str, d: u32, time: Option<&str>) -> Card {
        Card {
            id: id.to_string(),
            time: time.map(str::to_string),
            ..Card::new(day(d))
        }
    }

    fn media(id: &str, upload_date: &str) -> ScoutingMedia {
        ScoutingMedia {
            id: id.to_string(),
            image_data: format!("data:image/jpeg;base64,{}", id),
            location: Some("Harbour".to_string()),
            description: None,
            scene_number: Some("12".to_string()),
            category: "Exteriors".to_string(),
            media_type: MediaType::Image,
            upload_date: upload_date.to_string(),
            display_order: 0,
        }
    }

    #[tokio::test]
    async fn test_card_round_trip() {
        let repo = CardRepository::new(setup_test_db());

        let created = Card {
            id: "c1".to_string(),
            title: "Rooftop shoot".to_string(),
            description: "Golden hour".to_string(),
            time: Some("18:30".to_string()),
            map_url: Some("https://maps.example/rooftop".to_string()),
            category: CardCategory::Shooting,
            date: day(6),
        };
        repo.create(&created).await.expect("Failed to create");

        let cards = repo.list().await.expect("List failed");
        assert_eq!(cards, vec![created]);
    }

    #[tokio::test]
    async fn test_cards_ordered_by_date_then_time() {
        let repo = CardRepository::new(setup_test_db());
        repo.create(&card("late", 5, Some("18:00"))).await.unwrap();
        repo.create(&card("next-day", 6, Some("07:00"))).await.unwrap();
        repo.create(&card("early", 5, Some("08:00"))).await.unwrap();

        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["early", "late", "next-day"]);
    }

    #[tokio::test]
    async fn test_update_card_replaces_fields() {
        let repo = CardRepository::new(setup_test_db());
        let original = card("c1", 5, None);
        repo.create(&original).await.unwrap();

        let moved = Card {
            title: "Catering".to_string(),
            category: CardCategory::Catering,
            ..original.moved_to(day(7))
        };
        repo.update("c1", &moved).await.expect("Update failed");

        assert_eq!(repo.list().await.unwrap(), vec![moved]);
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_ids_are_noops() {
        let repo = CardRepository::new(setup_test_db());
        repo.create(&card("c1", 5, None)).await.unwrap();

        repo.update("ghost", &card("ghost", 6, None)).await.unwrap();
        repo.delete("ghost").await.unwrap();

        let cards = repo.list().await.unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].date, day(5));
    }

    #[tokio::test]
    async fn test_duplicate_card_id_fails() {
        let repo = CardRepository::new(setup_test_db());
        repo.create(&card("c1", 5, None)).await.unwrap();

        let result = repo.create(&card("c1", 6, None)).await;
        assert!(matches!(result, Err(DomainError::Internal(_))));
    }

    #[tokio::test]
    async fn test_needs_listed_in_creation_order() {
        let repo = NeedRepository::new(setup_test_db());
        for text in ["Tripod", "Gaffer tape", "Extra batteries"] {
            repo.create(&Need::new(text)).await.unwrap();
        }

        let texts: Vec<String> = repo.list().await.unwrap().into_iter().map(|n| n.text).collect();
        assert_eq!(texts, vec!["Tripod", "Gaffer tape", "Extra batteries"]);

        let first = repo.list().await.unwrap().remove(0);
        repo.delete(&first.id).await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_todo_toggle_persists() {
        let repo = TodoRepository::new(setup_test_db());
        let todo = Todo::new("Book the van");
        repo.create(&todo).await.unwrap();

        repo.update(&todo.id, &todo.toggled()).await.unwrap();

        let todos = repo.list().await.unwrap();
        assert_eq!(todos.len(), 1);
        assert!(todos[0].completed);
        assert_eq!(todos[0].text, "Book the van");
    }

    #[tokio::test]
    async fn test_expenses_newest_first() {
        let repo = ExpenseRepository::new(setup_test_db());
        let expense = |id: &str, d: u32, amount: f64| Expense {
            id: id.to_string(),
            category: ExpenseCategory::Equipment,
            description: format!("Expense {}", id),
            amount,
            date: day(d),
        };
        repo.create(&expense("old", 3, 40.0)).await.unwrap();
        repo.create(&expense("new", 9, 12.5)).await.unwrap();

        let listed = repo.list().await.unwrap();
        assert_eq!(listed[0], expense("new", 9, 12.5));
        assert_eq!(listed[1].id, "old");
    }

    #[tokio::test]
    async fn test_negative_expense_rejected() {
        let repo = ExpenseRepository::new(setup_test_db());
        let expense = Expense {
            id: "e1".to_string(),
            category: ExpenseCategory::Crew,
            description: "Refund".to_string(),
            amount: -20.0,
            date: day(5),
        };

        let result = repo.create(&expense).await;
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_settings_upsert() {
        let repo = SettingsRepository::new(setup_test_db());
        assert_eq!(repo.get("num_days").await.unwrap(), None);

        repo.set("num_days", "5").await.unwrap();
        repo.set("num_days", "7").await.unwrap();

        assert_eq!(repo.get("num_days").await.unwrap(), Some("7".to_string()));
    }

    #[tokio::test]
    async fn test_scouting_create_and_update_keep_display_order() {
        let repo = ScoutingRepository::new(setup_test_db());
        let mut item = media("p1", "2026-01-02T10:00:00Z");
        item.display_order = 9;
        item.category = "  ".to_string();
        repo.create(&item).await.unwrap();

        let stored = repo.list().await.unwrap().remove(0);
        assert_eq!(stored.display_order, 0);
        assert_eq!(stored.category, DEFAULT_SCOUTING_CATEGORY);

        repo.reorder(&["p1".to_string()]).await.unwrap();
        let edited = ScoutingMedia {
            description: Some("North pier".to_string()),
            display_order: 42,
            ..stored
        };
        repo.update("p1", &edited).await.unwrap();

        let stored = repo.list().await.unwrap().remove(0);
        assert_eq!(stored.description.as_deref(), Some("North pier"));
        assert_eq!(stored.display_order, 0);
    }

    #[tokio::test]
    async fn test_scouting_order_and_reorder() {
        let repo = ScoutingRepository::new(setup_test_db());
        repo.create(&media("a", "2026-01-01T09:00:00Z")).await.unwrap();
        repo.create(&media("b", "2026-01-03T09:00:00Z")).await.unwrap();
        repo.create(&media("c", "2026-01-02T09:00:00Z")).await.unwrap();

        // Same display order: newest upload first
        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);

        repo.reorder(&["a".to_string(), "c".to_string(), "b".to_string(), "gone".to_string()])
            .await
            .unwrap();

        let listed = repo.list().await.unwrap();
        let order: Vec<(String, i64)> = listed.into_iter().map(|m| (m.id, m.display_order)).collect();
        assert_eq!(
            order,
            vec![
                ("a".to_string(), 0),
                ("c".to_string(), 1),
                ("b".to_string(), 2)
            ]
        );
    }

    #[test]
    fn test_migrations_add_missing_scouting_columns() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE scouting_photos (
                id TEXT PRIMARY KEY,
                image_data TEXT NOT NULL,
                location TEXT,
                description TEXT,
                upload_date TEXT NOT NULL,
                created_at INTEGER NOT NULL DEFAULT 0
            );
            INSERT INTO scouting_photos (id, image_data, upload_date) VALUES ('old', 'x', '2025-12-01');",
        )
        .unwrap();
        assert!(!column_exists(&conn, "scouting_photos", "display_order").unwrap());

        run_migrations(&conn).expect("Migration failed");
        run_migrations(&conn).expect("Migrations are repeatable");

        for column in ["scene_number", "category", "media_type", "display_order"] {
            assert!(column_exists(&conn, "scouting_photos", column).unwrap(), "{}", column);
        }
        let category: String = conn
            .query_row("SELECT category FROM scouting_photos WHERE id = 'old'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(category, DEFAULT_SCOUTING_CATEGORY);
    }

    #[tokio::test]
    async fn test_file_database_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.db");

        let repo = CardRepository::new(init_db(&path).unwrap());
        repo.create(&card("kept", 5, None)).await.unwrap();
        drop(repo);

        let reopened = CardRepository::new(init_db(&path).unwrap());
        let cards = reopened.list().await.unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, "kept");
    }
}
