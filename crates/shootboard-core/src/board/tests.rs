//! Board Integration Tests
//!
//! Store, drag controller and poll refresh against the in-memory service.

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use chrono::NaiveDate;

    use crate::board::{drop_zone_id, BoardStore, DragController, DropOutcome};
    use crate::models::settings;
    use crate::models::{Card, CardCategory};
    use crate::persistence::{Call, MemoryPersistence};
    use crate::poll::{refresh_all, Refresh};
    use crate::sync::TaskQueue;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    fn card(id: &str, d: u32) -> Card {
        Card {
            id: id.to_string(),
            title: format!("Card {}", id),
            ..Card::new(day(d))
        }
    }

    struct Fixture {
        store: BoardStore<MemoryPersistence>,
        service: Rc<MemoryPersistence>,
        queue: TaskQueue,
        drag: DragController,
    }

    /// Server holds `cards`, the board shows 2026-01-05 for three days, and
    /// the initial load has completed.
    async fn setup(cards: Vec<Card>) -> Fixture {
        let service = Rc::new(MemoryPersistence::with_cards(cards));
        service.put_setting(settings::START_DATE, "2026-01-05");
        service.put_setting(settings::NUM_DAYS, "3");
        let queue = TaskQueue::new();
        let store = BoardStore::new(Rc::clone(&service), queue.spawner());
        store.load().await.expect("initial load");
        service.clear_calls();
        Fixture {
            store,
            service,
            queue,
            drag: DragController::new(),
        }
    }

    fn drag_onto(f: &Fixture, active: &str, over: Option<&str>) -> DropOutcome {
        assert!(f.drag.start(active));
        f.drag.drop_on(over, &f.store)
    }

    #[tokio::test]
    async fn test_drag_onto_other_day_column() {
        let f = setup(vec![card("a", 5)]).await;

        let outcome = drag_onto(&f, "a", Some("droppable-2026-01-07"));
        assert_eq!(
            outcome,
            DropOutcome::Moved {
                card_id: "a".into(),
                from: day(5),
                to: day(7)
            }
        );

        f.queue.run_all().await;
        let writes = f.service.writes();
        assert_eq!(writes.len(), 1);
        match &writes[0] {
            Call::UpdateCard(id, sent) => {
                assert_eq!(id, "a");
                assert_eq!(sent.date, day(7));
            }
            other => panic!("unexpected call {:?}", other),
        }

        let columns = f.store.columns();
        let ids_on = |d: u32| -> Vec<String> {
            columns
                .iter()
                .find(|c| c.date == day(d))
                .map(|c| c.cards.iter().map(|card| card.id.clone()).collect())
                .unwrap_or_default()
        };
        assert_eq!(columns.len(), 3);
        assert!(ids_on(5).is_empty());
        assert!(ids_on(6).is_empty());
        assert_eq!(ids_on(7), vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn test_every_card_shows_in_one_column() {
        let f = setup(vec![card("a", 5), card("b", 6), card("c", 6)]).await;
        drag_onto(&f, "b", Some("a"));
        f.store.add_card(day(7));

        let columns = f.store.columns();
        for c in f.store.snapshot().cards {
            let hits = columns
                .iter()
                .filter(|col| col.cards.iter().any(|x| x.id == c.id))
                .count();
            assert_eq!(hits, 1, "card {} shown {} times", c.id, hits);
        }
    }

    #[tokio::test]
    async fn test_drop_on_own_day_or_itself_sends_nothing() {
        let f = setup(vec![card("a", 5), card("b", 5)]).await;
        let before = f.store.snapshot();

        assert_eq!(drag_onto(&f, "a", Some("a")), DropOutcome::Unchanged);
        assert_eq!(drag_onto(&f, "a", Some("b")), DropOutcome::Unchanged);
        assert_eq!(
            drag_onto(&f, "a", Some(drop_zone_id(day(5)).as_str())),
            DropOutcome::Unchanged
        );

        f.queue.run_all().await;
        assert_eq!(f.store.snapshot(), before);
        assert!(f.service.writes().is_empty());
    }

    #[tokio::test]
    async fn test_move_keeps_every_other_field() {
        let mut original = card("a", 5);
        original.description = "Bring the drone".to_string();
        original.time = Some("07:30".to_string());
        original.map_url = Some("https://maps.example/pier".to_string());
        original.category = CardCategory::Shooting;
        let f = setup(vec![original.clone()]).await;

        drag_onto(&f, "a", Some("droppable-2026-01-06"));
        let moved = f.store.snapshot().cards[0].clone();
        assert_eq!(moved, Card { date: day(6), ..original });
    }

    #[tokio::test]
    async fn test_drop_on_card_matches_drop_on_its_day() {
        let via_card = setup(vec![card("a", 5), card("b", 7)]).await;
        let via_zone = setup(vec![card("a", 5), card("b", 7)]).await;

        drag_onto(&via_card, "a", Some("b"));
        drag_onto(&via_zone, "a", Some("droppable-2026-01-07"));

        assert_eq!(via_card.store.snapshot(), via_zone.store.snapshot());
        via_card.queue.run_all().await;
        via_zone.queue.run_all().await;
        assert_eq!(via_card.service.writes(), via_zone.service.writes());
    }

    #[tokio::test]
    async fn test_poll_before_write_reverts_optimistic_move() {
        let f = setup(vec![card("a", 5)]).await;

        drag_onto(&f, "a", Some("droppable-2026-01-07"));
        assert_eq!(f.store.snapshot().cards[0].date, day(7));

        // Poll lands while the update is still queued
        f.store.refresh().await.unwrap();
        assert_eq!(f.store.snapshot().cards[0].date, day(5));

        // Write lands; the following poll shows it
        f.queue.run_all().await;
        refresh_all(&[Rc::new(f.store) as Rc<dyn Refresh>]).await;
        assert_eq!(f.service.cards()[0].date, day(7));
    }

    #[tokio::test]
    async fn test_failed_write_is_reverted_by_next_poll() {
        let f = setup(vec![card("a", 5)]).await;
        f.service.fail("update_card");

        drag_onto(&f, "a", Some("droppable-2026-01-06"));
        f.queue.run_all().await;
        assert_eq!(f.store.snapshot().cards[0].date, day(6));

        f.store.load().await.unwrap();
        assert_eq!(f.store.snapshot().cards[0].date, day(5));
    }

    #[tokio::test]
    async fn test_drop_outside_and_cancel_change_nothing() {
        let f = setup(vec![card("a", 5)]).await;
        let before = f.store.snapshot();

        assert_eq!(drag_onto(&f, "a", None), DropOutcome::NoTarget);
        assert!(f.drag.start("a"));
        f.drag.cancel();
        assert_eq!(f.drag.drop_on(Some("droppable-2026-01-06"), &f.store), DropOutcome::NotDragging);
        assert_eq!(
            drag_onto(&f, "a", Some("droppable-garbage")),
            DropOutcome::UnknownTarget("droppable-garbage".into())
        );
        assert_eq!(
            drag_onto(&f, "a", Some("nope")),
            DropOutcome::UnknownTarget("nope".into())
        );

        f.queue.run_all().await;
        assert_eq!(f.store.snapshot(), before);
        assert!(f.service.writes().is_empty());
        assert!(!f.drag.is_dragging());
    }

    #[tokio::test]
    async fn test_rapid_moves_are_all_sent() {
        let f = setup(vec![card("a", 5)]).await;
        drag_onto(&f, "a", Some("droppable-2026-01-06"));
        drag_onto(&f, "a", Some("droppable-2026-01-07"));

        f.queue.run_all().await;
        let dates: Vec<_> = f
            .service
            .writes()
            .into_iter()
            .filter_map(|call| match call {
                Call::UpdateCard(_, sent) => Some(sent.date),
                _ => None,
            })
            .collect();
        assert_eq!(dates, vec![day(6), day(7)]);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_state() {
        let f = setup(vec![card("a", 5)]).await;
        let before = f.store.snapshot();

        f.service.put_card(card("b", 6));
        f.service.fail("list_todos");
        assert!(f.store.load().await.is_err());
        assert_eq!(f.store.snapshot(), before);

        f.service.recover();
        f.store.load().await.unwrap();
        assert_eq!(f.store.snapshot().cards.len(), 2);
    }

    #[tokio::test]
    async fn test_edit_of_unknown_card_still_sends_update() {
        let f = setup(vec![card("a", 5)]).await;
        let ghost = card("ghost", 6);
        f.store.edit_card(ghost.clone());

        assert_eq!(f.store.snapshot().cards.len(), 1);
        f.queue.run_all().await;
        assert_eq!(
            f.service.writes(),
            vec![Call::UpdateCard("ghost".into(), ghost)]
        );
        assert_eq!(f.service.cards().len(), 1);
    }

    #[tokio::test]
    async fn test_settings_pushed_only_after_load_and_on_change() {
        let service = Rc::new(MemoryPersistence::new());
        let queue = TaskQueue::new();
        let store = BoardStore::new(Rc::clone(&service), queue.spawner());

        store.set_num_days(7);
        queue.run_all().await;
        assert!(service.writes().is_empty());

        service.put_setting(settings::NUM_DAYS, "4");
        store.load().await.unwrap();
        assert_eq!(store.snapshot().num_days, 4);

        store.set_num_days(4);
        store.set_num_days(6);
        store.set_start_date(day(12));
        queue.run_all().await;
        assert_eq!(
            service.writes(),
            vec![
                Call::SetSetting("num_days".into(), "6".into()),
                Call::SetSetting("start_date".into(), "2026-01-12".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_unparsable_setting_keeps_local_value() {
        let f = setup(vec![]).await;
        f.service.put_setting(settings::START_DATE, "next monday");
        f.store.load().await.unwrap();
        assert_eq!(f.store.snapshot().start_date, day(5));
        assert_eq!(f.store.days(), vec![day(5), day(6), day(7)]);
    }
}
