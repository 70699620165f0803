//! Scouting gallery: location photos and clips with a manual order.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, error, warn};

use crate::error::PersistenceResult;
use crate::models::settings::{self, parse_categories};
use crate::models::{NewMedia, ScoutingMedia};
use crate::persistence::PersistenceService;
use crate::poll::Refresh;
use crate::sync::{Listeners, Remote, Spawner};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GallerySnapshot {
    /// Sorted by `display_order`, newest upload first on ties.
    pub media: Vec<ScoutingMedia>,
    /// From the `scouting_categories` setting, when present and valid.
    pub configured_categories: Option<Vec<String>>,
    pub loaded: bool,
}

impl GallerySnapshot {
    /// Configured categories, or the ones in use when none are configured.
    pub fn categories(&self) -> Vec<String> {
        if let Some(configured) = &self.configured_categories {
            return configured.clone();
        }
        let mut seen: Vec<String> = Vec::new();
        for item in &self.media {
            if !seen.contains(&item.category) {
                seen.push(item.category.clone());
            }
        }
        seen
    }

    /// Media grouped per category, in [`categories`](Self::categories) order.
    ///
    /// Items whose category is not configured get a group of their own after
    /// the configured ones. Empty groups are kept.
    pub fn by_category(&self) -> Vec<(String, Vec<ScoutingMedia>)> {
        let mut groups: Vec<(String, Vec<ScoutingMedia>)> = self
            .categories()
            .into_iter()
            .map(|category| (category, Vec::new()))
            .collect();

        for item in &self.media {
            match groups.iter_mut().find(|(name, _)| *name == item.category) {
                Some((_, items)) => items.push(item.clone()),
                None => groups.push((item.category.clone(), vec![item.clone()])),
            }
        }
        groups
    }

    fn ordered_ids(&self) -> Vec<String> {
        self.media.iter().map(|m| m.id.clone()).collect()
    }
}

fn sort_media(media: &mut [ScoutingMedia]) {
    media.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| b.upload_date.cmp(&a.upload_date))
    });
}

/// Store for the scouting gallery.
pub struct ScoutingGallery<P> {
    remote: Remote<P>,
    state: RefCell<GallerySnapshot>,
    listeners: Listeners<GallerySnapshot>,
}

impl<P: PersistenceService + 'static> ScoutingGallery<P> {
    pub fn new(service: Rc<P>, spawner: Spawner) -> Self {
        Self {
            remote: Remote::new(service, spawner),
            state: RefCell::new(GallerySnapshot::default()),
            listeners: Listeners::default(),
        }
    }

    pub fn on_change(&self, callback: impl Fn(&GallerySnapshot) + 'static) {
        self.listeners.add(callback);
    }

    pub fn snapshot(&self) -> GallerySnapshot {
        self.state.borrow().clone()
    }

    pub fn categories(&self) -> Vec<String> {
        self.state.borrow().categories()
    }

    pub fn by_category(&self) -> Vec<(String, Vec<ScoutingMedia>)> {
        self.state.borrow().by_category()
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        self.listeners.notify(&snapshot);
    }

    pub async fn load(&self) -> PersistenceResult<()> {
        let service = self.remote.service();
        let (mut media, categories) = futures::try_join!(
            service.list_media(),
            service.get_setting(settings::SCOUTING_CATEGORIES),
        )
        .map_err(|err| {
            error!(error = %err, "gallery load failed; keeping previous state");
            err
        })?;
        sort_media(&mut media);

        {
            let mut state = self.state.borrow_mut();
            state.media = media;
            if let Some(raw) = categories {
                match parse_categories(&raw) {
                    Some(parsed) => state.configured_categories = Some(parsed),
                    None => warn!(value = %raw, "ignoring unparsable scouting_categories setting"),
                }
            }
            state.loaded = true;
        }
        self.notify();
        Ok(())
    }

    /// Stamp the upload time, show the item and create it remotely.
    pub fn add_media(&self, input: NewMedia) -> ScoutingMedia {
        let media = ScoutingMedia::create(input, Utc::now().to_rfc3339(), 0);
        {
            let mut state = self.state.borrow_mut();
            state.media.push(media.clone());
            sort_media(&mut state.media);
        }
        self.notify();

        let created = media.clone();
        self.remote.dispatch("create_media", move |service| async move {
            service.create_media(&created).await
        });
        media
    }

    /// Replace the descriptive fields. The stored position is left as is.
    pub fn edit_media(&self, media: ScoutingMedia) {
        let replaced = {
            let mut state = self.state.borrow_mut();
            let slot = state.media.iter_mut().find(|m| m.id == media.id);
            match slot {
                Some(slot) => {
                    *slot = ScoutingMedia {
                        display_order: slot.display_order,
                        ..media.clone()
                    };
                    true
                }
                None => false,
            }
        };
        if replaced {
            self.notify();
        } else {
            warn!(id = %media.id, "editing media missing from local state");
        }

        let id = media.id.clone();
        self.remote.dispatch("update_media", move |service| async move {
            service.update_media(&id, &media).await
        });
    }

    pub fn delete_media(&self, id: &str) {
        self.state.borrow_mut().media.retain(|m| m.id != id);
        self.notify();

        let id = id.to_string();
        self.remote.dispatch("delete_media", move |service| async move {
            service.delete_media(&id).await
        });
    }

    /// Give each listed item `display_order = index` and send the new order.
    ///
    /// Unlisted items keep their position value.
    pub fn reorder(&self, ordered_ids: Vec<String>) {
        {
            let mut state = self.state.borrow_mut();
            for (index, id) in ordered_ids.iter().enumerate() {
                match state.media.iter_mut().find(|m| m.id == *id) {
                    Some(item) => item.display_order = index as i64,
                    None => debug!(id = %id, "reorder lists unknown media"),
                }
            }
            sort_media(&mut state.media);
        }
        self.notify();

        self.remote.dispatch("reorder_photos", move |service| async move {
            service.reorder_photos(&ordered_ids).await
        });
    }

    /// Move `id` in front of `before`, or to the end when `before` is `None`.
    ///
    /// Returns `false` when either id is unknown or nothing would move.
    pub fn move_media(&self, id: &str, before: Option<&str>) -> bool {
        let current = self.state.borrow().ordered_ids();
        let Some(from) = current.iter().position(|m| m == id) else {
            warn!(id, "cannot move unknown media");
            return false;
        };

        let mut next = current.clone();
        let moving = next.remove(from);
        let to = match before {
            Some(before) if before == id => return false,
            Some(before) => match next.iter().position(|m| m == before) {
                Some(to) => to,
                None => {
                    warn!(before, "cannot move before unknown media");
                    return false;
                }
            },
            None => next.len(),
        };
        next.insert(to, moving);

        if next == current {
            return false;
        }
        self.reorder(next);
        true
    }
}

#[async_trait(?Send)]
impl<P: PersistenceService + 'static> Refresh for ScoutingGallery<P> {
    fn name(&self) -> &'static str {
        "scouting"
    }

    async fn refresh(&self) -> PersistenceResult<()> {
        self.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaType;

    fn item(id: &str, category: &str, order: i64, uploaded: &str) -> ScoutingMedia {
        ScoutingMedia {
            id: id.to_string(),
            image_data: "data:image/png;base64,AAAA".to_string(),
            location: None,
            description: None,
            scene_number: None,
            category: category.to_string(),
            media_type: MediaType::Image,
            upload_date: uploaded.to_string(),
            display_order: order,
        }
    }

    #[test]
    fn sorts_by_order_then_newest_upload() {
        let mut media = vec![
            item("old", "Autres", 0, "2026-01-01T10:00:00Z"),
            item("late", "Autres", 1, "2026-01-03T10:00:00Z"),
            item("new", "Autres", 0, "2026-01-02T10:00:00Z"),
        ];
        sort_media(&mut media);
        let ids: Vec<_> = media.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old", "late"]);
    }

    #[test]
    fn groups_follow_configured_categories() {
        let snapshot = GallerySnapshot {
            media: vec![
                item("a", "Rooftops", 0, "2026-01-01T10:00:00Z"),
                item("b", "Interiors", 1, "2026-01-01T10:00:00Z"),
            ],
            configured_categories: Some(vec!["Rooftops".into(), "Streets".into()]),
            loaded: true,
        };
        let groups = snapshot.by_category();
        let names: Vec<_> = groups.iter().map(|(n, items)| (n.as_str(), items.len())).collect();
        assert_eq!(names, vec![("Rooftops", 1), ("Streets", 0), ("Interiors", 1)]);
    }

    #[tokio::test]
    async fn move_media_reassigns_sequential_order() {
        use crate::persistence::{Call, MemoryPersistence};
        use crate::sync::TaskQueue;

        let service = Rc::new(MemoryPersistence::new());
        service.put_media(item("a", "Autres", 0, "2026-01-01T10:00:00Z"));
        service.put_media(item("b", "Autres", 1, "2026-01-01T10:00:00Z"));
        service.put_media(item("c", "Autres", 2, "2026-01-01T10:00:00Z"));
        let queue = TaskQueue::new();
        let gallery = ScoutingGallery::new(Rc::clone(&service), queue.spawner());
        gallery.load().await.unwrap();

        assert!(gallery.move_media("c", Some("a")));
        assert!(!gallery.move_media("a", Some("b")));
        assert!(!gallery.move_media("ghost", None));

        let order: Vec<_> = gallery
            .snapshot()
            .media
            .iter()
            .map(|m| (m.id.clone(), m.display_order))
            .collect();
        assert_eq!(
            order,
            vec![("c".to_string(), 0), ("a".to_string(), 1), ("b".to_string(), 2)]
        );

        queue.run_all().await;
        assert_eq!(
            service.writes(),
            vec![Call::ReorderPhotos(vec!["c".into(), "a".into(), "b".into()])]
        );
        gallery.load().await.unwrap();
        assert_eq!(gallery.snapshot().media[0].id, "c");
    }

    #[test]
    fn categories_fall_back_to_media_in_use() {
        let snapshot = GallerySnapshot {
            media: vec![
                item("a", "Autres", 0, "2026-01-01T10:00:00Z"),
                item("b", "Rooftops", 1, "2026-01-01T10:00:00Z"),
                item("c", "Autres", 2, "2026-01-01T10:00:00Z"),
            ],
            configured_categories: None,
            loaded: true,
        };
        assert_eq!(snapshot.categories(), vec!["Autres", "Rooftops"]);
    }
}
