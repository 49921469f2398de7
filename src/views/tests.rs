//! View Tests
//!
//! Drives the views against an in-memory store that records every call.

#[cfg(test)]
mod tests {
    use crate::clipboard::{ChecklistClipboard, CLIPBOARD_TTL_SECS};
    use crate::error::SyncError;
    use crate::notify::{ToastKind, ToastLog};
    use crate::optimistic::{FailurePolicy, Optimistic};
    use crate::queue::WriteLanes;
    use crate::reorder::Direction;
    use crate::views::*;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use estateflow_store::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        List(Scope),
        SetOrder(Scope, Vec<String>),
        Create(Scope),
        Update(String),
        Delete(String),
        Move(String, Scope),
        Seed,
    }

    /// Store double: keeps entities in memory and records each call
    struct FakeStore<T: Ordered> {
        items: Mutex<Vec<T>>,
        calls: Mutex<Vec<Call>>,
        next_id: AtomicUsize,
        fail_writes: AtomicBool,
        /// Delay applied to the next `set_order` only
        slow_once: Mutex<Option<std::time::Duration>>,
        make: fn(String, &Scope, &T::Draft, i32) -> T,
        reown: fn(&mut T, &Scope),
    }

    impl<T: Ordered> FakeStore<T> {
        fn new(make: fn(String, &Scope, &T::Draft, i32) -> T, reown: fn(&mut T, &Scope)) -> Self {
            Self {
                items: Mutex::new(Vec::new()),
                calls: Mutex::new(Vec::new()),
                next_id: AtomicUsize::new(0),
                fail_writes: AtomicBool::new(false),
                slow_once: Mutex::new(None),
                make,
                reown,
            }
        }

        fn with(self, items: Vec<T>) -> Arc<Self> {
            *self.items.lock().unwrap() = items;
            Arc::new(self)
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn writes(&self) -> Vec<Call> {
            self.calls()
                .into_iter()
                .filter(|call| !matches!(call, Call::List(_) | Call::Seed))
                .collect()
        }

        fn stored(&self, scope: &Scope) -> Vec<T> {
            let mut list: Vec<T> = self
                .items
                .lock()
                .unwrap()
                .iter()
                .filter(|item| item.scope() == *scope)
                .cloned()
                .collect();
            list.sort_by_key(|item| item.order());
            list
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn check_failure(&self) -> DomainResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(DomainError::Internal("disk full".to_string()));
            }
            Ok(())
        }

        fn renumber(&self, scope: &Scope) {
            let ids: Vec<String> = self.stored(scope).iter().map(|item| item.id().to_string()).collect();
            let mut items = self.items.lock().unwrap();
            for item in items.iter_mut() {
                if let Some(index) = ids.iter().position(|id| id == item.id()) {
                    item.set_order(index as i32);
                }
            }
        }
    }

    #[async_trait]
    impl<T: Ordered> OrderedCollectionStore<T> for FakeStore<T> {
        async fn list(&self, scope: &Scope) -> DomainResult<Vec<T>> {
            self.record(Call::List(scope.clone()));
            Ok(self.stored(scope))
        }

        async fn set_order(&self, scope: &Scope, ordered_ids: &[String]) -> DomainResult<()> {
            let delay = self.slow_once.lock().unwrap().take();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            self.record(Call::SetOrder(scope.clone(), ordered_ids.to_vec()));
            self.check_failure()?;

            let mut current: Vec<String> = self.stored(scope).iter().map(|i| i.id().to_string()).collect();
            let mut requested = ordered_ids.to_vec();
            current.sort();
            requested.sort();
            if current != requested {
                return Err(DomainError::Conflict("order list is stale".to_string()));
            }
            let mut items = self.items.lock().unwrap();
            for item in items.iter_mut() {
                if let Some(index) = ordered_ids.iter().position(|id| id == item.id()) {
                    item.set_order(index as i32);
                }
            }
            Ok(())
        }

        async fn create(&self, scope: &Scope, draft: &T::Draft) -> DomainResult<T> {
            self.record(Call::Create(scope.clone()));
            self.check_failure()?;
            let id = format!("new-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
            let order = self.stored(scope).len() as i32;
            let created = (self.make)(id, scope, draft, order);
            self.items.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn update(&self, id: &str, patch: &T::Patch) -> DomainResult<T> {
            self.record(Call::Update(id.to_string()));
            self.check_failure()?;
            let mut items = self.items.lock().unwrap();
            let item = items
                .iter_mut()
                .find(|item| item.id() == id)
                .ok_or_else(|| DomainError::NotFound(id.to_string()))?;
            patch.apply_to(item);
            Ok(item.clone())
        }

        async fn delete(&self, id: &str) -> DomainResult<()> {
            self.record(Call::Delete(id.to_string()));
            self.check_failure()?;
            let scope = {
                let mut items = self.items.lock().unwrap();
                let index = items
                    .iter()
                    .position(|item| item.id() == id)
                    .ok_or_else(|| DomainError::NotFound(id.to_string()))?;
                items.remove(index).scope()
            };
            self.renumber(&scope);
            Ok(())
        }
    }

    #[async_trait]
    impl<T: Ordered> ReparentStore<T> for FakeStore<T> {
        async fn move_to_scope(&self, id: &str, target: &Scope) -> DomainResult<T> {
            self.record(Call::Move(id.to_string(), target.clone()));
            self.check_failure()?;
            let order = self.stored(target).len() as i32;
            let (source, moved) = {
                let mut items = self.items.lock().unwrap();
                let item = items
                    .iter_mut()
                    .find(|item| item.id() == id)
                    .ok_or_else(|| DomainError::NotFound(id.to_string()))?;
                let source = item.scope();
                (self.reown)(item, target);
                item.set_order(order);
                (source, item.clone())
            };
            self.renumber(&source);
            Ok(moved)
        }
    }

    #[async_trait]
    impl SeedDefaults for FakeStore<BookmarkZone> {
        async fn initialize_defaults(&self) -> DomainResult<()> {
            self.record(Call::Seed);
            let mut items = self.items.lock().unwrap();
            if items.is_empty() {
                for (index, (name, color)) in DEFAULT_ZONES.iter().take(2).enumerate() {
                    items.push(zone(&format!("z{}", index), name, color, index as i32));
                }
            }
            Ok(())
        }
    }

    // ========================
    // Fixtures
    // ========================

    fn owner(scope: &Scope) -> String {
        scope.owner().unwrap_or_default().to_string()
    }

    fn workspace(id: &str, order: i32) -> Workspace {
        Workspace::new(id.to_string(), id.to_string(), order)
    }

    fn workspace_store(items: Vec<Workspace>) -> Arc<FakeStore<Workspace>> {
        FakeStore::<Workspace>::new(
            |id, _, draft: &WorkspaceDraft, order| Workspace::new(id, draft.name.clone(), order),
            |_, _| {},
        )
        .with(items)
    }

    fn category(id: &str, workspace_id: &str, order: i32) -> Category {
        Category::new(id.to_string(), workspace_id.to_string(), id.to_string(), order)
    }

    fn category_store(items: Vec<Category>) -> Arc<FakeStore<Category>> {
        FakeStore::<Category>::new(
            |id, scope, draft: &CategoryDraft, order| Category::new(id, owner(scope), draft.name.clone(), order),
            |category, target| category.workspace_id = owner(target),
        )
        .with(items)
    }

    fn item(id: &str, category_id: &str, order: i32) -> Item {
        Item::new(id.to_string(), category_id.to_string(), id.to_string(), order)
    }

    fn item_store(items: Vec<Item>) -> Arc<FakeStore<Item>> {
        FakeStore::<Item>::new(
            |id, scope, draft: &ItemDraft, order| Item::new(id, owner(scope), draft.title.clone(), order),
            |item, target| item.category_id = owner(target),
        )
        .with(items)
    }

    fn checklist_store(items: Vec<ChecklistEntry>) -> Arc<FakeStore<ChecklistEntry>> {
        FakeStore::<ChecklistEntry>::new(
            |id, scope, draft: &ChecklistDraft, order| ChecklistEntry {
                id,
                item_id: owner(scope),
                order,
                created_at: 0,
                kind: draft.clone().into_kind(),
            },
            |entry, target| entry.item_id = owner(target),
        )
        .with(items)
    }

    fn zone(id: &str, name: &str, color: &str, order: i32) -> BookmarkZone {
        BookmarkZone {
            id: id.to_string(),
            name: name.to_string(),
            default_color: color.to_string(),
            order,
            created_at: 0,
        }
    }

    fn zone_store() -> Arc<FakeStore<BookmarkZone>> {
        FakeStore::<BookmarkZone>::new(
            |id, _, draft: &ZoneDraft, order| zone(&id, &draft.name, &draft.default_color, order),
            |_, _| {},
        )
        .with(Vec::new())
    }

    fn bookmark(id: &str, zone_id: &str, order: i32) -> Bookmark {
        Bookmark {
            id: id.to_string(),
            zone_id: zone_id.to_string(),
            name: id.to_string(),
            url: format!("https://{}.example", id),
            color: "#FFFFFF".to_string(),
            order,
            created_at: 0,
        }
    }

    fn bookmark_store(items: Vec<Bookmark>) -> Arc<FakeStore<Bookmark>> {
        FakeStore::<Bookmark>::new(
            |id, scope, draft: &BookmarkDraft, order| Bookmark {
                id,
                zone_id: owner(scope),
                name: draft.name.clone(),
                url: draft.url.clone(),
                color: draft.color.clone().unwrap_or_default(),
                order,
                created_at: 0,
            },
            |bookmark, target| bookmark.zone_id = owner(target),
        )
        .with(items)
    }

    fn sync_with(policy: FailurePolicy) -> (Optimistic, ToastLog) {
        let log = ToastLog::new();
        let sync = Optimistic::new(WriteLanes::current().unwrap(), Arc::new(log.clone()), policy);
        (sync, log)
    }

    fn ids<T: Ordered>(list: &[T]) -> Vec<String> {
        list.iter().map(|e| e.id().to_string()).collect()
    }

    fn orders<T: Ordered>(list: &[T]) -> Vec<i32> {
        list.iter().map(|e| e.order()).collect()
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    async fn tabs_with(names: &[&str]) -> (WorkspaceTabs, Arc<FakeStore<Workspace>>, ToastLog) {
        let store = workspace_store(names.iter().enumerate().map(|(i, n)| workspace(n, i as i32)).collect());
        let (sync, log) = sync_with(FailurePolicy::KeepOptimistic);
        let mut tabs = WorkspaceTabs::new(store.clone(), sync);
        tabs.load().await.unwrap();
        (tabs, store, log)
    }

    // ========================
    // Reordering
    // ========================

    #[tokio::test]
    async fn test_drag_to_end_persists_once() {
        let (mut tabs, store, _) = tabs_with(&["a", "b", "c"]).await;

        tabs.list_mut().on_drag_start(0);
        tabs.list_mut().on_drag_enter(2);
        let pending = tabs.list_mut().on_drop().expect("order changed");

        // Visible before the store answers
        assert_eq!(ids(&tabs.tabs()), strings(&["b", "c", "a"]));
        assert_eq!(orders(&tabs.tabs()), vec![0, 1, 2]);
        pending.await.unwrap();

        assert_eq!(store.writes(), vec![Call::SetOrder(Scope::Workspaces, strings(&["b", "c", "a"]))]);
        assert_eq!(ids(&store.stored(&Scope::Workspaces)), strings(&["b", "c", "a"]));
        assert!(tabs.list_mut().take_click_suppressed());
    }

    #[tokio::test]
    async fn test_adjacent_move() {
        let (tabs, store, _) = tabs_with(&["a", "b", "c"]).await;

        tabs.move_left("b").expect("order changed").await.unwrap();

        assert_eq!(ids(&tabs.tabs()), strings(&["b", "a", "c"]));
        assert_eq!(orders(&store.stored(&Scope::Workspaces)), vec![0, 1, 2]);
        assert_eq!(ids(&store.stored(&Scope::Workspaces)), strings(&["b", "a", "c"]));
    }

    #[tokio::test]
    async fn test_boundary_moves_do_nothing() {
        let (tabs, store, _) = tabs_with(&["a", "b", "c"]).await;

        assert!(tabs.move_left("a").is_none());
        assert!(tabs.move_right("c").is_none());
        assert_eq!(ids(&tabs.tabs()), strings(&["a", "b", "c"]));
        assert!(store.writes().is_empty());
    }

    #[tokio::test]
    async fn test_drop_on_itself_is_ignored() {
        let (mut tabs, store, _) = tabs_with(&["a", "b", "c"]).await;

        tabs.list_mut().on_drag_start(1);
        tabs.list_mut().on_drag_enter(1);
        assert!(tabs.list_mut().on_drop().is_none());

        tabs.list_mut().on_drag_start(2);
        tabs.list_mut().on_drag_enter(0);
        tabs.list_mut().on_drag_cancel();
        assert!(tabs.list_mut().on_drop().is_none());

        assert!(store.writes().is_empty());
        assert_eq!(tabs.list().dragging(), None);
    }

    #[tokio::test]
    async fn test_reorder_stays_in_its_scope() {
        let store = item_store(vec![
            item("a", "c1", 0),
            item("b", "c1", 1),
            item("x", "c2", 0),
            item("y", "c2", 1),
        ]);
        let (sync, _) = sync_with(FailurePolicy::KeepOptimistic);
        let mut list = ItemsList::new(store.clone(), sync);
        list.load("c1").await.unwrap();

        list.move_down("a").expect("order changed").await.unwrap();

        let c2 = store.stored(&Scope::Items("c2".to_string()));
        assert_eq!(ids(&c2), strings(&["x", "y"]));
        assert_eq!(orders(&c2), vec![0, 1]);
        assert_eq!(ids(&store.stored(&Scope::Items("c1".to_string()))), strings(&["b", "a"]));
    }

    #[tokio::test]
    async fn test_completed_item_rejects_drop() {
        let mut done = item("c", "c1", 2);
        done.status_color = Some(StatusColor::Gray);
        let store = item_store(vec![item("a", "c1", 0), item("b", "c1", 1), done]);
        let (sync, _) = sync_with(FailurePolicy::KeepOptimistic);
        let mut list = ItemsList::new(store.clone(), sync);
        list.load("c1").await.unwrap();

        assert_eq!(ids(&list.active()), strings(&["a", "b"]));
        assert_eq!(ids(&list.completed()), strings(&["c"]));

        list.list_mut().on_drag_start(0);
        list.list_mut().on_drag_enter(2);
        assert!(list.list_mut().on_drop().is_none());

        assert_eq!(ids(&list.list().items()), strings(&["a", "b", "c"]));
        assert!(store.writes().is_empty());
    }

    #[tokio::test]
    async fn test_completed_items_trail_after_reorder() {
        let mut done = item("done", "c1", 0);
        done.status_color = Some(StatusColor::Gray);
        let store = item_store(vec![done, item("a", "c1", 1), item("b", "c1", 2)]);
        let (sync, _) = sync_with(FailurePolicy::KeepOptimistic);
        let mut list = ItemsList::new(store.clone(), sync);
        list.load("c1").await.unwrap();

        list.move_up("b").expect("order changed").await.unwrap();

        assert_eq!(ids(&list.list().items()), strings(&["b", "a", "done"]));
        assert_eq!(
            store.writes(),
            vec![Call::SetOrder(Scope::Items("c1".to_string()), strings(&["b", "a", "done"]))]
        );
    }

    #[tokio::test]
    async fn test_hidden_categories_trail() {
        let mut hidden = category("y", "w1", 1);
        hidden.is_hidden = true;
        let store = category_store(vec![category("x", "w1", 0), hidden, category("z", "w1", 2)]);
        let (sync, _) = sync_with(FailurePolicy::KeepOptimistic);
        let mut sidebar = CategorySidebar::new(store.clone(), sync);
        sidebar.load("w1").await.unwrap();

        assert_eq!(ids(&sidebar.visible()), strings(&["x", "z"]));
        assert_eq!(ids(&sidebar.hidden()), strings(&["y"]));

        sidebar.list_mut().on_drag_start(1);
        sidebar.list_mut().on_drag_enter(0);
        sidebar.list_mut().on_drop().expect("order changed").await.unwrap();

        assert_eq!(
            store.writes(),
            vec![Call::SetOrder(Scope::Categories("w1".to_string()), strings(&["z", "x", "y"]))]
        );
    }

    #[tokio::test]
    async fn test_rapid_reorders_reach_store_in_order() {
        let (tabs, store, _) = tabs_with(&["a", "b", "c"]).await;
        *store.slow_once.lock().unwrap() = Some(std::time::Duration::from_millis(30));

        let first = tabs.move_right("a").expect("order changed");
        let second = tabs.move_right("a").expect("order changed");
        second.await.unwrap();
        first.await.unwrap();

        assert_eq!(
            store.writes(),
            vec![
                Call::SetOrder(Scope::Workspaces, strings(&["b", "a", "c"])),
                Call::SetOrder(Scope::Workspaces, strings(&["b", "c", "a"])),
            ]
        );
        assert_eq!(ids(&store.stored(&Scope::Workspaces)), strings(&["b", "c", "a"]));
    }

    // ========================
    // Failures
    // ========================

    #[tokio::test]
    async fn test_failed_reorder_rolls_back() {
        let store = workspace_store(vec![workspace("a", 0), workspace("b", 1), workspace("c", 2)]);
        let (sync, log) = sync_with(FailurePolicy::Rollback);
        let mut tabs = WorkspaceTabs::new(store.clone(), sync);
        tabs.load().await.unwrap();
        store.fail_writes.store(true, Ordering::SeqCst);

        let result = tabs.move_right("a").expect("order changed").await;

        assert!(matches!(result, Err(SyncError::Persistence { .. })));
        assert_eq!(ids(&tabs.tabs()), strings(&["a", "b", "c"]));
        assert_eq!(log.count(ToastKind::Error), 1);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_optimistic_state() {
        let (mut tabs, store, log) = tabs_with(&["a", "b"]).await;
        store.fail_writes.store(true, Ordering::SeqCst);

        let err = tabs.delete("a").unwrap().await.unwrap_err();

        assert_eq!(ids(&tabs.tabs()), strings(&["b"]));
        assert_eq!(err.snapshot().map(|s| ids(s)), Some(strings(&["a", "b"])));
        assert_eq!(log.count(ToastKind::Error), 1);
    }

    // ========================
    // Workspaces
    // ========================

    #[tokio::test]
    async fn test_locked_workspace_refuses_delete() {
        let mut locked = workspace("w", 0);
        locked.is_locked = true;
        let store = workspace_store(vec![locked]);
        let (sync, log) = sync_with(FailurePolicy::KeepOptimistic);
        let mut tabs = WorkspaceTabs::new(store.clone(), sync);
        tabs.load().await.unwrap();

        assert!(matches!(tabs.delete("w"), Err(SyncError::Locked(_))));
        assert!(matches!(tabs.rename("w", "Renamed"), Err(SyncError::Locked(_))));
        assert_eq!(store.calls(), vec![Call::List(Scope::Workspaces)]);
        assert_eq!(tabs.tabs().len(), 1);
        assert!(log.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_unlock_then_delete() {
        let mut locked = workspace("w", 0);
        locked.is_locked = true;
        let store = workspace_store(vec![locked, workspace("v", 1)]);
        let (sync, _) = sync_with(FailurePolicy::KeepOptimistic);
        let mut tabs = WorkspaceTabs::new(store.clone(), sync);
        tabs.load().await.unwrap();

        let unlocked = tabs.toggle_lock("w").unwrap().await.unwrap();
        assert!(!unlocked.is_locked);
        tabs.delete("w").unwrap().await.unwrap();

        assert_eq!(ids(&store.stored(&Scope::Workspaces)), strings(&["v"]));
        assert_eq!(orders(&store.stored(&Scope::Workspaces)), vec![0]);
        assert_eq!(tabs.active(), Some("v"));
    }

    #[tokio::test]
    async fn test_create_names_and_selects_workspace() {
        let (mut tabs, store, _) = tabs_with(&[]).await;
        assert_eq!(tabs.active(), None);

        let first = tabs.create().await.unwrap();
        let second = tabs.create().await.unwrap();

        assert_eq!(first.name, "New workspace 1");
        assert_eq!(second.name, "New workspace 2");
        assert_eq!(second.order, 1);
        assert_eq!(tabs.active(), Some(second.id.as_str()));
        assert_eq!(store.stored(&Scope::Workspaces).len(), 2);
    }

    #[tokio::test]
    async fn test_empty_name_never_reaches_store() {
        let (mut tabs, store, _) = tabs_with(&["a"]).await;

        assert!(matches!(tabs.create_named("   ").await, Err(SyncError::Validation(_))));
        assert!(matches!(tabs.rename("a", ""), Err(SyncError::Validation(_))));
        assert!(store.writes().is_empty());
    }

    #[tokio::test]
    async fn test_active_falls_back_to_first() {
        let (mut tabs, _, _) = tabs_with(&["a", "b", "c"]).await;
        assert_eq!(tabs.active(), Some("a"));

        tabs.select("c").unwrap();
        tabs.delete("c").unwrap().await.unwrap();
        assert_eq!(tabs.active(), Some("a"));
        assert!(matches!(tabs.select("zz"), Err(SyncError::NotFound(_))));
    }

    // ========================
    // Categories and items
    // ========================

    #[tokio::test]
    async fn test_move_category_to_other_workspace() {
        let store = category_store(vec![category("x", "w1", 0), category("y", "w1", 1), category("k", "w2", 0)]);
        let (sync, _) = sync_with(FailurePolicy::KeepOptimistic);
        let mut sidebar = CategorySidebar::new(store.clone(), sync);
        sidebar.load("w1").await.unwrap();

        assert!(matches!(sidebar.move_to_workspace("x", "w1"), Err(SyncError::Validation(_))));
        let moved = sidebar.move_to_workspace("x", "w2").unwrap().await.unwrap();

        assert_eq!(moved.workspace_id, "w2");
        assert_eq!(moved.order, 1);
        assert_eq!(ids(&sidebar.visible()), strings(&["y"]));
        assert_eq!(orders(&store.stored(&Scope::Categories("w1".to_string()))), vec![0]);
    }

    #[tokio::test]
    async fn test_create_and_reorder_in_flight_together() {
        let store = category_store(vec![category("a", "w1", 0), category("b", "w1", 1)]);
        let (sync, log) = sync_with(FailurePolicy::KeepOptimistic);
        let mut sidebar = CategorySidebar::new(store.clone(), sync);
        sidebar.load("w1").await.unwrap();

        let (created, reordered) = tokio::join!(sidebar.create("c"), async {
            sidebar.move_down("a").expect("order changed").await
        });
        let created = created.unwrap();
        reordered.unwrap();

        let stored = store.stored(&Scope::Categories("w1".to_string()));
        assert_eq!(ids(&sidebar.visible()), vec!["b".to_string(), "a".to_string(), created.id.clone()]);
        assert_eq!(ids(&stored), ids(&sidebar.visible()));
        assert_eq!(orders(&stored), vec![0, 1, 2]);
        assert_eq!(log.count(ToastKind::Error), 0);
    }

    #[tokio::test]
    async fn test_lanes_close_with_their_lists() {
        let items = item_store(vec![item("a", "c1", 0), item("b", "c2", 0)]);
        let entries = checklist_store(Vec::new());
        let (sync, _) = sync_with(FailurePolicy::KeepOptimistic);
        let lanes = sync.lanes().clone();
        let mut list = ItemsList::new(items.clone(), sync.clone());
        let mut checklist = ChecklistView::new(entries, sync);

        list.load("c1").await.unwrap();
        assert_eq!(lanes.active_lanes(), 1);
        list.load("c2").await.unwrap();
        assert_eq!(lanes.active_lanes(), 1);

        checklist.load("b").await.unwrap();
        assert_eq!(lanes.active_lanes(), 2);
        list.delete("b").unwrap().await.unwrap();
        assert_eq!(lanes.active_lanes(), 1);

        checklist.clear();
        list.clear();
        assert_eq!(lanes.active_lanes(), 0);
    }

    #[tokio::test]
    async fn test_hide_category() {
        let store = category_store(vec![category("x", "w1", 0), category("y", "w1", 1)]);
        let (sync, _) = sync_with(FailurePolicy::KeepOptimistic);
        let mut sidebar = CategorySidebar::new(store.clone(), sync);
        sidebar.load("w1").await.unwrap();

        let pending = sidebar.set_hidden("x", true).unwrap();
        assert_eq!(ids(&sidebar.hidden()), strings(&["x"]));
        assert!(pending.await.unwrap().is_hidden);
    }

    #[tokio::test]
    async fn test_item_lifecycle() {
        let store = item_store(Vec::new());
        let (sync, _) = sync_with(FailurePolicy::KeepOptimistic);
        let mut list = ItemsList::new(store.clone(), sync);
        list.load("c1").await.unwrap();

        let created = list.create(None).await.unwrap();
        assert_eq!(created.title, DEFAULT_ITEM_TITLE);

        list.edit_title(&created.id, "Roof leak").unwrap().await.unwrap();
        list.complete(&created.id).unwrap().await.unwrap();
        assert_eq!(ids(&list.completed()), vec![created.id.clone()]);

        let restored = list.restore(&created.id).unwrap().await.unwrap();
        assert_eq!(restored.title, "Roof leak");
        assert_eq!(restored.status_color, None);
        assert_eq!(list.active().len(), 1);
    }

    #[tokio::test]
    async fn test_move_item_to_other_category() {
        let store = item_store(vec![item("a", "c1", 0), item("b", "c1", 1)]);
        let (sync, _) = sync_with(FailurePolicy::KeepOptimistic);
        let mut list = ItemsList::new(store.clone(), sync);
        list.load("c1").await.unwrap();
        list.select(Some("a"));

        let moved = list.move_to_category("a", "c2").unwrap().await.unwrap();

        assert_eq!(moved.category_id, "c2");
        assert_eq!(list.selected(), None);
        assert_eq!(ids(&list.active()), strings(&["b"]));
        assert_eq!(orders(&list.active()), vec![0]);
        assert!(store.writes().contains(&Call::Move("a".to_string(), Scope::Items("c2".to_string()))));
    }

    // ========================
    // Checklist
    // ========================

    #[tokio::test]
    async fn test_checklist_lines_and_dividers() {
        let store = checklist_store(Vec::new());
        let (sync, _) = sync_with(FailurePolicy::KeepOptimistic);
        let mut view = ChecklistView::new(store.clone(), sync);
        view.load("i1").await.unwrap();

        let line = view.add_line("Check boiler", "").await.unwrap();
        let divider = view.add_divider("Kitchen").await.unwrap();
        assert!(matches!(view.add_line(" ", "").await, Err(SyncError::Validation(_))));

        let toggled = view.toggle(&line.id).unwrap().await.unwrap();
        assert!(matches!(toggled.kind, EntryKind::Line { is_checked: true, .. }));
        assert!(matches!(view.toggle(&divider.id), Err(SyncError::Validation(_))));

        view.move_up(&divider.id).expect("order changed").await.unwrap();
        assert_eq!(ids(&view.entries()), vec![divider.id.clone(), line.id.clone()]);

        view.delete(&divider.id).unwrap().await.unwrap();
        assert_eq!(orders(&store.stored(&Scope::Checklist("i1".to_string()))), vec![0]);
    }

    #[tokio::test]
    async fn test_expired_paste_issues_no_write() {
        let store = checklist_store(Vec::new());
        let (sync, log) = sync_with(FailurePolicy::KeepOptimistic);
        let mut view = ChecklistView::new(store.clone(), sync);
        view.load("i1").await.unwrap();
        let line = view.add_line("Check boiler", "2nd floor").await.unwrap();
        let creates_before = store.writes().len();

        let mut clipboard = ChecklistClipboard::new(Arc::new(log.clone()));
        let copied_at = Utc::now();
        clipboard.copy(&line, copied_at).unwrap();

        let later = copied_at + Duration::seconds(CLIPBOARD_TTL_SECS + 1);
        assert!(clipboard.paste_draft(later).is_err());
        assert_eq!(store.writes().len(), creates_before);
        assert_eq!(log.count(ToastKind::Info), 1);
        assert_eq!(log.count(ToastKind::Error), 1);

        clipboard.copy(&line, later).unwrap();
        let draft = clipboard.paste_draft(later).unwrap();
        let pasted = view.add_entry(draft).await.unwrap();
        assert_eq!(pasted.order, 1);
        assert!(matches!(pasted.kind, EntryKind::Line { is_checked: false, .. }));
    }

    // ========================
    // Bookmarks
    // ========================

    #[tokio::test]
    async fn test_bookmark_board() {
        let zones = zone_store();
        let marks = bookmark_store(vec![bookmark("a", "z0", 0), bookmark("b", "z0", 1)]);
        let (sync, _) = sync_with(FailurePolicy::KeepOptimistic);
        let mut board = BookmarkBoard::new(zones.clone(), marks.clone(), sync);
        board.load().await.unwrap();

        assert_eq!(zones.calls().first(), Some(&Call::Seed));
        assert_eq!(ids(&board.zones()), strings(&["z0", "z1"]));
        assert_eq!(ids(&board.bookmarks("z0")), strings(&["a", "b"]));

        let added = board
            .add_bookmark("z1", BookmarkDraft::new("Registry", "https://registry.example"))
            .await
            .unwrap();
        assert_eq!(added.order, 0);

        let moved = board.move_bookmark_to_zone("z0", "a", "z1").unwrap().await.unwrap();
        assert_eq!(moved.order, 1);
        assert_eq!(ids(&board.bookmarks("z0")), strings(&["b"]));
        assert_eq!(ids(&board.bookmarks("z1")), vec![added.id.clone(), "a".to_string()]);

        board.move_zone("z1", Direction::Up).expect("order changed").await.unwrap();
        assert_eq!(ids(&board.zones()), strings(&["z1", "z0"]));

        board.delete_zone("z0").unwrap().await.unwrap();
        assert!(matches!(board.zone("z0"), Err(SyncError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_reorder_right_after_bookmark_arrives() {
        let zones = zone_store();
        let marks = bookmark_store(vec![bookmark("m", "z0", 0), bookmark("x", "z1", 0), bookmark("y", "z1", 1)]);
        let (sync, log) = sync_with(FailurePolicy::KeepOptimistic);
        let mut board = BookmarkBoard::new(zones, marks.clone(), sync);
        board.load().await.unwrap();

        let moved = board.move_bookmark_to_zone("z0", "m", "z1").unwrap();
        let reordered = board.move_bookmark("z1", "x", Direction::Down).unwrap().expect("order changed");
        moved.await.unwrap();
        reordered.await.unwrap();

        let stored = marks.stored(&Scope::Bookmarks("z1".to_string()));
        assert_eq!(ids(&board.bookmarks("z1")), strings(&["y", "x", "m"]));
        assert_eq!(ids(&stored), strings(&["y", "x", "m"]));
        assert_eq!(orders(&stored), vec![0, 1, 2]);
        assert_eq!(log.count(ToastKind::Error), 0);
    }
}
