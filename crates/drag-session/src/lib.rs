//! Drag Session
//!
//! Pointer-gesture state for reorderable lists.
//! Uses a movement threshold to distinguish click from drag.

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// A completed drag: what was dragged and where it was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gesture<K> {
    pub source: K,
    pub target: K,
}

/// Press recorded on mousedown, not yet a drag
#[derive(Debug, Clone)]
struct Pending<K> {
    key: K,
    x: i32,
    y: i32,
}

/// State of one drag gesture.
///
/// Every exit path (`finish` or `cancel`) leaves the session empty, so a
/// stale source can never leak into the next gesture.
#[derive(Debug, Clone)]
pub struct DragSession<K> {
    source: Option<K>,
    target: Option<K>,
    pending: Option<Pending<K>>,
    just_ended: bool,
}

impl<K> Default for DragSession<K> {
    fn default() -> Self {
        Self {
            source: None,
            target: None,
            pending: None,
            just_ended: false,
        }
    }
}

impl<K: Clone + PartialEq + std::fmt::Debug> DragSession<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin dragging `key` immediately (native drag start)
    pub fn start(&mut self, key: K) {
        log::debug!("drag start {:?}", key);
        self.pending = None;
        self.target = None;
        self.source = Some(key);
    }

    /// Record a pending press; it becomes a drag once the pointer moves
    pub fn press(&mut self, key: K, x: i32, y: i32) {
        self.pending = Some(Pending { key, x, y });
    }

    /// Promote a pending press to a drag once moved past the threshold.
    /// Returns true when this call started the drag.
    pub fn pointer_move(&mut self, x: i32, y: i32) -> bool {
        if self.source.is_some() {
            return false;
        }
        let Some(pending) = &self.pending else {
            return false;
        };
        let dx = (x - pending.x).abs();
        let dy = (y - pending.y).abs();
        if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
            let key = pending.key.clone();
            self.start(key);
            return true;
        }
        false
    }

    /// Pointer entered a candidate target
    pub fn enter(&mut self, key: K) {
        match &self.source {
            // Don't allow dropping on self
            Some(source) if *source == key => self.target = None,
            Some(_) => self.target = Some(key),
            None => {}
        }
    }

    /// Pointer left the current target
    pub fn leave(&mut self) {
        self.target = None;
    }

    /// End the gesture. Returns the gesture when both ends are known.
    pub fn finish(&mut self) -> Option<Gesture<K>> {
        let was_dragging = self.source.is_some();
        let gesture = match (self.source.take(), self.target.take()) {
            (Some(source), Some(target)) => Some(Gesture { source, target }),
            _ => None,
        };
        self.pending = None;
        self.just_ended = was_dragging;
        gesture
    }

    /// Abort the gesture without producing a drop
    pub fn cancel(&mut self) {
        let was_dragging = self.source.is_some();
        self.source = None;
        self.target = None;
        self.pending = None;
        self.just_ended = was_dragging;
    }

    /// One-shot flag: true once right after a drag ended, so the click that
    /// follows the mouseup can be ignored
    pub fn take_just_ended(&mut self) -> bool {
        std::mem::take(&mut self.just_ended)
    }

    pub fn is_dragging(&self) -> bool {
        self.source.is_some()
    }

    pub fn source(&self) -> Option<&K> {
        self.source.as_ref()
    }

    pub fn target(&self) -> Option<&K> {
        self.target.as_ref()
    }
}
