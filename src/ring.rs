//! Fixed-capacity circular store of message slots.
//!
//! `head` and `tail` are monotonic logical counters; a slot's physical
//! index is always `logical % slots.len()`. The array holds one slot more
//! than the display maximum so a line can keep rendering while it scrolls
//! off screen.

use tracing::debug;

use crate::slot::{Color, MessageSlot};

/// Circular message store with monotonic head/tail counters.
pub struct MessageRing {
    slots: Vec<MessageSlot>,
    /// Total lines ever inserted. The newest live line is at logical
    /// position `head`, stored at `head % slots.len()`.
    head: u64,
    /// Total lines ever evicted, by timer or by capacity overflow.
    tail: u64,
    /// Set once an insert has force-evicted the oldest live slot.
    full: bool,
}

impl MessageRing {
    /// A ring that displays at most `max_messages` lines. One extra
    /// physical slot backs the scroll-off transition and is never counted
    /// toward that limit.
    pub fn new(max_messages: u32) -> Self {
        Self {
            slots: vec![MessageSlot::default(); max_messages as usize + 1],
            head: 0,
            tail: 0,
            full: false,
        }
    }

    /// The display maximum (one less than the physical slot count).
    pub fn capacity_max(&self) -> u32 {
        self.slots.len() as u32 - 1
    }

    fn physical(&self, logical: u64) -> usize {
        (logical % self.slots.len() as u64) as usize
    }

    /// Wipe every slot and rewind the counters. Pending fades and expiries
    /// are gone with them.
    pub fn reset(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.full = false;
        for slot in &mut self.slots {
            slot.clear();
        }
    }

    /// Append one line as the new newest message. If the ring already held
    /// its full complement of live slots, the oldest is force-evicted to
    /// make room; that is the overflow policy, not an error.
    pub fn insert(
        &mut self,
        text: String,
        color: Color,
        group_id: u32,
        expire_ms: u32,
        fade_after_ms: Option<u32>,
    ) {
        self.head += 1;
        if self.physical(self.tail) == self.physical(self.head) {
            self.tail += 1;
            self.full = true;
            // The evicted slot keeps its text (fixed display modes may
            // still read it) but must not fire its timers later, or the
            // tail would advance twice for one slot and overrun the head.
            let evicted = self.physical(self.tail);
            self.slots[evicted].cancel_timers();
            debug!(tail = self.tail, "ring full, force-evicting oldest line");
        }
        let index = self.physical(self.head);
        self.slots[index].set(text, color, group_id, expire_ms, fade_after_ms);
    }

    /// Advance every physical slot's timers by `delta_ms`. Each slot that
    /// finishes its lifecycle this tick advances `tail` by one. Returns the
    /// number of evictions.
    ///
    /// Sweeping all slots rather than just the tail is sound because every
    /// insert uses the same expiry duration, so lifecycles finish in
    /// insertion order.
    pub fn tick_slots(&mut self, delta_ms: u32) -> u32 {
        let mut evicted = 0;
        for slot in &mut self.slots {
            if slot.tick(delta_ms) {
                self.tail += 1;
                evicted += 1;
            }
        }
        evicted
    }

    /// Count of live (not yet evicted) slots.
    pub fn message_count(&self) -> u64 {
        self.head - self.tail
    }

    pub fn head(&self) -> u64 {
        self.head
    }

    pub fn tail(&self) -> u64 {
        self.tail
    }

    pub fn is_full(&self) -> bool {
        self.full
    }

    /// The slot backing logical position `logical`. Positions outside the
    /// live range read whatever the storage currently holds; callers that
    /// walk past `tail` (the fixed display modes do) get the retained text.
    pub fn slot_at(&self, logical: u64) -> &MessageSlot {
        &self.slots[self.physical(logical)]
    }
}
