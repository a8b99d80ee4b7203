//! A single stored message line and its expiry/fade lifecycle.

use crate::timer::Countdown;

/// RGB color of a message line. Alpha is computed per frame by the
/// projection, not stored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
}

/// Where a slot is in its lifecycle.
///
/// `Active` while the expiry timer runs, `Fading` while the optional fade
/// timer runs it down to zero opacity, `Expired` once both are done. A slot
/// that has never held a message reads as `Expired`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPhase {
    Active,
    Fading,
    Expired,
}

/// One physical line of displayed text with its own timers.
///
/// All lines wrapped from the same incoming message share a `group_id`.
#[derive(Debug, Clone, Default)]
pub struct MessageSlot {
    text: String,
    color: Color,
    group_id: u32,
    expiry: Countdown,
    fade: Countdown,
    /// Fade period armed when expiry fires; `None` drops the slot
    /// immediately on expiry.
    fade_after_ms: Option<u32>,
}

impl MessageSlot {
    /// Overwrite this slot with fresh content and a fresh expiry timer.
    /// Any fade in progress from the slot's previous occupant is discarded.
    pub fn set(
        &mut self,
        text: String,
        color: Color,
        group_id: u32,
        expire_ms: u32,
        fade_after_ms: Option<u32>,
    ) {
        self.text = text;
        self.color = color;
        self.group_id = group_id;
        self.expiry.reset_to(expire_ms);
        self.fade.clear();
        self.fade_after_ms = fade_after_ms;
    }

    /// Stop both timers without touching the stored text. Used when the
    /// slot is evicted by capacity while its lifecycle is still running;
    /// otherwise the stale timer would fire later and advance the tail a
    /// second time for the same slot.
    pub fn cancel_timers(&mut self) {
        self.expiry.clear();
        self.fade.clear();
        self.fade_after_ms = None;
    }

    /// Wipe content and timers.
    pub fn clear(&mut self) {
        self.text.clear();
        self.expiry.clear();
        self.fade.clear();
        self.fade_after_ms = None;
    }

    /// Advance both timers. Returns `true` on the tick the slot finishes
    /// its whole lifecycle and should be dropped from the live window.
    ///
    /// Expiry firing arms the fade timer instead of finishing when fading
    /// is configured; the later fade firing is what finishes the slot.
    pub fn tick(&mut self, delta_ms: u32) -> bool {
        if self.expiry.update(delta_ms) {
            match self.fade_after_ms {
                // A zero fade period could never fire; treat it as no fade.
                Some(fade_ms) if fade_ms > 0 => {
                    self.fade.reset_to(fade_ms);
                    false
                }
                _ => true,
            }
        } else {
            // Either the expiry timer is still running (fade is at zero and
            // reports nothing), or the fade is the timer doing the work now.
            self.fade.update(delta_ms)
        }
    }

    pub fn phase(&self) -> SlotPhase {
        if self.expiry.is_running() {
            SlotPhase::Active
        } else if self.fade.is_running() {
            SlotPhase::Fading
        } else {
            SlotPhase::Expired
        }
    }

    /// Remaining fade fraction in `[0, 1]`, used as an opacity multiplier
    /// while the slot is `Fading`.
    pub fn fade_fraction(&self) -> f32 {
        self.fade.fraction()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn group_id(&self) -> u32 {
        self.group_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(expire_ms: u32, fade_after_ms: Option<u32>) -> MessageSlot {
        let mut s = MessageSlot::default();
        s.set("hi".into(), Color::WHITE, 0, expire_ms, fade_after_ms);
        s
    }

    #[test]
    fn test_expires_without_fade() {
        let mut s = slot(100, None);
        assert_eq!(s.phase(), SlotPhase::Active);
        assert!(!s.tick(99));
        assert!(s.tick(1), "finishes on the expiry tick when not fading");
        assert_eq!(s.phase(), SlotPhase::Expired);
        assert!(!s.tick(50), "finished slots stay silent");
    }

    #[test]
    fn test_expiry_arms_fade() {
        let mut s = slot(100, Some(40));
        assert!(!s.tick(100), "expiry starts the fade, does not finish");
        assert_eq!(s.phase(), SlotPhase::Fading);
        assert_eq!(s.fade_fraction(), 1.0);
        assert!(!s.tick(30));
        assert_eq!(s.fade_fraction(), 0.25);
        assert!(s.tick(10), "fade running out finishes the slot");
        assert_eq!(s.phase(), SlotPhase::Expired);
    }

    #[test]
    fn test_fresh_slot_reads_expired() {
        let s = MessageSlot::default();
        assert_eq!(s.phase(), SlotPhase::Expired);
        assert_eq!(s.fade_fraction(), 0.0);
    }

    #[test]
    fn test_set_discards_previous_fade() {
        let mut s = slot(100, Some(40));
        s.tick(110);
        assert_eq!(s.phase(), SlotPhase::Fading);
        s.set("new".into(), Color::WHITE, 1, 100, Some(40));
        assert_eq!(s.phase(), SlotPhase::Active);
        assert_eq!(s.fade_fraction(), 0.0);
    }
}
