//! The chat display: mode policy, scroll animation, and the per-frame
//! visibility projection.
//!
//! One `ChatDisplay` owns a message ring and answers, every frame, which
//! lines are on screen and at what opacity and offset. The host drives it
//! in a fixed order: `tick`, then `project` (or `render`), then draw.
//! Inserting mid-frame after the query is legal; the line shows up next
//! frame.

use tracing::debug;

use crate::config::ChatConfig;
use crate::render::{ClipRect, LineWrapper, MonoWrapper, RenderLine, RenderPlan, TextRenderer};
use crate::ring::MessageRing;
use crate::slot::{Color, SlotPhase};
use crate::substitute::{GameResolver, VarResolver, substitute};
use crate::timer::Countdown;

/// Continuation indent for wrapped message lines. Six spaces, if you're
/// wondering.
const WRAP_INDENT: &str = "      ";

/// How many messages the display shows and whether timed-out ones linger.
///
/// Cycled by the user: `ShortTimeout` -> `ShortFixed` -> `LongFixed` and
/// back around. Only the projection policy changes; storage is untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// A few messages; each disappears as soon as its timers finish.
    ShortTimeout,
    /// A few messages; timed-out ones stay until capacity reuse.
    ShortFixed,
    /// A screenful; timed-out ones stay until capacity reuse.
    LongFixed,
}

impl DisplayMode {
    pub fn next(self) -> Self {
        match self {
            Self::ShortTimeout => Self::ShortFixed,
            Self::ShortFixed => Self::LongFixed,
            Self::LongFixed => Self::ShortTimeout,
        }
    }
}

/// Per-frame inputs to `project`/`render`.
#[derive(Debug, Clone, Copy)]
pub struct ProjectParams {
    /// Top (top-anchored) or bottom (bottom-anchored) of the display area.
    pub anchor_y: f32,
    /// Compose-overlay fade-in progress, `0.0` when no overlay is
    /// animating. While positive, every retained message is shown.
    pub compose_fade_in: f32,
    /// True while the player is typing a message.
    pub composing: bool,
    /// True while a banner occupies the last line; the display shifts up
    /// one line to make room.
    pub announcement_active: bool,
    /// Opacity everything is scaled by.
    pub base_alpha: f32,
    /// Canvas width, used for the scroll clip rectangle.
    pub canvas_width: f32,
}

/// Scrolling, auto-expiring chat message display.
pub struct ChatDisplay {
    ring: MessageRing,
    scroll: Countdown,
    mode: DisplayMode,
    /// Top-anchored displays stack oldest-at-top and drop lines without a
    /// fade; bottom-anchored displays fade lines out after expiry.
    top_down: bool,
    short_count: u32,
    wrap_width: f32,
    font_size: f32,
    line_gap: f32,
    x_margin: f32,
    expire_ms: u32,
    fade_ms: u32,
    next_group_id: u32,
    wrapper: Box<dyn LineWrapper>,
    resolver: Box<dyn VarResolver>,
}

impl ChatDisplay {
    pub fn new(
        config: &ChatConfig,
        short_count: u32,
        top_down: bool,
        wrap_width: f32,
        font_size: f32,
        line_gap: f32,
    ) -> Self {
        Self {
            ring: MessageRing::new(config.max_messages),
            scroll: Countdown::with_period(config.scroll_ms),
            mode: DisplayMode::ShortTimeout,
            top_down,
            short_count,
            wrap_width,
            font_size,
            line_gap,
            x_margin: config.x_margin,
            expire_ms: config.expire_ms,
            fade_ms: config.fade_ms,
            next_group_id: 0,
            wrapper: Box::new(MonoWrapper::new()),
            resolver: Box::new(GameResolver::new()),
        }
    }

    /// Replace the line wrapper (hosts with real text measurement).
    pub fn set_wrapper(&mut self, wrapper: Box<dyn LineWrapper>) {
        self.wrapper = wrapper;
    }

    /// Replace the `%token%` resolver.
    pub fn set_resolver(&mut self, resolver: Box<dyn VarResolver>) {
        self.resolver = resolver;
    }

    /// Drop every message and stop all pending animations.
    pub fn reset(&mut self) {
        self.ring.reset();
        self.scroll.stop();
        debug!("chat display reset");
    }

    /// Advance all slot timers and the scroll animator by `delta_ms`.
    ///
    /// On a top-anchored display, an eviction that brings the live count
    /// down into the shown window starts the scroll transition, so the
    /// list visibly contracts instead of snapping.
    pub fn tick(&mut self, delta_ms: u32, composing: bool) {
        self.scroll.update(delta_ms);
        let evicted = self.ring.tick_slots(delta_ms);
        if evicted > 0
            && self.top_down
            && self.ring.message_count() <= u64::from(self.number_to_show(composing))
        {
            self.scroll.reset();
        }
    }

    /// Cycle to the next display mode.
    pub fn toggle_display_mode(&mut self) {
        self.mode = self.mode.next();
        debug!(mode = ?self.mode, "display mode toggled");
    }

    /// Substitute `%tokens%`, wrap to physical lines, and store them all
    /// under one group id. Bottom-anchored displays start the scroll
    /// transition so the new message slides in.
    pub fn on_message_received(&mut self, color: Color, raw: &str) {
        let text = substitute(raw, self.resolver.as_ref());
        let lines = self
            .wrapper
            .wrap(&text, self.wrap_width, self.font_size, WRAP_INDENT);

        let group_id = self.next_group_id;
        self.next_group_id += 1;
        debug!(group_id, lines = lines.len(), "message received");

        // Bottom-anchored chat fades lines out after expiry; top-anchored
        // announcements drop them the moment the expiry timer fires.
        let fade = (!self.top_down).then_some(self.fade_ms);
        for line in lines {
            self.ring
                .insert(line, color, group_id, self.expire_ms, fade);
        }

        if !self.top_down {
            self.scroll.reset();
        }
    }

    pub fn message_count(&self) -> u64 {
        self.ring.message_count()
    }

    /// Read access to the backing ring (slot text, colors, group ids).
    pub fn ring(&self) -> &MessageRing {
        &self.ring
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_running()
    }

    /// Line budget for the current mode. While composing, the whole
    /// retained backlog is in play regardless of mode.
    pub fn number_to_show(&self, composing: bool) -> u32 {
        if composing {
            return self.ring.capacity_max();
        }
        match self.mode {
            DisplayMode::ShortTimeout | DisplayMode::ShortFixed => self.short_count,
            DisplayMode::LongFixed => self.ring.capacity_max(),
        }
    }

    /// Whether the current mode keeps timed-out messages on screen.
    pub fn shows_expired(&self, composing: bool) -> bool {
        composing || self.mode != DisplayMode::ShortTimeout
    }

    /// How many of the newest lines to hand to the renderer this frame.
    ///
    /// Recomputed every frame; timers move continuously underneath it.
    pub fn visible_count(&self, compose_fade_in: f32, composing: bool) -> u32 {
        if self.ring.head() == 0 {
            return 0;
        }

        // While the compose overlay fades in, the whole backlog shows,
        // capped only by structural capacity.
        if compose_fade_in > 0.0 {
            return u64::from(self.ring.capacity_max()).min(self.ring.head()) as u32;
        }

        let scrolling = self.is_scrolling();

        // One extra line may keep rendering while it slides off screen.
        // Bottom-anchored displays only need it once the ring has filled.
        let mut scroll_allowance = 0;
        if scrolling && (self.top_down || self.ring.is_full()) {
            scroll_allowance = 1;
        }

        let budget = self.number_to_show(composing);
        let mut shown = 0;
        let mut scrolled_off = 0;

        // Walk newest to oldest. The floor is logical position zero, not
        // `tail`: the fixed modes keep showing timer-evicted slots until
        // their storage is reused, and the budget (at most capacity_max)
        // stops the walk before it could alias a reused slot.
        let mut i = self.ring.head();
        while i > 0 {
            let expired = self.ring.slot_at(i).phase() == SlotPhase::Expired;

            if expired && !composing && self.mode == DisplayMode::ShortTimeout {
                if !scrolling {
                    break;
                }
                scrolled_off += 1;
                if scrolled_off > scroll_allowance {
                    break;
                }
            }

            shown += 1;
            if shown >= budget {
                break;
            }
            i -= 1;
        }

        shown
    }

    /// Compute this frame's render plan: the visible window, one
    /// `RenderLine` per slot (newest first), and the scroll clip when a
    /// transition is animating. Pure query; `tick` does all mutation.
    pub fn project(&self, params: &ProjectParams) -> RenderPlan<'_> {
        let mut plan = RenderPlan::default();
        let scrolling = self.is_scrolling();

        let first = self.ring.head();
        let count = u64::from(self.visible_count(params.compose_fade_in, params.composing));
        let mut last = first - count;
        if first == last {
            return plan;
        }

        let line_height = self.font_size + self.line_gap;

        // Clipping costs a state change, and outside a transition the line
        // budget already bounds the output, so clip only while scrolling.
        if scrolling {
            let area_height = self.ring.capacity_max() as f32 * line_height;
            let area_y = params.anchor_y
                + if self.top_down {
                    area_height
                } else {
                    line_height
                };
            plan.clip = Some(ClipRect {
                x: 0.0,
                y: area_y - area_height,
                width: params.canvas_width,
                height: area_height,
            });
        }

        // Starting position for the newest message; older lines walk up
        // from here one line height at a time.
        let mut y = params.anchor_y + self.scroll.fraction() * line_height;
        if self.top_down && scrolling {
            y -= line_height;
        }
        if self.top_down {
            y += (first - last - 1) as f32 * line_height;
        }

        if params.announcement_active {
            // Give up the bottom line; past the size threshold that also
            // costs the oldest visible line.
            if first >= u64::from(self.ring.capacity_max()) {
                last += 1;
            }
            y -= line_height;
        }

        y += self.font_size;

        let budget = self.number_to_show(false);
        let mut i = first;
        while i > last {
            let slot = self.ring.slot_at(i);
            let mut alpha = params.base_alpha;

            // Fade phase dims the line, unless the mode keeps expired
            // lines on screen anyway.
            if !self.shows_expired(params.composing) && slot.phase() == SlotPhase::Fading {
                alpha *= slot.fade_fraction();
            }

            // While the compose overlay fades in, lines that were not
            // already settled on screen fade in with it.
            if params.compose_fade_in > 0.0
                && params.compose_fade_in < 1.0
                && ((slot.phase() != SlotPhase::Active && self.mode == DisplayMode::ShortTimeout)
                    || (first - i) >= u64::from(budget))
            {
                alpha *= params.compose_fade_in;
            }

            plan.lines.push(RenderLine {
                text: slot.text(),
                color: slot.color(),
                alpha,
                x: self.x_margin,
                y,
            });

            y -= line_height;
            i -= 1;
        }

        plan
    }

    /// Project and hand every visible line to `out`, wrapping the draws in
    /// the scroll clip when one is active.
    pub fn render(&self, params: &ProjectParams, out: &mut dyn TextRenderer) {
        let plan = self.project(params);
        if plan.lines.is_empty() {
            return;
        }
        if let Some(clip) = plan.clip {
            out.push_clip(clip);
        }
        for line in &plan.lines {
            out.draw_text(line.x, line.y, self.font_size, line.color, line.alpha, line.text);
        }
        if plan.clip.is_some() {
            out.pop_clip();
        }
    }
}
