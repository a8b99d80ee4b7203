//! Projection geometry: line positions, scroll offsets, clipping and
//! per-line alpha.

use chat_hud::{
    ChatConfig, ChatDisplay, ClipRect, Color, ProjectParams, TextRenderer,
};

fn config(expire_ms: u32, max_messages: u32) -> ChatConfig {
    let mut config = ChatConfig::default();
    config.expire_ms = expire_ms;
    config.fade_ms = 100;
    config.scroll_ms = 100;
    config.max_messages = max_messages;
    config
}

fn display(config: &ChatConfig, short_count: u32, top_down: bool) -> ChatDisplay {
    // font 12 + gap 3: line height 15.
    ChatDisplay::new(config, short_count, top_down, 800.0, 12.0, 3.0)
}

fn params(anchor_y: f32) -> ProjectParams {
    ProjectParams {
        anchor_y,
        compose_fade_in: 0.0,
        composing: false,
        announcement_active: false,
        base_alpha: 1.0,
        canvas_width: 800.0,
    }
}

fn say(display: &mut ChatDisplay, text: &str) {
    display.on_message_received(Color::WHITE, text);
}

#[test]
fn test_bottom_anchored_settled_geometry() {
    let mut d = display(&config(8_000, 24), 4, false);
    say(&mut d, "one");
    say(&mut d, "two");
    d.tick(100, false); // run the arrival scroll out

    let plan = d.project(&params(500.0));
    assert!(plan.clip.is_none(), "no clipping outside a scroll transition");
    assert_eq!(plan.lines.len(), 2);

    // Newest first, at the anchor plus the font baseline; older lines walk
    // up one line height at a time.
    assert_eq!(plan.lines[0].text, "two");
    assert_eq!(plan.lines[0].y, 512.0);
    assert_eq!(plan.lines[1].text, "one");
    assert_eq!(plan.lines[1].y, 497.0);
    assert_eq!(plan.lines[0].x, 15.0);
    assert_eq!(plan.lines[0].alpha, 1.0);
}

#[test]
fn test_scroll_offsets_lines_and_clips() {
    let mut d = display(&config(8_000, 24), 4, false);
    say(&mut d, "one");
    assert!(d.is_scrolling());

    // Scroll fraction is 1.0 right after arrival: one full line height of
    // offset, sliding back to zero over the scroll period.
    let plan = d.project(&params(500.0));
    assert_eq!(plan.lines.len(), 1);
    assert_eq!(plan.lines[0].y, 527.0);
    assert_eq!(
        plan.clip,
        Some(ClipRect {
            x: 0.0,
            y: 155.0,
            width: 800.0,
            height: 360.0,
        })
    );

    // Halfway through the scroll the offset has halved.
    d.tick(50, false);
    let plan = d.project(&params(500.0));
    assert_eq!(plan.lines[0].y, 519.5);
}

#[test]
fn test_top_anchored_stacks_oldest_up() {
    let mut d = display(&config(8_000, 24), 4, true);
    say(&mut d, "one");
    say(&mut d, "two");
    say(&mut d, "three");
    assert!(!d.is_scrolling());

    let plan = d.project(&params(80.0));
    assert_eq!(plan.lines.len(), 3);
    assert_eq!(plan.lines[0].text, "three");
    assert_eq!(plan.lines[0].y, 122.0);
    assert_eq!(plan.lines[1].y, 107.0);
    assert_eq!(plan.lines[2].text, "one");
    assert_eq!(plan.lines[2].y, 92.0);
}

#[test]
fn test_announcement_shifts_lines_up() {
    let mut d = display(&config(8_000, 24), 4, false);
    say(&mut d, "one");
    say(&mut d, "two");
    d.tick(100, false);

    let mut p = params(500.0);
    p.announcement_active = true;
    let plan = d.project(&p);
    assert_eq!(plan.lines[0].y, 497.0, "one line height above the usual spot");
    assert_eq!(plan.lines[1].y, 482.0);
    assert_eq!(plan.lines.len(), 2);
}

#[test]
fn test_announcement_drops_oldest_line_past_threshold() {
    let mut d = display(&config(8_000, 24), 4, false);
    for i in 0..25 {
        say(&mut d, &format!("line {i}"));
    }
    d.tick(100, false);

    let plan = d.project(&params(500.0));
    assert_eq!(plan.lines.len(), 4);

    let mut p = params(500.0);
    p.announcement_active = true;
    let plan = d.project(&p);
    assert_eq!(plan.lines.len(), 3, "the banner costs the oldest visible line");
}

#[test]
fn test_compose_fade_in_scales_unsettled_lines_only() {
    let mut d = display(&config(8_000, 24), 1, false);
    say(&mut d, "one");
    say(&mut d, "two");
    d.tick(100, false);

    let mut p = params(500.0);
    p.compose_fade_in = 0.5;
    let plan = d.project(&p);
    assert_eq!(plan.lines.len(), 2, "the overlay shows the whole backlog");
    assert_eq!(plan.lines[0].alpha, 1.0, "already-settled line keeps its alpha");
    assert_eq!(plan.lines[1].alpha, 0.5, "line beyond the window fades in");
}

#[test]
fn test_fading_line_alpha_follows_fade_fraction() {
    let mut d = display(&config(200, 24), 4, false);
    say(&mut d, "hello");
    d.tick(200, false); // expiry fires, fade armed
    d.tick(40, false); // 60 of 100 fade ms left

    let plan = d.project(&params(500.0));
    assert_eq!(plan.lines.len(), 1);
    assert!((plan.lines[0].alpha - 0.6).abs() < 1e-6);
}

#[test]
fn test_base_alpha_scales_everything() {
    let mut d = display(&config(8_000, 24), 4, false);
    say(&mut d, "one");
    d.tick(100, false);

    let mut p = params(500.0);
    p.base_alpha = 0.25;
    let plan = d.project(&p);
    assert_eq!(plan.lines[0].alpha, 0.25);
}

#[test]
fn test_render_feeds_plan_through_clip() {
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl TextRenderer for Recorder {
        fn draw_text(
            &mut self,
            _x: f32,
            y: f32,
            _font_size: f32,
            _color: Color,
            _alpha: f32,
            text: &str,
        ) {
            self.events.push(format!("draw {text} @{y}"));
        }
        fn push_clip(&mut self, _clip: ClipRect) {
            self.events.push("push_clip".into());
        }
        fn pop_clip(&mut self) {
            self.events.push("pop_clip".into());
        }
    }

    let mut d = display(&config(8_000, 24), 4, false);
    say(&mut d, "one");

    let mut out = Recorder::default();
    d.render(&params(500.0), &mut out);
    assert_eq!(
        out.events,
        vec!["push_clip", "draw one @527", "pop_clip"],
        "scrolling draws are wrapped in the clip"
    );

    d.tick(100, false);
    let mut out = Recorder::default();
    d.render(&params(500.0), &mut out);
    assert_eq!(out.events, vec!["draw one @512"]);
}

#[test]
fn test_plan_snapshot() {
    let mut d = display(&config(8_000, 24), 4, true);
    say(&mut d, "one");
    say(&mut d, "two");
    say(&mut d, "three");

    let plan = d.project(&params(80.0));
    let rendered: String = plan
        .lines
        .iter()
        .map(|l| format!("[{:.1},{:.1}] a={:.2} {}\n", l.x, l.y, l.alpha, l.text))
        .collect();
    insta::assert_snapshot!(rendered, @r"
    [15.0,122.0] a=1.00 three
    [15.0,107.0] a=1.00 two
    [15.0,92.0] a=1.00 one
    ");
}
