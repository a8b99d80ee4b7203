use clap::Parser;
use tracing_subscriber::EnvFilter;

use chat_hud::{
    ChatConfig, ChatDisplay, ClipRect, Color, GameResolver, ProjectParams, TextRenderer,
};

/// Drive a chat display through a scripted frame loop and print each
/// frame's visible lines.
#[derive(Parser)]
#[command(name = "chat-hud", about = "Scrolling chat display demo")]
struct Args {
    /// Anchor the display at the top and stack downward.
    #[arg(long)]
    top_down: bool,
    /// Messages shown in the short display modes.
    #[arg(long, default_value_t = 4)]
    short_count: u32,
    /// Frames to simulate.
    #[arg(long, default_value_t = 30)]
    frames: u32,
    /// Milliseconds per simulated frame.
    #[arg(long, default_value_t = 50)]
    frame_ms: u32,
}

struct StdoutRenderer;

impl TextRenderer for StdoutRenderer {
    fn draw_text(
        &mut self,
        x: f32,
        y: f32,
        _font_size: f32,
        _color: Color,
        alpha: f32,
        text: &str,
    ) {
        println!("  [{x:>5.1},{y:>6.1}] a={alpha:.2} {text}");
    }

    fn push_clip(&mut self, clip: ClipRect) {
        println!("  clip y={:.1} h={:.1}", clip.y, clip.height);
    }

    fn pop_clip(&mut self) {}
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = ChatConfig::default();
    // Short lifetimes so a brief run shows the whole expire/fade cycle.
    config.expire_ms = 600;

    let mut display = ChatDisplay::new(
        &config,
        args.short_count,
        args.top_down,
        480.0,
        12.0,
        3.0,
    );

    let mut resolver = GameResolver::new();
    resolver.set_player_name("Nick");
    display.set_resolver(Box::new(resolver));

    // (frame, color, text) script; tokens are substituted on arrival.
    let script: &[(u32, Color, &str)] = &[
        (0, Color::WHITE, "Welcome aboard, %playerName%!"),
        (
            2,
            Color::rgb(0.5, 1.0, 0.5),
            "Press %toggleChat% to chat and %toggleScoreboard% for scores",
        ),
        (3, Color::rgb(1.0, 0.8, 0.3), "Nick: anyone up for a rematch?"),
        (
            9,
            Color::rgb(1.0, 0.8, 0.3),
            "Nick: this one is long enough that the wrapper will split it into \
             more than one physical line on screen",
        ),
    ];

    let params = ProjectParams {
        anchor_y: if args.top_down { 80.0 } else { 500.0 },
        compose_fade_in: 0.0,
        composing: false,
        announcement_active: false,
        base_alpha: 1.0,
        canvas_width: 800.0,
    };

    let mut out = StdoutRenderer;
    for frame in 0..args.frames {
        display.tick(args.frame_ms, false);
        for (at, color, text) in script {
            if *at == frame {
                display.on_message_received(*color, text);
            }
        }
        println!(
            "frame {frame:>3} | live {} | visible {} | mode {:?}",
            display.message_count(),
            display.visible_count(0.0, false),
            display.display_mode()
        );
        display.render(&params, &mut out);
    }

    Ok(())
}
