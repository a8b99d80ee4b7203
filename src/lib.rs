//! Scrolling chat message display for game HUDs.
//!
//! Tracks a stream of short text messages (chat, server announcements) in
//! a fixed-capacity ring, expires and fades them on independent timers,
//! and answers every frame which lines are visible and at what opacity and
//! offset. Rendering, text measurement and line wrapping stay behind
//! traits supplied by the host.

pub mod config;
pub mod display;
pub mod error;
pub mod render;
pub mod ring;
pub mod slot;
pub mod substitute;
pub mod timer;

pub use config::ChatConfig;
pub use display::{ChatDisplay, DisplayMode, ProjectParams};
pub use error::{Error, Result};
pub use render::{ClipRect, LineWrapper, MonoWrapper, RenderLine, RenderPlan, TextRenderer};
pub use ring::MessageRing;
pub use slot::{Color, MessageSlot, SlotPhase};
pub use substitute::{GameResolver, NullResolver, VarResolver, substitute};
pub use timer::Countdown;
