//! Feeds a scripted sample sequence through the input engine and prints
//! every event group it produces.
//!
//! ```bash
//! keytrace --frames 8
//! RUST_LOG=gin_input=trace keytrace --profile release
//! ```

use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use gin_input::input::{
    DeviceId, EventGroup, EventType, Input, KeyId, KeyKind, Listener, RawSample, SampleQueue,
    keycodes,
};
use gin_input::InputConfig;
use tabled::builder::Builder;
use tabled::settings::object::Rows;
use tabled::settings::{Alignment, Modify, Style};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "keytrace", about = "Trace key events for a scripted input sequence")]
struct Args {
    /// Configuration profile (config/{profile}.toml)
    #[arg(long)]
    profile: Option<String>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 6)]
    frames: u32,

    /// Frame length in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: i64,
}

/// Counts delivered groups so the total can be read back after the run
#[derive(Default)]
struct GroupCounter {
    groups: usize,
    frames: usize,
}

impl Listener for GroupCounter {
    fn name(&self) -> &str {
        "counter"
    }

    fn handle_event_group(&mut self, _group: &EventGroup, _input: &Input) {
        self.groups += 1;
    }

    fn think(&mut self, _ms: i64) {
        self.frames += 1;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

const KEYBOARD: DeviceId = DeviceId::keyboard(1);
const SECOND_KEYBOARD: DeviceId = DeviceId::keyboard(2);
const MOUSE: DeviceId = DeviceId::mouse(0);

/// Samples for one frame of the looping script
fn script(frame: u32, start: i64) -> Vec<RawSample> {
    let at = |offset: i64| start + offset;
    match frame % 4 {
        0 => vec![
            RawSample::new(KeyId::new(keycodes::LEFT_SHIFT, KEYBOARD), 1.0, at(1)),
            RawSample::new(KeyId::new(keycodes::KEY_A, KEYBOARD), 1.0, at(2)),
        ],
        1 => vec![
            RawSample::new(KeyId::new(keycodes::KEY_A, KEYBOARD), 0.0, at(1)),
            RawSample::new(KeyId::new(keycodes::LEFT_SHIFT, KEYBOARD), 0.0, at(3)),
            RawSample::new(KeyId::new(keycodes::SPACE, SECOND_KEYBOARD), 1.0, at(4)),
        ],
        2 => vec![
            RawSample::new(KeyId::new(keycodes::MOUSE_WHEEL_VERTICAL, MOUSE), 1.0, at(1)).at(40, 12),
            RawSample::new(KeyId::new(keycodes::MOUSE_L_BUTTON, MOUSE), 1.0, at(2)).at(40, 12),
            RawSample::new(KeyId::new(keycodes::SPACE, SECOND_KEYBOARD), 0.0, at(5)),
        ],
        _ => vec![
            RawSample::new(KeyId::new(keycodes::MOUSE_X_AXIS, MOUSE), 3.0, at(1)).at(43, 12),
            RawSample::new(KeyId::new(keycodes::MOUSE_L_BUTTON, MOUSE), 0.0, at(2)).at(43, 12),
        ],
    }
}

fn format_group(group: &EventGroup, input: &Input) -> String {
    let events: Vec<String> = group
        .events
        .iter()
        .filter(|event| !event.key.is_pattern())
        .map(|event| {
            let name = input
                .key(event.key)
                .map(|key| key.name().to_string())
                .unwrap_or_else(|| event.key.to_string());
            let label = format!("{} {}", event.kind, name);
            match event.kind {
                EventType::Press => label.green().to_string(),
                EventType::Release => label.red().to_string(),
                EventType::Adjust => label.yellow().to_string(),
                EventType::NoEvent => label.dimmed().to_string(),
            }
        })
        .collect();

    let position = match group.mouse_position() {
        Some((x, y)) => format!("@({x}, {y})"),
        None => "synthetic".dimmed().to_string(),
    };
    format!("  t={:<5} {:<10} {}", group.timestamp_ms, position, events.join(", "))
}

fn summary_table(input: &Input) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Key", "Id", "Kind", "Down", "Presses", "Releases"]);

    for key in input.keys().filter(|key| key.kind() != KeyKind::General) {
        let down = if key.is_down() {
            "yes".green().to_string()
        } else {
            "no".to_string()
        };
        builder.push_record([
            key.name().to_string(),
            key.id().to_string(),
            format!("{:?}", key.kind()),
            down,
            key.frame_press_count().to_string(),
            key.frame_release_count().to_string(),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = match &args.profile {
        Some(profile) => InputConfig::load(profile)?,
        None => InputConfig::load_from_env()?,
    };
    info!(profile = %config.profile, frames = args.frames, "starting keytrace");

    let mut input = Input::with_config(&config);

    let shift_a = input.try_make_binding(
        KeyId::any_keyboard(keycodes::KEY_A),
        &[KeyId::any_keyboard(keycodes::LEFT_SHIFT)],
        &[true],
    )?;
    let chord = input.try_bind_derived_key("Shift A", vec![shift_a])?;

    let jump = input.try_make_binding(KeyId::any_keyboard(keycodes::SPACE), &[], &[])?;
    let jump_family = input.try_bind_derived_key_family("Jump", jump)?;

    let pointer_events = Rc::new(Cell::new(0usize));
    let seen = Rc::clone(&pointer_events);
    input.add_mouse_listener(move |_event| seen.set(seen.get() + 1));
    input.register_listener(Box::new(GroupCounter::default()));

    println!("{}", "keytrace".bold().underline());
    let mut queue = SampleQueue::new();
    let mut now = 0;
    for frame in 0..args.frames {
        for sample in script(frame, now) {
            queue.push(sample);
        }
        now += args.frame_ms;

        let samples = queue.drain_through(now);
        let groups = input.try_think(now, &samples)?;
        println!("{}", format!("frame {frame} (t={now})").bold());
        for group in &groups {
            println!("{}", format_group(group, &input));
            if group.is_pressed(chord) {
                println!("    {}", "chord!".magenta().bold());
            }
        }
    }

    println!("\n{}", summary_table(&input));

    if let Some(counter) = input
        .listener("counter")
        .and_then(|l| l.as_any().downcast_ref::<GroupCounter>())
    {
        println!(
            "{} groups over {} frames, {} pointer samples",
            counter.groups,
            counter.frames,
            pointer_events.get()
        );
    }
    if let Some(family) = input.family(jump_family) {
        let devices: Vec<String> = family.instances().map(|d| d.to_string()).collect();
        println!("family {:?} instantiated for keyboards [{}]", family.name(), devices.join(", "));
    }
    Ok(())
}
