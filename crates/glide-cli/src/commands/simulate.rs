use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use tracing::debug;

use glide_core::frame::{FrameBatcher, FrameKey, ManualScheduler};
use glide_core::motion::MomentumScroll;
use glide_core::tween::TweenLog;
use glide_core::widgets::{Carousel, Counter};
use glide_core::{AppConfig, ElementId};

const SCROLL_KEY: FrameKey = FrameKey::channel("scroll");

#[derive(Debug, Serialize)]
struct ScrollFrame {
    frame: u32,
    offset: f64,
    velocity: f64,
}

#[derive(Debug, Serialize)]
struct ScrollTrace {
    from: f64,
    target: f64,
    smooth: bool,
    frames: Vec<ScrollFrame>,
    final_offset: f64,
    frame_requests: u32,
}

/// Page state the batched scroll writes land in
#[derive(Debug, Default)]
struct Page {
    offset: f64,
    writes: u32,
}

pub fn scroll(
    config: &AppConfig,
    from: f64,
    to: f64,
    max: Option<f64>,
    reduced_motion: bool,
    json: bool,
) -> Result<()> {
    let mut engine = MomentumScroll::new(config.scroll.clone());
    if let Some(max) = max {
        engine.set_bounds(max);
    }
    engine.set_reduced_motion(reduced_motion);
    engine.sync(from);
    engine.scroll_to(to);

    let scheduler = ManualScheduler::new();
    let mut batcher: FrameBatcher<Page, _> = FrameBatcher::new(&scheduler);
    let mut page = Page {
        offset: from,
        writes: 0,
    };
    let mut frames = Vec::new();
    let mut frame = 0;

    loop {
        let offset = if engine.is_converging() {
            engine.step()
        } else {
            engine.current()
        };
        // A second write in the same frame would replace the first
        batcher.schedule_keyed(SCROLL_KEY, move |page: &mut Page| {
            page.offset = offset;
            page.writes += 1;
        });
        batcher.run_frame(&mut page);
        frame += 1;
        frames.push(ScrollFrame {
            frame,
            offset: page.offset,
            velocity: engine.velocity(),
        });
        if !engine.is_converging() {
            break;
        }
    }
    debug!(frames = frame, writes = page.writes, "Scroll simulation finished");

    let trace = ScrollTrace {
        from,
        target: engine.target(),
        smooth: engine.is_smooth(),
        frames,
        final_offset: page.offset,
        frame_requests: scheduler.requests(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&trace)?);
        return Ok(());
    }

    println!(
        "Scroll {} -> {} ({})\n",
        trace.from,
        trace.target,
        if trace.smooth { "momentum" } else { "jump" }
    );
    println!("{:>6}  {:>12}  {:>10}", "frame", "offset", "velocity");
    for f in &trace.frames {
        println!("{:>6}  {:>12.3}  {:>10.3}", f.frame, f.offset, f.velocity);
    }
    println!(
        "\nSettled at {} after {} frames.",
        trace.final_offset,
        trace.frames.len()
    );
    Ok(())
}

pub fn counter(config: &AppConfig, target: &str, json: bool) -> Result<()> {
    let mut counter = Counter::from_attribute(target, &config.counter)?;
    let mut texts = Vec::new();
    loop {
        let frame = counter.step();
        texts.push(frame.text);
        if frame.done {
            break;
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&texts)?);
        return Ok(());
    }

    for (i, text) in texts.iter().enumerate() {
        println!("{:>5}  {}", i + 1, text);
    }
    println!(
        "\n{} frames, about {} ms at {} ms per frame.",
        texts.len(),
        texts.len() as u64 * config.counter.frame_ms,
        config.counter.frame_ms
    );
    Ok(())
}

/// One carousel input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Next,
    Prev,
    GoTo(usize),
    Swipe { start: f64, end: f64 },
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        match parts.as_slice() {
            ["next"] => Ok(Action::Next),
            ["prev"] => Ok(Action::Prev),
            ["go", index] => Ok(Action::GoTo(
                index.parse().with_context(|| format!("Invalid index in {s:?}"))?,
            )),
            ["swipe", start, end] => Ok(Action::Swipe {
                start: start.parse().with_context(|| format!("Invalid start in {s:?}"))?,
                end: end.parse().with_context(|| format!("Invalid end in {s:?}"))?,
            }),
            _ => Err(anyhow!("Unknown carousel action {s:?}")),
        }
    }
}

pub fn carousel(config: &AppConfig, cards: usize, actions: &[String], card_width: f64) -> Result<()> {
    let Some(mut carousel) = Carousel::new(config.carousel.clone(), cards) else {
        bail!("A carousel needs at least one card");
    };
    let actions = actions
        .iter()
        .map(|a| a.parse::<Action>())
        .collect::<Result<Vec<_>>>()?;

    let track = ElementId(0);
    let mut log = TweenLog::new();
    println!("{:<20} {:>5}  {:>5}  {:>5}  {:>10}", "action", "index", "prev", "next", "offset");
    for action in actions {
        let moved = match action {
            Action::Next => carousel.next(),
            Action::Prev => carousel.prev(),
            Action::GoTo(index) => carousel.go_to(index),
            Action::Swipe { start, end } => carousel.swipe(start, end),
        };
        if moved {
            carousel.animate_track(track, card_width, &mut log);
        }
        println!(
            "{:<20} {:>5}  {:>5}  {:>5}  {:>10}",
            format!("{action:?}"),
            carousel.index(),
            if carousel.prev_disabled() { "off" } else { "on" },
            if carousel.next_disabled() { "off" } else { "on" },
            carousel.track_offset(card_width)
        );
    }
    println!("\n{} slide tweens issued.", log.requests.len());
    Ok(())
}
