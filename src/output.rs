//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Apply / Preview
//!
//! ```text
//! photo.jpg (4032x3024) → photo-edit.png (4032x3024)
//!     saturation 1.20  sharpness 1.00  contrast 0.90  brightness 1.10
//! ```
//!
//! ## Replay
//!
//! ```text
//! 001 open photo.jpg → opened (4032x3024)
//! 002 saturation 1.4 → saturation 1.40
//! 003 resized 800x600 → working 800x600
//! 004 save edit.png → saved edit.png
//! 005 quit → closed
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>` or `String`)
//! for testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::imaging::{Adjustment, AdjustmentState};
use crate::session::{Event, Outcome};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn optional_path(path: Option<&Path>) -> String {
    match path {
        Some(p) => p.display().to_string(),
        None => "(cancelled)".to_string(),
    }
}

/// All four factors on one line, pipeline order, two decimals.
///
/// ```text
/// saturation 1.20  sharpness 1.00  contrast 0.90  brightness 1.10
/// ```
pub fn format_factors(state: &AdjustmentState) -> String {
    Adjustment::ALL
        .iter()
        .map(|&a| format!("{} {:.2}", a, state.get(a)))
        .collect::<Vec<_>>()
        .join("  ")
}

// ============================================================================
// Apply / preview output
// ============================================================================

/// Format the result of a one-shot enhancement.
pub fn format_apply_output(
    input: &Path,
    input_dims: (u32, u32),
    output: &Path,
    output_dims: (u32, u32),
    state: &AdjustmentState,
) -> Vec<String> {
    vec![
        format!(
            "{} ({}x{}) → {} ({}x{})",
            input.display(),
            input_dims.0,
            input_dims.1,
            output.display(),
            output_dims.0,
            output_dims.1
        ),
        format!("{}{}", indent(1), format_factors(state)),
    ]
}

/// Print apply output to stdout.
pub fn print_apply_output(
    input: &Path,
    input_dims: (u32, u32),
    output: &Path,
    output_dims: (u32, u32),
    state: &AdjustmentState,
) {
    for line in format_apply_output(input, input_dims, output, output_dims, state) {
        println!("{}", line);
    }
}

// ============================================================================
// Replay output
// ============================================================================

/// Describe an event the way the user would have triggered it.
fn describe_event(event: &Event) -> String {
    match event {
        Event::FactorChanged { which, value } => format!("{} {}", which, value),
        Event::Resized { width, height } => format!("resized {}x{}", width, height),
        Event::Open { path } => format!("open {}", optional_path(path.as_deref())),
        Event::Save { path } => format!("save {}", optional_path(path.as_deref())),
        Event::Reset => "reset".to_string(),
        Event::Quit { save: false, .. } => "quit without saving".to_string(),
        Event::Quit {
            save: true,
            path: None,
        } => "quit".to_string(),
        Event::Quit {
            save: true,
            path: Some(p),
        } => format!("quit saving {}", p.display()),
    }
}

/// Format one replayed event and what came of it.
///
/// `state` and `working` are read after the event was handled.
pub fn format_replay_event(
    index: usize,
    event: &Event,
    outcome: &Outcome,
    state: &AdjustmentState,
    working: Option<(u32, u32)>,
) -> String {
    let result = match (event, outcome) {
        (Event::FactorChanged { which, .. }, Outcome::Updated) => {
            format!("{} {:.2}", which, state.get(*which))
        }
        (Event::Resized { .. }, Outcome::Updated) => match working {
            Some((w, h)) => format!("working {}x{}", w, h),
            None => "no image".to_string(),
        },
        (Event::Reset, Outcome::Updated) => format_factors(state),
        (_, Outcome::Updated) => "updated".to_string(),
        (_, Outcome::Opened { width, height, .. }) => format!("opened ({}x{})", width, height),
        (_, Outcome::Saved { path }) => format!("saved {}", path.display()),
        (_, Outcome::Cancelled) => "cancelled".to_string(),
        (_, Outcome::Closed) => "closed".to_string(),
        (_, Outcome::QuitAborted { cause: None }) => "quit aborted: save cancelled".to_string(),
        (_, Outcome::QuitAborted { cause: Some(e) }) => format!("quit aborted: {}", e),
    };
    format!("{} {} → {}", format_index(index), describe_event(event), result)
}

/// Format a replay event that failed outright.
pub fn format_replay_error(index: usize, event: &Event, error: &dyn std::error::Error) -> String {
    format!("{} {} → error: {}", format_index(index), describe_event(event), error)
}
