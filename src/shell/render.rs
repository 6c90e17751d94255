//! Text and JSON views written by the shell.

use healthlog_core::{DateKey, Draft, RecordDay, WaterProgress, WeightSeries};
use serde::Serialize;
use std::io::{self, Write};

use crate::commands::OutputFormat;

#[derive(Serialize)]
struct DayView<'a> {
    date: DateKey,
    #[serde(flatten)]
    day: &'a RecordDay,
    water_progress: WaterProgress,
}

pub fn day<W: Write>(
    out: &mut W,
    date: DateKey,
    day: &RecordDay,
    format: &OutputFormat,
) -> io::Result<()> {
    let progress = WaterProgress::of(&day.water);

    if let OutputFormat::Json = format {
        let view = DayView {
            date,
            day,
            water_progress: progress,
        };
        let json = serde_json::to_string_pretty(&view).map_err(io::Error::other)?;
        return writeln!(out, "{}", json);
    }

    writeln!(out, "{} ({})", date.long_label(), date)?;
    writeln!(out)?;

    writeln!(out, "Water     {}", progress)?;
    for (i, slot) in day.water.records().iter().enumerate() {
        writeln!(
            out,
            "  {:>2}. {:<10} {}",
            i + 1,
            slot.display_label(i),
            slot.toggle_label()
        )?;
    }

    writeln!(
        out,
        "Meals     {}/{} done",
        day.meals.completed_count(),
        day.meals.count()
    )?;
    for (i, slot) in day.meals.records().iter().enumerate() {
        let label = day.meals.label(i).unwrap_or_default();
        let mut line = format!("  {:>2}. {:<6} {}", i + 1, label, slot.display_label());
        if !slot.time.is_empty() {
            line.push_str(&format!(" {}", slot.time));
        }
        if slot.completed {
            line.push_str(" [완료]");
        }
        if slot.photo.is_some() {
            line.push_str(" (photo)");
        }
        writeln!(out, "{}", line)?;
    }

    match day.exercise.summary() {
        Some(summary) => writeln!(out, "Exercise  {}", summary)?,
        None => writeln!(out, "Exercise  no exercise recorded")?,
    }
    if day.has_weight() {
        writeln!(out, "Weight    {}kg", day.weight.trim())
    } else {
        writeln!(out, "Weight    not recorded")
    }
}

pub fn draft<W: Write>(out: &mut W, date: DateKey, draft: &Draft) -> io::Result<()> {
    writeln!(out, "Editing {} on {}", draft.target(), date)?;
    match draft {
        Draft::Water { amount, .. } => writeln!(out, "  amount: {}", amount),
        Draft::WaterSettings { text } => writeln!(out, "  count,target: {}", text),
        Draft::Meal {
            food, time, photo, ..
        } => {
            writeln!(out, "  food: {}", food)?;
            writeln!(out, "  time: {}", time)?;
            match photo {
                Some(photo) => writeln!(out, "  photo: {} bytes", photo.len()),
                None => writeln!(out, "  photo: none"),
            }
        }
        Draft::MealSettings { text } => writeln!(out, "  count,labels: {}", text),
        Draft::Weight { text } => writeln!(out, "  weight: {}", text),
        Draft::Exercise { text } => writeln!(out, "  type,duration: {}", text),
    }
}

pub fn trend<W: Write>(out: &mut W, series: &WeightSeries, format: &OutputFormat) -> io::Result<()> {
    if let OutputFormat::Json = format {
        let json = serde_json::to_string_pretty(series).map_err(io::Error::other)?;
        return writeln!(out, "{}", json);
    }

    if series.is_empty() {
        return writeln!(out, "No weight recorded.");
    }

    writeln!(out, "Weight trend ({} days)", series.len())?;
    for point in series {
        writeln!(out, "  {:<8} {}kg", point.label, point.weight)?;
    }

    if let (Some(min), Some(max)) = (series.min(), series.max()) {
        write!(out, "min {}kg  max {}kg", min, max)?;
    }
    match series.change() {
        Some(change) => writeln!(out, "  change {:+.1}kg", change),
        None => writeln!(out),
    }
}

pub fn help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "\
Commands:
  date [YYYY-MM-DD|today|+N|-N]   select a day (no argument shows the selection)
  show [--format text|json]       show the selected day
  open water N                    edit water slot N
  open water-settings             edit water slot count and target
  open meal N                     edit meal slot N
  open meal-settings              edit meal slot count and labels
  open weight                     edit the day's weight
  open exercise                   edit the day's exercise (type,duration)
  set <text...>                   set the main field of the open edit
  time <HH:MM>                    set the meal time
  photo <path> | photo --clear    attach or remove the meal photo
  count <n>                       set the slot count in settings
  target <ml>                     set the daily water target
  labels <a,b,...>                set the meal labels
  save                            commit the open edit
  cancel                          discard the open edit
  done water N | done meal N      toggle completion of a slot
  trend [--format text|json]      weight across all days
  help                            this list
  quit                            leave (an open edit is discarded)"
    )
}
