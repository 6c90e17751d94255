//! Interactive line-oriented shell over one in-memory record store.
//!
//! Every line is parsed by clap into an [`Action`]. Slot numbers typed at
//! the prompt start at 1.

mod input;
mod render;

use healthlog_core::{
    weight_series, Clock, DateKey, DateKeyError, EditSession, EditTarget, FieldDelta,
    MealTracker, RecordStore, SessionError, WaterProgress, WaterTracker,
};
use std::io::{self, BufRead, Write};

use crate::photo::{read_photo, PhotoError};
use input::{Action, DoneTarget, OpenTarget, ShellLine};

/// Whether the shell keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<C: Clock> {
    store: RecordStore,
    session: EditSession,
    selected: DateKey,
    clock: C,
    photo_max_bytes: u64,
}

impl<C: Clock> Shell<C> {
    /// Start on `selected`, or on today when `None`. The starting day is
    /// created in the store right away.
    pub fn new(clock: C, selected: Option<DateKey>, photo_max_bytes: u64) -> Self {
        let selected = selected.unwrap_or_else(|| clock.today());
        let mut store = RecordStore::new();
        store.get(selected);

        Self {
            store,
            session: EditSession::new(),
            selected,
            clock,
            photo_max_bytes,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn selected(&self) -> DateKey {
        self.selected
    }

    #[cfg(test)]
    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// Read commands from `input` until `quit` or end of input.
    ///
    /// Command errors are written to `out` and the loop continues; only
    /// I/O failures end it early.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "healthlog {} - type 'help' for commands",
            env!("CARGO_PKG_VERSION")
        )?;
        writeln!(out, "{}", self.selected.long_label())?;

        let mut lines = input.lines();
        loop {
            self.prompt(out)?;
            let line = match lines.next() {
                Some(line) => line?,
                None => {
                    writeln!(out)?;
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            match self.execute(&line, out) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(ShellError::Io(e)) => return Err(e),
                Err(e) => writeln!(out, "Error: {}", e)?,
            }
        }

        if self.session.cancel() {
            tracing::debug!("Discarded open edit on exit");
        }
        Ok(())
    }

    fn prompt<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self.session.draft() {
            Some(draft) => write!(out, "{} [{}]> ", self.selected, draft.target())?,
            None => write!(out, "{}> ", self.selected)?,
        }
        out.flush()
    }

    /// Run one command line.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow, ShellError> {
        let action = ShellLine::parse_line(line)?.action;
        tracing::debug!("Shell action: {:?}", action);

        match action {
            Action::Date { value } => self.select_date(value.as_deref(), out)?,
            Action::Show { format } => {
                let day = self.store.get(self.selected);
                render::day(out, self.selected, day, &format)?;
            }
            Action::Open { target } => self.open(target, out)?,
            Action::Set { text } => self.edit(FieldDelta::Text(text.join(" ")), out)?,
            Action::Time { value } => self.edit(FieldDelta::Time(value.unwrap_or_default()), out)?,
            Action::Photo { path, clear } => {
                if !self.session.is_open() {
                    return Err(SessionError::NotOpen.into());
                }
                let photo = match (path, clear) {
                    (_, true) => None,
                    (Some(path), false) => Some(read_photo(&path, self.photo_max_bytes)?),
                    (None, false) => {
                        return Err(ShellError::MissingArgument("photo <path> or photo --clear"))
                    }
                };
                self.edit(FieldDelta::Photo(photo), out)?;
            }
            Action::Count { value } => self.edit(FieldDelta::Count(value), out)?,
            Action::Target { value } => self.edit(FieldDelta::Target(value), out)?,
            Action::Labels { labels } => self.edit(FieldDelta::Labels(labels.join(" ")), out)?,
            Action::Save => {
                let committed = self.session.commit(&mut self.store)?;
                if committed.applied {
                    writeln!(out, "Saved {} for {}.", committed.target, committed.date)?;
                } else {
                    writeln!(
                        out,
                        "{} no longer exists on {}; nothing saved.",
                        committed.target, committed.date
                    )?;
                }
            }
            Action::Cancel => {
                if self.session.cancel() {
                    writeln!(out, "Edit discarded.")?;
                } else {
                    writeln!(out, "No edit in progress.")?;
                }
            }
            Action::Done { target } => self.toggle(target, out)?,
            Action::Trend { format } => {
                render::trend(out, &weight_series(&self.store), &format)?;
            }
            Action::Help => render::help(out)?,
            Action::Quit => {
                if self.session.is_open() {
                    writeln!(out, "Discarding open edit.")?;
                }
                return Ok(Flow::Quit);
            }
        }

        Ok(Flow::Continue)
    }

    fn select_date<W: Write>(&mut self, value: Option<&str>, out: &mut W) -> Result<(), ShellError> {
        if let Some(value) = value {
            self.selected = resolve_date(value, self.selected, self.clock.today())?;
            self.store.get(self.selected);
        }
        writeln!(out, "{} ({})", self.selected.long_label(), self.selected)?;
        Ok(())
    }

    fn open<W: Write>(&mut self, target: OpenTarget, out: &mut W) -> Result<(), ShellError> {
        let day = self.store.get(self.selected);
        let target = match target {
            OpenTarget::Water { slot } => EditTarget::Water(slot_index(slot, day.water.count())?),
            OpenTarget::WaterSettings => EditTarget::WaterSettings,
            OpenTarget::Meal { slot } => EditTarget::Meal(slot_index(slot, day.meals.count())?),
            OpenTarget::MealSettings => EditTarget::MealSettings,
            OpenTarget::Weight => EditTarget::Weight,
            OpenTarget::Exercise => EditTarget::Exercise,
        };

        let draft = self.session.open(&self.store, self.selected, target);
        render::draft(out, self.selected, draft)?;
        Ok(())
    }

    fn edit<W: Write>(&mut self, delta: FieldDelta, out: &mut W) -> Result<(), ShellError> {
        let date = self.session.date().ok_or(SessionError::NotOpen)?;
        let draft = self.session.edit(delta)?;
        render::draft(out, date, draft)?;
        Ok(())
    }

    fn toggle<W: Write>(&mut self, target: DoneTarget, out: &mut W) -> Result<(), ShellError> {
        let date = self.selected;
        match target {
            DoneTarget::Water { slot } => {
                let index = slot.checked_sub(1).ok_or(ShellError::InvalidSlot(slot))?;
                if !WaterTracker::new(&mut self.store).toggle_complete(date, index, &self.clock) {
                    return Err(ShellError::InvalidSlot(slot));
                }
                let water = &self.store.get(date).water;
                if let Some(record) = water.slot(index) {
                    writeln!(
                        out,
                        "Water {}: {}  {}",
                        slot,
                        record.toggle_label(),
                        WaterProgress::of(water)
                    )?;
                }
            }
            DoneTarget::Meal { slot } => {
                let index = slot.checked_sub(1).ok_or(ShellError::InvalidSlot(slot))?;
                if !MealTracker::new(&mut self.store).toggle_complete(date, index) {
                    return Err(ShellError::InvalidSlot(slot));
                }
                let meals = &self.store.get(date).meals;
                if let Some(record) = meals.slot(index) {
                    let state = if record.completed { "done" } else { "not done" };
                    writeln!(
                        out,
                        "Meal {} ({}): {}",
                        slot,
                        meals.label(index).unwrap_or_default(),
                        state
                    )?;
                }
            }
        }
        Ok(())
    }
}

/// `today`, a signed day offset from `selected` (`+1`, `-7`), or a date.
fn resolve_date(value: &str, selected: DateKey, today: DateKey) -> Result<DateKey, DateKeyError> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("today") {
        return Ok(today);
    }
    if value.starts_with(['+', '-']) {
        if let Ok(days) = value.parse::<i64>() {
            return selected.offset_days(days);
        }
    }
    DateKey::parse(value)
}

fn slot_index(slot: usize, count: usize) -> Result<usize, ShellError> {
    if slot == 0 || slot > count {
        return Err(ShellError::InvalidSlot(slot));
    }
    Ok(slot - 1)
}

#[derive(Debug)]
pub enum ShellError {
    Usage(clap::Error),
    Session(SessionError),
    Date(DateKeyError),
    Photo(PhotoError),
    InvalidSlot(usize),
    MissingArgument(&'static str),
    Io(io::Error),
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::Usage(e) => {
                let message = e.to_string();
                let message = message.trim_end();
                write!(f, "{}", message.strip_prefix("error: ").unwrap_or(message))
            }
            ShellError::Session(e) => write!(f, "{}", e),
            ShellError::Date(e) => write!(f, "{}", e),
            ShellError::Photo(e) => write!(f, "{}", e),
            ShellError::InvalidSlot(slot) => write!(f, "No slot {} on this day", slot),
            ShellError::MissingArgument(usage) => write!(f, "Usage: {}", usage),
            ShellError::Io(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ShellError {}

impl From<clap::Error> for ShellError {
    fn from(e: clap::Error) -> Self {
        ShellError::Usage(e)
    }
}

impl From<SessionError> for ShellError {
    fn from(e: SessionError) -> Self {
        ShellError::Session(e)
    }
}

impl From<DateKeyError> for ShellError {
    fn from(e: DateKeyError) -> Self {
        ShellError::Date(e)
    }
}

impl From<PhotoError> for ShellError {
    fn from(e: PhotoError) -> Self {
        ShellError::Photo(e)
    }
}

impl From<io::Error> for ShellError {
    fn from(e: io::Error) -> Self {
        ShellError::Io(e)
    }
}
