//! Decoded record bodies for the built-in PIM applications.

use std::fmt;

use super::models::PackedDate;

/// A decoded record body, one variant per known creator.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    ToDo(ToDoRecord),
    Memo(MemoRecord),
    Address(AddressRecord),
    DateBook(DateBookRecord),
    /// Body of a database whose creator has no decoder; bytes kept verbatim.
    Unsupported(Vec<u8>),
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::ToDo(r) => r.fmt(f),
            Record::Memo(r) => r.fmt(f),
            Record::Address(r) => r.fmt(f),
            Record::DateBook(r) => r.fmt(f),
            Record::Unsupported(bytes) => write!(f, "<{} raw bytes>", bytes.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToDoRecord {
    pub due: Option<PackedDate>,
    pub done: bool,
    /// 0–7.
    pub priority: u8,
    pub description: String,
    pub note: String,
}

impl fmt::Display for ToDoRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(due) = &self.due {
            write!(f, "{} ", due)?;
        }
        write!(
            f,
            "[{}] P{}: {}",
            if self.done { "x" } else { " " },
            self.priority,
            self.description
        )?;
        if !self.note.is_empty() {
            write!(f, " ({})", self.note)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoRecord {
    pub text: String,
}

impl fmt::Display for MemoRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Address-book fields keyed by resolved name, in field position order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressFields(Vec<(String, String)>);

impl AddressFields {
    /// Insert a field; an existing name keeps its position and takes the new value.
    pub fn insert(&mut self, name: String, value: String) {
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    pub fields: AddressFields,
    /// Name of the phone field shown in list views; empty when that field is
    /// not present in this record.
    pub default_field: String,
}

impl fmt::Display for AddressRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {:?}", name, value)?;
        }
        write!(f, "}} Default: {}", self.default_field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlarmUnit {
    Minutes,
    Hours,
    Days,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alarm {
    /// How many units before the event the alarm fires.
    pub advance: u8,
    pub unit: AlarmUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

/// Which week of the month a monthly-by-day event falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeekOrdinal {
    /// 1-based week number.
    Nth(u8),
    Last,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RepeatKind {
    Daily,
    Weekly {
        days: Vec<Weekday>,
    },
    MonthlyByDay {
        week: Option<WeekOrdinal>,
        day: Option<Weekday>,
    },
    MonthlyByDate,
    Yearly,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepeatRule {
    pub kind: RepeatKind,
    /// `None` repeats forever.
    pub end: Option<PackedDate>,
    /// Repeat every `frequency` units of `kind`.
    pub frequency: u8,
    /// Raw pattern byte (weekday bitmap or ordinal/weekday pair).
    pub pattern: u8,
    pub start_of_week: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateBookRecord {
    pub date: PackedDate,
    /// `None` for all-day events.
    pub time: Option<TimeRange>,
    pub alarm: Option<Alarm>,
    pub repeat: Option<RepeatRule>,
    /// Days on which a repeating event is suppressed.
    pub exceptions: Vec<PackedDate>,
    pub description: String,
    pub note: String,
}

impl DateBookRecord {
    pub fn is_all_day(&self) -> bool {
        self.time.is_none()
    }
}

impl fmt::Display for DateBookRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.date)?;
        match &self.time {
            Some(t) => write!(
                f,
                "{:02}:{:02}-{:02}:{:02}",
                t.start.hour, t.start.minute, t.end.hour, t.end.minute
            )?,
            None => write!(f, "allday")?,
        }
        if let Some(repeat) = &self.repeat {
            write!(f, " repeat {:?}", repeat.kind)?;
            match &repeat.end {
                Some(end) => write!(f, " until {}", end)?,
                None => write!(f, " forever")?,
            }
        }
        write!(f, ": {}", self.description)?;
        if !self.note.is_empty() {
            write!(f, " ({})", self.note)?;
        }
        Ok(())
    }
}
