//! Date Book records (creator `date`).
//!
//! # Record Structure
//! ```text
//! [0..4] start hour, start minute, end hour, end minute (0xFF hour = all day)
//! [4..6] start date, packed
//! [6..8] flags: bit 1 alarm, 2 repeat, 3 note, 4 exceptions, 5 description
//! then, each only when its flag is set:
//! [2 bytes]      alarm: advance, unit
//! [8 bytes]      repeat: type, -, end date (0xFFFF = forever), frequency,
//!                pattern, start of week, -
//! [2 + 2N bytes] exceptions: count, N packed dates
//! description\0 note\0
//! ```

use log::trace;

use super::{RecordContext, RecordFormat};
use crate::pdb::bits::BitReader;
use crate::pdb::types::{
    error::{PdbError, Result},
    models::PackedDate,
    records::{
        Alarm, AlarmUnit, DateBookRecord, RepeatKind, RepeatRule, TimeOfDay, TimeRange,
        WeekOrdinal, Weekday,
    },
};
use crate::pdb::utils;

const ALL_DAY: u8 = 0xFF;
const REPEAT_FOREVER: u16 = 0xFFFF;

const FLAG_ALARM: usize = 1;
const FLAG_REPEAT: usize = 2;
const FLAG_NOTE: usize = 3;
const FLAG_EXCEPTIONS: usize = 4;
const FLAG_DESCRIPTION: usize = 5;

/// Weekday for each bit of a repeat pattern byte; bit 0 is unused.
const WEEKDAY_BITS: [(usize, Weekday); 7] = [
    (7, Weekday::Sun),
    (6, Weekday::Mon),
    (5, Weekday::Tue),
    (4, Weekday::Wed),
    (3, Weekday::Thu),
    (2, Weekday::Fri),
    (1, Weekday::Sat),
];

/// Zero-cost marker struct for Date Book records.
#[derive(Debug)]
pub struct DateBook;

impl RecordFormat for DateBook {
    const DEBUG_NAME: &'static str = "DateBook";
    type Record = DateBookRecord;

    fn decode(bytes: &[u8], ctx: &RecordContext<'_>) -> Result<DateBookRecord> {
        let fixed = utils::take(bytes, 0, 8, "datebook record")?;
        let reader = BitReader::new(fixed);

        let time = if reader.u8_at(0)? == ALL_DAY {
            None
        } else {
            Some(TimeRange {
                start: TimeOfDay {
                    hour: reader.u8_at(0)?,
                    minute: reader.u8_at(1)?,
                },
                end: TimeOfDay {
                    hour: reader.u8_at(2)?,
                    minute: reader.u8_at(3)?,
                },
            })
        };
        let date = PackedDate::decode(&fixed[4..6])?;
        let flags = reader.sub(6, 2)?;

        let mut cursor = 8;

        let alarm = if flags.bit(FLAG_ALARM)? {
            let raw = utils::take(bytes, cursor, 2, "datebook alarm")?;
            cursor += 2;
            Some(parse_alarm(BitReader::new(raw))?)
        } else {
            None
        };

        let repeat = if flags.bit(FLAG_REPEAT)? {
            let raw = utils::take(bytes, cursor, 8, "datebook repeat")?;
            cursor += 8;
            Some(parse_repeat(BitReader::new(raw))?)
        } else {
            None
        };

        let mut exceptions = Vec::new();
        if flags.bit(FLAG_EXCEPTIONS)? {
            let count = BitReader::new(utils::take(bytes, cursor, 2, "datebook exceptions")?)
                .u16_at(0)? as usize;
            cursor += 2;
            let raw = utils::take(bytes, cursor, count * 2, "datebook exceptions")?;
            cursor += count * 2;
            for date in raw.chunks_exact(2) {
                exceptions.push(PackedDate::decode(date)?);
            }
        }

        let mut text = &bytes[cursor..];
        let description = if flags.bit(FLAG_DESCRIPTION)? {
            utils::decode_text(utils::read_cstr(&mut text, "datebook description")?, ctx.encoding)
        } else {
            String::new()
        };
        let note = if flags.bit(FLAG_NOTE)? {
            utils::decode_text(utils::read_cstr(&mut text, "datebook note")?, ctx.encoding)
        } else {
            String::new()
        };

        trace!(
            "DateBook {}: alarm={}, repeat={}, {} exceptions",
            date,
            alarm.is_some(),
            repeat.is_some(),
            exceptions.len()
        );

        Ok(DateBookRecord {
            date,
            time,
            alarm,
            repeat,
            exceptions,
            description,
            note,
        })
    }
}

fn parse_alarm(reader: BitReader<'_>) -> Result<Alarm> {
    let advance = reader.u8_at(0)?;
    let unit = match reader.u8_at(1)? {
        0 => AlarmUnit::Minutes,
        1 => AlarmUnit::Hours,
        2 => AlarmUnit::Days,
        other => {
            return Err(PdbError::UnknownEnumValue {
                field: "alarm unit",
                value: u32::from(other),
            });
        }
    };
    Ok(Alarm { advance, unit })
}

fn parse_repeat(reader: BitReader<'_>) -> Result<RepeatRule> {
    let type_code = reader.u8_at(0)?;
    let end = match reader.u16_at(2)? {
        REPEAT_FOREVER => None,
        _ => Some(PackedDate::decode(reader.sub(2, 2)?.bytes())?),
    };
    let frequency = reader.u8_at(4)?;
    let pattern = reader.u8_at(5)?;
    let start_of_week = reader.u8_at(6)?;
    let pattern_bits = reader.sub(5, 1)?;

    let kind = match type_code {
        1 => RepeatKind::Daily,
        2 => {
            let mut days = Vec::new();
            for (index, day) in WEEKDAY_BITS {
                if pattern_bits.bit(index)? {
                    days.push(day);
                }
            }
            RepeatKind::Weekly { days }
        }
        3 => {
            let week = match pattern_bits.uint(0, 3)? {
                5 => Some(WeekOrdinal::Last),
                n @ 0..=4 => Some(WeekOrdinal::Nth(n as u8 + 1)),
                _ => None,
            };
            let index = pattern_bits.uint(3, 8)? as usize;
            let day = WEEKDAY_BITS
                .iter()
                .find(|(bit, _)| *bit == index)
                .map(|(_, day)| *day);
            RepeatKind::MonthlyByDay { week, day }
        }
        4 => RepeatKind::MonthlyByDate,
        5 => RepeatKind::Yearly,
        other => {
            return Err(PdbError::UnknownEnumValue {
                field: "repeat type",
                value: u32::from(other),
            });
        }
    };

    Ok(RepeatRule {
        kind,
        end,
        frequency,
        pattern,
        start_of_week,
    })
}
