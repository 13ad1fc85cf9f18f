//! Builders for synthetic Palm database buffers.
#![allow(dead_code)]

/// Encode a packed date: 7 bits year-1904, 4 bits month, 5 bits day.
pub fn packed_date(year: u16, month: u8, day: u8) -> [u8; 2] {
    let raw = ((year - 1904) << 9) | (u16::from(month) << 5) | u16::from(day);
    raw.to_be_bytes()
}

/// 16-byte NUL-padded name slot.
pub fn name_slot(name: &str) -> [u8; 16] {
    let mut slot = [0u8; 16];
    slot[..name.len()].copy_from_slice(name.as_bytes());
    slot
}

/// Standard appinfo block: rename bits, 16 category names, ids and last id.
pub fn category_appinfo(names: &[&str]) -> Vec<u8> {
    let mut block = vec![0u8; 2];
    for slot in 0..16 {
        let name = names.get(slot).copied().unwrap_or("");
        block.extend_from_slice(&name_slot(name));
    }
    block.extend_from_slice(&[0u8; 24]);
    block
}

/// Address book appinfo: categories followed by 22 field labels.
pub fn address_appinfo(categories: &[&str], labels: &[&str]) -> Vec<u8> {
    let mut block = category_appinfo(categories);
    assert_eq!(block.len(), 282);
    for label in labels {
        block.extend_from_slice(&name_slot(label));
    }
    // country + sort-by-company
    block.extend_from_slice(&[0u8; 4]);
    block
}

pub fn todo_body(due: Option<(u16, u8, u8)>, done: bool, priority: u8, description: &str, note: &str) -> Vec<u8> {
    let mut body = match due {
        Some((y, m, d)) => packed_date(y, m, d).to_vec(),
        None => vec![0xFF, 0xFF],
    };
    body.push(((done as u8) << 7) | (priority & 0x07));
    body.extend_from_slice(description.as_bytes());
    body.push(0);
    body.extend_from_slice(note.as_bytes());
    body.push(0);
    body
}

pub fn memo_body(text: &str) -> Vec<u8> {
    let mut body = text.as_bytes().to_vec();
    body.push(0);
    body
}

/// Address record with display phone selector, Phone1..Phone5 label codes and
/// `(field index, value)` pairs in ascending field order.
pub fn address_body(display: u8, phone_labels: [u8; 5], fields: &[(usize, &str)]) -> Vec<u8> {
    let mut custom = u32::from(display) << 20;
    for (phone, code) in phone_labels.iter().enumerate() {
        custom |= u32::from(*code) << (phone * 4);
    }
    let mut present = 0u32;
    for (field, _) in fields {
        present |= 1 << field;
    }
    let mut body = custom.to_be_bytes().to_vec();
    body.extend_from_slice(&present.to_be_bytes());
    body.push(0);
    for (_, value) in fields {
        body.extend_from_slice(value.as_bytes());
        body.push(0);
    }
    body
}

#[derive(Debug, Clone, Default)]
pub struct Repeat {
    pub kind: u8,
    pub end: Option<(u16, u8, u8)>,
    pub frequency: u8,
    pub pattern: u8,
    pub start_of_week: u8,
}

#[derive(Debug, Clone)]
pub struct Event {
    pub time: Option<[u8; 4]>,
    pub date: (u16, u8, u8),
    pub alarm: Option<(u8, u8)>,
    pub repeat: Option<Repeat>,
    pub exceptions: Vec<(u16, u8, u8)>,
    pub description: Option<&'static str>,
    pub note: Option<&'static str>,
}

impl Default for Event {
    fn default() -> Self {
        Self {
            time: Some([9, 30, 10, 45]),
            date: (2004, 3, 15),
            alarm: None,
            repeat: None,
            exceptions: Vec::new(),
            description: Some("Meeting"),
            note: None,
        }
    }
}

impl Event {
    pub fn encode(&self) -> Vec<u8> {
        let mut body = match self.time {
            Some(t) => t.to_vec(),
            None => vec![0xFF, 0xFF, 0xFF, 0xFF],
        };
        let (y, m, d) = self.date;
        body.extend_from_slice(&packed_date(y, m, d));

        let mut flags = 0u16;
        if self.alarm.is_some() {
            flags |= 1 << 14;
        }
        if self.repeat.is_some() {
            flags |= 1 << 13;
        }
        if self.note.is_some() {
            flags |= 1 << 12;
        }
        if !self.exceptions.is_empty() {
            flags |= 1 << 11;
        }
        if self.description.is_some() {
            flags |= 1 << 10;
        }
        body.extend_from_slice(&flags.to_be_bytes());

        if let Some((advance, unit)) = self.alarm {
            body.push(advance);
            body.push(unit);
        }
        if let Some(repeat) = &self.repeat {
            body.push(repeat.kind);
            body.push(0);
            match repeat.end {
                Some((y, m, d)) => body.extend_from_slice(&packed_date(y, m, d)),
                None => body.extend_from_slice(&[0xFF, 0xFF]),
            }
            body.push(repeat.frequency);
            body.push(repeat.pattern);
            body.push(repeat.start_of_week);
            body.push(0);
        }
        if !self.exceptions.is_empty() {
            body.extend_from_slice(&(self.exceptions.len() as u16).to_be_bytes());
            for (y, m, d) in &self.exceptions {
                body.extend_from_slice(&packed_date(*y, *m, *d));
            }
        }
        if let Some(description) = self.description {
            body.extend_from_slice(description.as_bytes());
            body.push(0);
        }
        if let Some(note) = self.note {
            body.extend_from_slice(note.as_bytes());
            body.push(0);
        }
        body
    }
}

/// Assembles a complete database buffer.
///
/// Layout: header, record index at byte 78, two pad bytes, appinfo,
/// sortinfo, record bodies.
#[derive(Debug, Clone)]
pub struct PdbBuilder {
    pub name: Vec<u8>,
    pub attributes: u16,
    pub version: u16,
    pub created: u32,
    pub modified: u32,
    pub backed_up: u32,
    pub modification_number: u32,
    pub type_code: [u8; 4],
    pub creator: [u8; 4],
    pub unique_id_seed: u32,
    pub appinfo: Option<Vec<u8>>,
    pub sortinfo: Option<Vec<u8>>,
    pub records: Vec<(u8, Vec<u8>)>,
}

impl PdbBuilder {
    pub fn new(creator: &[u8; 4]) -> Self {
        Self {
            name: b"TestDB".to_vec(),
            attributes: 0,
            version: 0,
            created: 0,
            modified: 0,
            backed_up: 0,
            modification_number: 0,
            type_code: *b"DATA",
            creator: *creator,
            unique_id_seed: 0,
            appinfo: None,
            sortinfo: None,
            records: Vec::new(),
        }
    }

    pub fn appinfo(mut self, block: Vec<u8>) -> Self {
        self.appinfo = Some(block);
        self
    }

    pub fn sortinfo(mut self, block: Vec<u8>) -> Self {
        self.sortinfo = Some(block);
        self
    }

    /// Add a record with the given attribute byte.
    pub fn record(mut self, attributes: u8, body: Vec<u8>) -> Self {
        self.records.push((attributes, body));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let count = self.records.len();
        let index_end = 78 + count * 8;
        let mut cursor = index_end.max(80) + if count > 0 { 2 } else { 0 };

        let appinfo_offset = self.appinfo.as_ref().map(|block| {
            let offset = cursor;
            cursor += block.len();
            offset
        });
        let sortinfo_offset = self.sortinfo.as_ref().map(|block| {
            let offset = cursor;
            cursor += block.len();
            offset
        });
        let mut record_offsets = Vec::with_capacity(count);
        for (_, body) in &self.records {
            record_offsets.push(cursor);
            cursor += body.len();
        }

        let mut buf = vec![0u8; 78];
        let name_len = self.name.len().min(32);
        buf[..name_len].copy_from_slice(&self.name[..name_len]);
        buf[32..34].copy_from_slice(&self.attributes.to_be_bytes());
        buf[34..36].copy_from_slice(&self.version.to_be_bytes());
        buf[36..40].copy_from_slice(&self.created.to_be_bytes());
        buf[40..44].copy_from_slice(&self.modified.to_be_bytes());
        buf[44..48].copy_from_slice(&self.backed_up.to_be_bytes());
        buf[48..52].copy_from_slice(&self.modification_number.to_be_bytes());
        buf[52..56].copy_from_slice(&(appinfo_offset.unwrap_or(0) as u32).to_be_bytes());
        buf[56..60].copy_from_slice(&(sortinfo_offset.unwrap_or(0) as u32).to_be_bytes());
        buf[60..64].copy_from_slice(&self.type_code);
        buf[64..68].copy_from_slice(&self.creator);
        buf[68..72].copy_from_slice(&self.unique_id_seed.to_be_bytes());
        buf[76..78].copy_from_slice(&(count as u16).to_be_bytes());

        for ((attributes, _), offset) in self.records.iter().zip(&record_offsets) {
            buf.extend_from_slice(&(*offset as u32).to_be_bytes());
            buf.push(*attributes);
            buf.extend_from_slice(&[0, 0, 0]);
        }
        // Two bytes of padding after the index; for an empty database these
        // are also the record list offset field.
        buf.extend_from_slice(&[0, 0]);

        if let Some(block) = &self.appinfo {
            buf.extend_from_slice(block);
        }
        if let Some(block) = &self.sortinfo {
            buf.extend_from_slice(block);
        }
        for (_, body) in &self.records {
            buf.extend_from_slice(body);
        }
        buf
    }
}
