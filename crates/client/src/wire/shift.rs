//! Work shift records (`/calamviec`).

use atelier_core::shift::{ShiftTime, ShiftWindow, WorkShift};
use atelier_shared::types::WorkShiftId;
use serde::{Deserialize, Serialize};

use super::keys::KeySpelling;
use super::value::{Extra, keep_or_write_text, opt_id};
use super::{WireRecord, required};
use crate::{ClientResult, Endpoint};

/// A `calamviec` row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkShiftRecord {
    /// Id.
    #[serde(rename = "macalamviec", alias = "ma_ca_lam_viec", with = "opt_id", default)]
    pub id: Option<i64>,
    /// Shift name.
    #[serde(rename = "tenca", alias = "ten_ca", default)]
    pub name: Option<String>,
    /// Start time, raw (`HH:MM` or `HH:MM:SS`).
    #[serde(rename = "giobatdau", alias = "gio_bat_dau", default)]
    pub start: Option<String>,
    /// End time, raw.
    #[serde(rename = "gioketthuc", alias = "gio_ket_thuc", default)]
    pub end: Option<String>,
    /// Description.
    #[serde(rename = "mota", alias = "mo_ta", default)]
    pub description: Option<String>,
    /// Unknown fields.
    #[serde(flatten)]
    pub extra: Extra,
}

impl KeySpelling for WorkShiftRecord {
    const SNAKE_KEYS: &'static [(&'static str, &'static str)] = &[
        ("macalamviec", "ma_ca_lam_viec"),
        ("tenca", "ten_ca"),
        ("giobatdau", "gio_bat_dau"),
        ("gioketthuc", "gio_ket_thuc"),
        ("mota", "mo_ta"),
    ];
}

fn keep_or_write_time(raw: &mut Option<String>, value: ShiftTime) {
    let current = raw.as_deref().and_then(|r| r.parse::<ShiftTime>().ok());
    if current != Some(value) {
        *raw = Some(format!("{value}:00"));
    }
}

impl WorkShiftRecord {
    /// Body for creating a shift.
    #[must_use]
    pub fn from_parts(name: &str, window: ShiftWindow, description: Option<&str>) -> Self {
        let mut record = Self::default();
        record.write_parts(name, window, description);
        record
    }

    fn write_parts(&mut self, name: &str, window: ShiftWindow, description: Option<&str>) {
        keep_or_write_text(&mut self.name, Some(name.trim()));
        keep_or_write_time(&mut self.start, window.start);
        keep_or_write_time(&mut self.end, window.end);
        keep_or_write_text(&mut self.description, description);
    }
}

impl WireRecord for WorkShiftRecord {
    type Domain = WorkShift;
    const ENDPOINT: Endpoint = Endpoint::WorkShifts;

    fn key(&self) -> Option<i64> {
        self.id
    }

    fn to_domain(&self) -> ClientResult<WorkShift> {
        Ok(WorkShift {
            id: WorkShiftId(required(self.id, "calamviec", "macalamviec")?),
            name: self.name.clone().unwrap_or_default(),
            start: required(self.start.as_deref(), "calamviec", "giobatdau")?.parse()?,
            end: required(self.end.as_deref(), "calamviec", "gioketthuc")?.parse()?,
            description: self.description.clone(),
        })
    }

    fn from_domain(shift: &WorkShift) -> Self {
        let mut record = Self::default();
        record.apply(shift);
        record
    }

    fn apply(&mut self, shift: &WorkShift) {
        self.id = Some(shift.id.0);
        self.write_parts(&shift.name, shift.window(), shift.description.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{Keyed, Loaded};
    use serde_json::json;

    #[test]
    fn test_shift_round_trip_keeps_seconds() {
        let raw = json!({
            "macalamviec": 1,
            "tenca": "Ca sáng",
            "giobatdau": "08:00:00",
            "gioketthuc": "12:00:00",
            "mota": null
        });
        let record: Keyed<WorkShiftRecord> = serde_json::from_value(raw.clone()).unwrap();
        let loaded = Loaded::new(record).unwrap();
        assert_eq!(loaded.domain.start.minutes(), 480);
        assert_eq!(serde_json::to_value(loaded.updated(&loaded.domain)).unwrap(), raw);
    }

    #[test]
    fn test_new_shift_body() {
        let window = ShiftWindow::parse("13:30", "17:00").unwrap();
        let body = serde_json::to_value(WorkShiftRecord::from_parts("Ca chiều", window, None))
            .unwrap();
        assert_eq!(body["giobatdau"], "13:30:00");
        assert_eq!(body["gioketthuc"], "17:00:00");
        assert_eq!(body["tenca"], "Ca chiều");
    }

    #[test]
    fn test_bad_time_is_shift_error() {
        let record: WorkShiftRecord = serde_json::from_value(json!({
            "macalamviec": 1,
            "tenca": "Ca lỗi",
            "giobatdau": "25:00",
            "gioketthuc": "26:00"
        }))
        .unwrap();
        assert!(matches!(record.to_domain(), Err(crate::ClientError::Shift(_))));
    }
}
