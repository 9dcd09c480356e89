//! Lookup of slots held by non-cancelled bookings

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, NaiveTime};
use tracing::warn;

use crate::models::booking::Booking;

/// Bookings per (date, time). Within one key there is at most one booking
/// per doctor; different doctors may share a key in clinic-wide views.
#[derive(Debug, Clone, Default)]
pub struct OccupancyIndex {
    slots: HashMap<(NaiveDate, NaiveTime), BTreeMap<i32, Booking>>,
}

impl OccupancyIndex {
    /// Index all bookings except cancelled ones.
    ///
    /// Duplicate live bookings of one doctor for one slot violate data
    /// integrity; the later one in input order wins and a warning is logged.
    pub fn build(bookings: impl IntoIterator<Item = Booking>) -> Self {
        let mut slots: HashMap<(NaiveDate, NaiveTime), BTreeMap<i32, Booking>> = HashMap::new();

        for booking in bookings {
            if !booking.status.holds_slot() {
                continue;
            }
            let key = (booking.date, booking.time);
            let doctor_id = booking.doctor_id;
            let new_id = booking.id;
            if let Some(previous) = slots.entry(key).or_default().insert(doctor_id, booking) {
                warn!(
                    doctor_id,
                    date = %key.0,
                    time = %key.1,
                    kept = new_id,
                    dropped = previous.id,
                    "Duplicate live bookings for one slot"
                );
            }
        }

        Self { slots }
    }

    /// First occupant of a slot (the only one in single-doctor views)
    pub fn occupant(&self, date: NaiveDate, time: NaiveTime) -> Option<&Booking> {
        self.slots
            .get(&(date, time))
            .and_then(|by_doctor| by_doctor.values().next())
    }

    /// All occupants of a slot, ordered by doctor id
    pub fn occupants(&self, date: NaiveDate, time: NaiveTime) -> Vec<&Booking> {
        self.slots
            .get(&(date, time))
            .map(|by_doctor| by_doctor.values().collect())
            .unwrap_or_default()
    }

    pub fn is_occupied(&self, date: NaiveDate, time: NaiveTime) -> bool {
        self.slots.contains_key(&(date, time))
    }

    /// Number of live bookings indexed
    pub fn len(&self) -> usize {
        self.slots.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
