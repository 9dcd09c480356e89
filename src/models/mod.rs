//! Data models for the clinic scheduling server

pub mod availability;
pub mod booking;
pub mod schedule;

// Re-export commonly used types
pub use availability::{ScheduleGridView, SlotPicker};
pub use booking::{Booking, BookingStatus, CreateBooking, DoctorSummary};
pub use schedule::{DailyOverride, Owner, WeeklyTemplateEntry};
