/// HTTP health endpoints
pub mod health;
/// Timetable API wire model and itinerary parsing
pub mod itinerary;
/// Monthly reminder job
pub mod reminder;
/// Schedule fetching and formatting
pub mod schedule;
/// Time-expiring schedule cache
pub mod schedule_cache;
