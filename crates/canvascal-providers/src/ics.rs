//! iCalendar encoding backed by the `icalendar` crate.
//!
//! Records carry local wall-clock components, so DTSTART/DTEND are written
//! as floating date-times (no `Z`, no `TZID`).

use icalendar::{Calendar, Component, EventLike};
use tracing::debug;

use canvascal_core::{CalendarEncoder, DateArray, EncodeError, IcsRecord};

/// Format for floating iCalendar date-times.
const FLOATING_FORMAT: &str = "%Y%m%dT%H%M%S";

/// A [`CalendarEncoder`] producing RFC 5545 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct IcalendarEncoder;

impl IcalendarEncoder {
    /// Creates a new encoder.
    pub fn new() -> Self {
        Self
    }
}

impl CalendarEncoder for IcalendarEncoder {
    fn encode(&self, records: &[IcsRecord]) -> Result<String, EncodeError> {
        let first = records
            .first()
            .ok_or_else(|| EncodeError::new("No events provided"))?;

        let mut cal = Calendar::new();
        cal.name(&first.cal_name);

        for record in records {
            let mut event = icalendar::Event::new();
            event.summary(&record.title);
            event.description(&record.description);
            if let Some(ref location) = record.location {
                event.location(location);
            }
            event.add_property("DTSTART", floating(&record.start)?);
            event.add_property("DTEND", floating(&record.end)?);
            cal.push(event.done());
        }

        let cal = cal.done();
        let output = set_product_id(&cal.to_string(), &first.product_id);

        debug!(events = records.len(), bytes = output.len(), "Encoded calendar");
        Ok(output)
    }
}

fn floating(arr: &DateArray) -> Result<String, EncodeError> {
    arr.to_naive()
        .map(|naive| naive.format(FLOATING_FORMAT).to_string())
        .ok_or_else(|| EncodeError::new(format!("invalid date {:?}", arr)))
}

/// Replaces the crate's default PRODID with ours.
fn set_product_id(ics: &str, product_id: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(product_id);
        } else {
            result.push_str(line);
        }
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvascal_core::export::build_records_in;
    use canvascal_core::{CanvasEvent, ICS_PRODUCT_ID};
    use chrono::{NaiveDate, TimeZone, Utc};
    use icalendar::{CalendarComponent, CalendarDateTime, DatePerhapsTime};

    fn test_event(id: &str, hour: u32) -> CanvasEvent {
        CanvasEvent::new(
            id,
            "Test Event",
            "TEST 101",
            Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, hour + 1, 0, 0).unwrap(),
        )
        .unwrap()
        .with_description("This is a test event.")
        .with_location("Test Location")
    }

    fn parsed_events(ics: &str) -> Vec<icalendar::Event> {
        let calendar = ics.parse::<Calendar>().unwrap();
        calendar
            .iter()
            .filter_map(|component| match component {
                CalendarComponent::Event(event) => Some(event.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = IcalendarEncoder::new().encode(&[]).unwrap_err();
        assert_eq!(err.message(), "No events provided");
    }

    #[test]
    fn encodes_single_record() {
        let records = build_records_in(&[test_event("1", 10)], &Utc);
        let ics = IcalendarEncoder::new().encode(&records).unwrap();

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.contains("DTSTART:20240101T100000\r\n"));
        assert!(ics.contains("DTEND:20240101T110000\r\n"));
        assert!(ics.contains("Canvas Calendar Export"));

        let events = parsed_events(&ics);
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.get_summary(), Some("TEST 101: Test Event"));
        assert_eq!(event.get_location(), Some("Test Location"));
        assert!(
            event
                .get_description()
                .unwrap()
                .contains("This is a test event.")
        );
        assert_eq!(
            event.get_start(),
            Some(DatePerhapsTime::DateTime(CalendarDateTime::Floating(
                NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .and_hms_opt(10, 0, 0)
                    .unwrap()
            )))
        );
    }

    #[test]
    fn product_id_is_replaced() {
        let records = build_records_in(&[test_event("1", 10)], &Utc);
        let ics = IcalendarEncoder::new().encode(&records).unwrap();

        assert!(ics.contains(&format!("PRODID:{}\r\n", ICS_PRODUCT_ID)));
        assert_eq!(ics.matches("PRODID:").count(), 1);
    }

    #[test]
    fn one_vevent_per_record() {
        let records = build_records_in(&[test_event("1", 10), test_event("2", 14)], &Utc);
        let ics = IcalendarEncoder::new().encode(&records).unwrap();

        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        assert_eq!(parsed_events(&ics).len(), 2);
    }

    #[test]
    fn missing_location_is_omitted() {
        let mut event = test_event("1", 10);
        event.location = None;
        let records = build_records_in(&[event], &Utc);
        let ics = IcalendarEncoder::new().encode(&records).unwrap();

        assert!(!ics.contains("LOCATION"));
    }

    #[test]
    fn invalid_components_are_rejected() {
        let mut records = build_records_in(&[test_event("1", 10)], &Utc);
        records[0].start = DateArray(2023, 2, 29, 10, 0);

        assert!(IcalendarEncoder::new().encode(&records).is_err());
    }
}
