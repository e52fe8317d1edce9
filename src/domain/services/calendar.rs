use crate::domain::models::slot::TimeSlot;

/// Column layout of the Google Calendar CSV import format.
pub const CSV_HEADERS: [&str; 9] = [
    "Subject",
    "Start Date",
    "Start Time",
    "End Date",
    "End Time",
    "All Day Event",
    "Description",
    "Location",
    "Private",
];

/// Renders the booked slots as a Google-Calendar-importable CSV string.
/// One row per booked slot; unbooked slots are skipped. Deterministic
/// over its input.
pub fn booked_slots_csv(slots: &[TimeSlot]) -> String {
    let mut lines = vec![CSV_HEADERS.join(",")];

    for slot in slots.iter().filter(|s| s.is_booked) {
        let subject = format!(
            "Meeting with {}",
            slot.guest_name.as_deref().unwrap_or("guest")
        );
        let date = slot.date.format("%-m/%-d/%Y").to_string();
        let start = slot.start_time.format("%-I:%M %p").to_string();
        let end = slot.end_time.format("%-I:%M %p").to_string();

        let fields = [
            subject.as_str(),
            date.as_str(),
            start.as_str(),
            date.as_str(),
            end.as_str(),
            "False",
            slot.guest_note.as_deref().unwrap_or(""),
            "",
            "False",
        ];

        let row: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
        lines.push(row.join(","));
    }

    lines.join("\n")
}

/// RFC 4180 quoting: fields containing a comma, quote or newline are
/// wrapped in quotes with embedded quotes doubled.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
