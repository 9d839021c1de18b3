use chrono::{DateTime, Utc};

use super::entry::CalendarEntry;

const PRODUCT_ID: &str = "-//club_calendar//EN";
const MAX_LINE_OCTETS: usize = 75;

/// Renders entries as an iCalendar document
pub fn write_calendar(name: &str, entries: &[CalendarEntry], stamp: DateTime<Utc>) -> String {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{PRODUCT_ID}"),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
        format!("X-WR-CALNAME:{}", escape_text(name)),
    ];

    for entry in entries {
        write_event(&mut lines, entry, stamp);
    }

    lines.push("END:VCALENDAR".to_string());

    let mut out = String::new();
    for line in &lines {
        out.push_str(&fold_line(line));
        out.push_str("\r\n");
    }
    out
}

fn write_event(lines: &mut Vec<String>, entry: &CalendarEntry, stamp: DateTime<Utc>) {
    lines.push("BEGIN:VEVENT".to_string());
    lines.push(format!("UID:{}", entry.uid));
    lines.push(format!("DTSTAMP:{}", format_instant(stamp)));
    lines.push(format!("DTSTART:{}", format_instant(entry.start)));
    lines.push(format!("DTEND:{}", format_instant(entry.end)));
    lines.push(format!("SUMMARY:{}", escape_text(&entry.summary)));
    lines.push(format!("DESCRIPTION:{}", escape_text(&entry.description)));
    if let Some(geo) = entry.geo {
        lines.push(format!("GEO:{};{}", geo.lat, geo.lng));
    }
    if let Some(location) = &entry.location {
        lines.push(format!("LOCATION:{}", escape_text(location)));
    }
    lines.push(format!("CLASS:{}", entry.class.as_str()));
    lines.push(format!("URL:{}", entry.url));
    lines.push("END:VEVENT".to_string());
}

fn format_instant(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

fn escape_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace("\r\n", "\\n")
        .replace('\n', "\\n")
}

// Continuation lines start with a single space
fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut folded = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut width = 0;
    for ch in line.chars() {
        let len = ch.len_utf8();
        if width + len > MAX_LINE_OCTETS {
            folded.push_str("\r\n ");
            width = 1;
        }
        folded.push(ch);
        width += len;
    }
    folded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::entry::EntryClass;
    use crate::domain::Coordinate;
    use chrono::TimeZone;

    fn entry() -> CalendarEntry {
        CalendarEntry {
            uid: "https://whyjustrun.ca/events/view/5".to_string(),
            url: "https://whyjustrun.ca/events/view/5".to_string(),
            summary: "Sprint, Middle; Long".to_string(),
            description: "Line one\nLine two".to_string(),
            start: Utc.with_ymd_and_hms(2024, 4, 20, 14, 30, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 4, 20, 16, 0, 0).unwrap(),
            geo: Some(Coordinate::new(45.5, -75.25)),
            location: Some("45.5,-75.25".to_string()),
            class: EntryClass::Public,
        }
    }

    #[test]
    fn test_write_calendar() {
        let stamp = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        let ics = write_calendar("Ottawa Orienteering Club", &[entry()], stamp);
        let lines: Vec<&str> = ics.split("\r\n").collect();

        assert_eq!(lines[0], "BEGIN:VCALENDAR");
        assert!(lines.contains(&"X-WR-CALNAME:Ottawa Orienteering Club"));
        assert!(lines.contains(&"DTSTART:20240420T143000Z"));
        assert!(lines.contains(&"DTEND:20240420T160000Z"));
        assert!(lines.contains(&"DTSTAMP:20240401T000000Z"));
        assert!(lines.contains(&"SUMMARY:Sprint\\, Middle\\; Long"));
        assert!(lines.contains(&"DESCRIPTION:Line one\\nLine two"));
        assert!(lines.contains(&"GEO:45.5;-75.25"));
        assert!(lines.contains(&"LOCATION:45.5\\,-75.25"));
        assert!(lines.contains(&"CLASS:PUBLIC"));
        assert!(lines.contains(&"UID:https://whyjustrun.ca/events/view/5"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
    }

    #[test]
    fn test_long_lines_are_folded() {
        let line = format!("DESCRIPTION:{}", "é".repeat(60));
        let folded = fold_line(&line);

        for part in folded.split("\r\n") {
            assert!(part.len() <= MAX_LINE_OCTETS, "{} octets", part.len());
        }
        assert_eq!(folded.replace("\r\n ", ""), line);
    }

    #[test]
    fn test_empty_calendar() {
        let stamp = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        let ics = write_calendar("Empty", &[], stamp);
        assert!(!ics.contains("BEGIN:VEVENT"));
    }
}
