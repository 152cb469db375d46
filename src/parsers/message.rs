/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: Apache-2.0 OR MIT
 */

use mail_parser::{DateTime, HeaderName, MessageParser};

use crate::{ParsedMessage, ZERO_TIMESTAMP};

use super::address::parse_address_list;

const RECIPIENT_HEADERS: [&str; 3] = ["To", "Cc", "Bcc"];

impl ParsedMessage {
    /// Parses the header section of a raw message.
    ///
    /// Returns `None` when the input does not start with a well formed header
    /// section. Malformed address and date fields do not fail the parse, they
    /// are reported as an empty address list and [`ZERO_TIMESTAMP`]
    /// respectively. When a field is repeated, its first occurrence is used.
    pub fn parse(raw_message: &[u8]) -> Option<ParsedMessage> {
        if !is_header_section(raw_message) {
            return None;
        }

        let message = MessageParser::new()
            .with_minimal_headers()
            .parse_headers(raw_message)?;

        if message.headers().is_empty() {
            return None;
        }

        let recipients = message
            .headers_raw()
            .filter(|(name, _)| {
                RECIPIENT_HEADERS
                    .iter()
                    .any(|header| header.eq_ignore_ascii_case(name))
            })
            .collect::<Vec<_>>();
        let address_list = |header: &str| {
            recipients
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(header))
                .and_then(|(_, value)| parse_address_list(value))
                .unwrap_or_default()
        };

        let parsed = Some(ParsedMessage {
            to: address_list("To"),
            cc: address_list("Cc"),
            bcc: address_list("Bcc"),
            raw_recipients: recipients
                .iter()
                .map(|(_, value)| value.trim())
                .collect::<Vec<_>>()
                .join("\n"),
            date: message
                .header_values(HeaderName::Date)
                .next()
                .and_then(|value| value.as_datetime())
                .filter(|date| is_calendar_date(date))
                .map_or(ZERO_TIMESTAMP, DateTime::to_timestamp),
        });
        parsed
    }

    /// Iterates over the addresses of the To, Cc and Bcc fields, in that order.
    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.to
            .iter()
            .chain(self.cc.iter())
            .chain(self.bcc.iter())
            .map(String::as_str)
    }
}

impl Default for ParsedMessage {
    fn default() -> Self {
        ParsedMessage {
            to: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
            raw_recipients: String::new(),
            date: ZERO_TIMESTAMP,
        }
    }
}

/// Checks that every line before the first empty line is either a
/// `name: value` field or the continuation of one.
fn is_header_section(raw_message: &[u8]) -> bool {
    let mut has_fields = false;

    for line in raw_message.split(|&ch| ch == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        match line {
            [] => break,
            [b' ' | b'\t', ..] if has_fields => continue,
            [b' ' | b'\t', ..] => return false,
            _ => (),
        }

        match line.iter().position(|&ch| ch == b':') {
            Some(colon) if colon > 0 && line[..colon].iter().all(u8::is_ascii_graphic) => {
                has_fields = true;
            }
            _ => return false,
        }
    }

    has_fields
}

/// Rejects dates with a day past the end of their month, such as February 31.
fn is_calendar_date(date: &DateTime) -> bool {
    date.is_valid() && date.day <= days_in_month(date.year, date.month)
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use crate::{ParsedMessage, ZERO_TIMESTAMP};

    use super::{days_in_month, is_header_section};

    #[test]
    fn parse_recipients() {
        let message = ParsedMessage::parse(
            concat!(
                "From: Art Vandelay <art@vandelay.com>\n",
                "To: \"James Smythe\" <james@vandelay.com>, jane@example.com\n",
                "Cc: Friends: john@example.com, kramer@kramerica.com;\n",
                "Date: Sat, 20 Nov 2021 14:22:01 -0800\n",
                "Subject: Importing and exporting\n",
                "\n",
                "Hello\n",
            )
            .as_bytes(),
        )
        .unwrap();

        assert_eq!(message.to, ["james@vandelay.com", "jane@example.com"]);
        assert_eq!(message.cc, ["john@example.com", "kramer@kramerica.com"]);
        assert!(message.bcc.is_empty());
        assert_eq!(
            message.addresses().collect::<Vec<_>>(),
            [
                "james@vandelay.com",
                "jane@example.com",
                "john@example.com",
                "kramer@kramerica.com"
            ]
        );
        assert_eq!(message.date, 1637446921);
        assert_eq!(
            message.raw_recipients,
            concat!(
                "\"James Smythe\" <james@vandelay.com>, jane@example.com\n",
                "Friends: john@example.com, kramer@kramerica.com;"
            )
        );
    }

    #[test]
    fn missing_fields() {
        let message = ParsedMessage::parse(b"Subject: nothing to see\n\nbody\n").unwrap();

        assert!(message.addresses().next().is_none());
        assert_eq!(message.raw_recipients, "");
        assert_eq!(message.date, ZERO_TIMESTAMP);
        assert_eq!(message, ParsedMessage::default());
    }

    #[test]
    fn malformed_fields() {
        let message = ParsedMessage::parse(
            concat!(
                "To: jane@example.com, Jane Doe\n",
                "Cc: john@example.com\n",
                "Date: the day after tomorrow\n",
                "\n",
            )
            .as_bytes(),
        )
        .unwrap();

        assert!(message.to.is_empty());
        assert_eq!(message.cc, ["john@example.com"]);
        assert_eq!(message.date, ZERO_TIMESTAMP);
        assert!(message.raw_recipients.contains("jane@example.com"));
    }

    #[test]
    fn not_a_message() {
        assert_eq!(ParsedMessage::parse(b""), None);
    }

    #[test]
    fn broken_recipient_lists() {
        for to in [
            "Broken <jane@example.com",
            "Jane <jane@example.com> trailing",
            "jane@example.com;",
            "jane@example.com,,",
            "jane@example.com (comment",
            "jane@@example.com",
        ] {
            let message = ParsedMessage::parse(
                format!("Cc: john@example.com\nTo: {to}\n\n").as_bytes(),
            )
            .unwrap();

            assert!(message.to.is_empty(), "accepted {to:?}: {:?}", message.to);
            assert_eq!(message.cc, ["john@example.com"]);
            assert_eq!(message.raw_recipients, format!("john@example.com\n{to}"));
        }
    }

    #[test]
    fn folded_recipient_list() {
        let message = ParsedMessage::parse(
            b"To: Jane Doe <jane@example.com>,\r\n\tJohn <john@example.com>\r\n\r\n",
        )
        .unwrap();

        assert_eq!(message.to, ["jane@example.com", "john@example.com"]);
    }

    #[test]
    fn repeated_fields() {
        let message = ParsedMessage::parse(
            concat!(
                "Date: Tue, 1 Jun 2021 12:00:00 +0000\n",
                "To: jane@example.com\n",
                "Date: garbage\n",
                "To: john@example.com\n",
                "\n",
            )
            .as_bytes(),
        )
        .unwrap();

        assert_eq!(message.to, ["jane@example.com"]);
        assert_eq!(message.date, 1622548800);
        assert_eq!(
            message.raw_recipients,
            "jane@example.com\njohn@example.com"
        );
    }

    #[test]
    fn impossible_dates() {
        for (date, expected) in [
            ("Tue, 31 Feb 2021 12:00:00 +0000", ZERO_TIMESTAMP),
            ("Mon, 29 Feb 2021 12:00:00 +0000", ZERO_TIMESTAMP),
            ("Sat, 31 Apr 2021 12:00:00 +0000", ZERO_TIMESTAMP),
            ("Sat, 29 Feb 2020 12:00:00 +0000", 1582977600),
            ("Fri, 30 Apr 2021 12:00:00 +0000", 1619784000),
        ] {
            let message =
                ParsedMessage::parse(format!("Date: {date}\n\n").as_bytes()).unwrap();
            assert_eq!(message.date, expected, "failed for {date:?}");
        }

        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2021, 12), 31);
    }

    #[test]
    fn invalid_header_section() {
        assert_eq!(
            ParsedMessage::parse(b"not a header line\nTo: a@x.com\n\n"),
            None
        );
        assert_eq!(ParsedMessage::parse(b" To: a@x.com\n\n"), None);
        assert_eq!(ParsedMessage::parse(b"To : a@x.com\n\n"), None);
        assert_eq!(ParsedMessage::parse(b": a@x.com\n\n"), None);

        assert!(is_header_section(b"To: a@x.com\r\n\tb@x.com\r\n\r\nnot a header\n"));
        assert!(is_header_section(b"To: a@x.com"));
        assert!(!is_header_section(b""));
        assert!(!is_header_section(b"\nTo: a@x.com\n"));
    }
}
