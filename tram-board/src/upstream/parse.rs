//! Stop event response parsing.
//!
//! Walks every `StopEvent` in the response and keeps the ones for the
//! target line whose destination contains the target substring.
//!
//! Structural problems are fatal: a stop event without `ThisCall` or
//! `Service` fails the whole parse, even if the event would have been
//! filtered out. Timing fields are only required for events that pass the
//! filters.

use chrono::{DateTime, NaiveDateTime, Utc};
use roxmltree::{Document, Node};
use tracing::debug;

use crate::domain::{Departure, DepartureList};

use super::schema::Schema;

/// Format of upstream departure times.
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// The upstream response broke the schema contract.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The body is not well-formed XML
    #[error("invalid XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// A mandatory element (or its text) is missing
    #[error("stop event {index}: missing {element}")]
    MissingElement { index: usize, element: String },

    /// A departure time is not in `YYYY-MM-DDTHH:MM:SSZ` format
    #[error("stop event {index}: invalid time {value:?} in {element}")]
    InvalidTime {
        index: usize,
        element: String,
        value: String,
    },
}

/// Extract the departures of `line` towards `destination` from a response.
///
/// `line` must match the published line name exactly; `destination` is a
/// case-sensitive substring of the destination text. Departures are
/// returned in document order.
pub fn parse_departures(
    schema: Schema,
    body: &str,
    line: &str,
    destination: &str,
) -> Result<DepartureList, ParseError> {
    let doc = Document::parse(body)?;
    let ns = schema.namespace();
    let paths = schema.paths();

    let mut departures = Vec::new();

    let stop_events = doc
        .descendants()
        .filter(|n| n.has_tag_name((ns, paths.stop_event)));

    for (index, event) in stop_events.enumerate() {
        let event = StopEvent { node: event, index, ns };

        let this_call = event.child(paths.this_call)?;
        let service = event.child(paths.service)?;

        let published_line = event.text_at(service, paths.line)?;
        if published_line != line {
            debug!(index, line = published_line, "skipping stop event: other line");
            continue;
        }

        let destination_text = event.text_at(service, paths.destination)?;
        if !destination_text.contains(destination) {
            debug!(
                index,
                destination = destination_text,
                "skipping stop event: other destination"
            );
            continue;
        }

        let timetabled = event.text_at(this_call, paths.timetabled)?;
        let timetabled = event.parse_time(timetabled, paths.timetabled)?;

        let estimated = match find_path(this_call, ns, paths.estimated).and_then(|n| n.text()) {
            Some(text) => Some(event.parse_time(text, paths.estimated)?),
            None => None,
        };

        departures.push(Departure::new(
            published_line,
            destination_text,
            timetabled,
            estimated,
        ));
    }

    Ok(departures)
}

/// A stop event being parsed, for error context.
struct StopEvent<'a, 'input> {
    node: Node<'a, 'input>,
    index: usize,
    ns: &'static str,
}

impl<'a, 'input> StopEvent<'a, 'input> {
    /// Mandatory direct child of the stop event.
    fn child(&self, name: &'static str) -> Result<Node<'a, 'input>, ParseError> {
        find_path(self.node, self.ns, &[name]).ok_or_else(|| self.missing(&[name]))
    }

    /// Mandatory text at `path` below `from`.
    fn text_at(&self, from: Node<'a, 'input>, path: &[&str]) -> Result<&'a str, ParseError> {
        find_path(from, self.ns, path)
            .and_then(|n| n.text())
            .ok_or_else(|| self.missing(path))
    }

    fn parse_time(&self, value: &str, path: &[&str]) -> Result<DateTime<Utc>, ParseError> {
        parse_time(value).ok_or_else(|| ParseError::InvalidTime {
            index: self.index,
            element: path.join("/"),
            value: value.to_string(),
        })
    }

    fn missing(&self, path: &[&str]) -> ParseError {
        ParseError::MissingElement {
            index: self.index,
            element: path.join("/"),
        }
    }
}

/// First element reached by following `path` through child elements.
///
/// At each step every matching child is a candidate; the first full match
/// in document order wins.
fn find_path<'a, 'input>(
    from: Node<'a, 'input>,
    ns: &str,
    path: &[&str],
) -> Option<Node<'a, 'input>> {
    let Some((first, rest)) = path.split_first() else {
        return Some(from);
    };
    from.children()
        .filter(|n| n.has_tag_name((ns, *first)))
        .find_map(|n| find_path(n, ns, rest))
}

/// Parse an upstream time as UTC.
fn parse_time(value: &str) -> Option<DateTime<Utc>> {
    // chrono skips whitespace before numeric fields
    if value.contains(|c: char| c.is_whitespace()) {
        return None;
    }
    NaiveDateTime::parse_from_str(value, TIME_FORMAT)
        .ok()
        .map(|t| t.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 20, h, m, 0).unwrap()
    }

    /// One OJP stop event. `None` fields are left out of the document.
    struct Event<'a> {
        line: Option<&'a str>,
        destination: Option<&'a str>,
        timetabled: Option<&'a str>,
        estimated: Option<&'a str>,
        with_this_call: bool,
        with_service: bool,
    }

    impl<'a> Event<'a> {
        fn new(line: &'a str, destination: &'a str, timetabled: &'a str) -> Self {
            Self {
                line: Some(line),
                destination: Some(destination),
                timetabled: Some(timetabled),
                estimated: None,
                with_this_call: true,
                with_service: true,
            }
        }

        fn estimated(mut self, t: &'a str) -> Self {
            self.estimated = Some(t);
            self
        }

        fn to_xml(&self) -> String {
            let mut xml = String::from("<ojp:StopEventResult><ojp:StopEvent>");
            if self.with_this_call {
                xml.push_str("<ojp:ThisCall><ojp:CallAtStop>");
                xml.push_str("<StopPointRef>8592922</StopPointRef>");
                xml.push_str("<ojp:ServiceDeparture>");
                if let Some(t) = self.timetabled {
                    xml.push_str(&format!("<ojp:TimetabledTime>{t}</ojp:TimetabledTime>"));
                }
                if let Some(t) = self.estimated {
                    xml.push_str(&format!("<ojp:EstimatedTime>{t}</ojp:EstimatedTime>"));
                }
                xml.push_str("</ojp:ServiceDeparture></ojp:CallAtStop></ojp:ThisCall>");
            }
            if self.with_service {
                xml.push_str("<ojp:Service>");
                if let Some(l) = self.line {
                    xml.push_str(&format!(
                        "<ojp:PublishedLineName><ojp:Text xml:lang=\"fr\">{l}</ojp:Text></ojp:PublishedLineName>"
                    ));
                }
                if let Some(d) = self.destination {
                    xml.push_str(&format!(
                        "<ojp:DestinationText><ojp:Text xml:lang=\"fr\">{d}</ojp:Text></ojp:DestinationText>"
                    ));
                }
                xml.push_str("</ojp:Service>");
            }
            xml.push_str("</ojp:StopEvent></ojp:StopEventResult>");
            xml
        }
    }

    fn ojp_response(events: &[Event]) -> String {
        let body: String = events.iter().map(Event::to_xml).collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<OJP xmlns="http://www.siri.org.uk/siri" xmlns:ojp="http://www.vdv.de/ojp" version="1.0">
  <OJPResponse>
    <ServiceDelivery>
      <ResponseTimestamp>2024-12-20T13:44:04Z</ResponseTimestamp>
      <ojp:OJPStopEventDelivery>
        <Status>true</Status>
        {body}
      </ojp:OJPStopEventDelivery>
    </ServiceDelivery>
  </OJPResponse>
</OJP>"#
        )
    }

    fn parse(body: &str) -> Result<DepartureList, ParseError> {
        parse_departures(Schema::Ojp, body, "18", "CERN")
    }

    #[test]
    fn keeps_matching_events_in_order() {
        let body = ojp_response(&[
            Event::new("18", "Meyrin-Gravière/CERN", "2024-12-20T13:50:00Z")
                .estimated("2024-12-20T13:51:00Z"),
            Event::new("18", "CERN", "2024-12-20T14:00:00Z"),
        ]);

        let deps = parse(&body).unwrap();

        assert_eq!(
            deps,
            vec![
                Departure::new("18", "Meyrin-Gravière/CERN", utc(13, 50), Some(utc(13, 51))),
                Departure::new("18", "CERN", utc(14, 0), None),
            ]
        );
    }

    #[test]
    fn line_must_match_exactly() {
        let body = ojp_response(&[
            Event::new("18", "CERN", "2024-12-20T13:50:00Z"),
            Event::new("118", "CERN", "2024-12-20T13:52:00Z"),
            Event::new("1", "CERN", "2024-12-20T13:53:00Z"),
        ]);

        let deps = parse(&body).unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].line, "18");
    }

    #[test]
    fn destination_match_is_case_sensitive_substring() {
        let body = ojp_response(&[
            Event::new("18", "Palettes", "2024-12-20T13:50:00Z"),
            Event::new("18", "cern", "2024-12-20T13:51:00Z"),
            Event::new("18", "Genève, CERN", "2024-12-20T13:52:00Z"),
        ]);

        let deps = parse(&body).unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].destination, "Genève, CERN");
    }

    #[test]
    fn filtered_events_do_not_need_times() {
        let mut other_line = Event::new("14", "P+R Bernex", "unused");
        other_line.timetabled = None;
        let mut other_destination = Event::new("18", "Carouge", "not a time");
        other_destination.timetabled = Some("not a time");

        let body = ojp_response(&[
            other_line,
            other_destination,
            Event::new("18", "CERN", "2024-12-20T13:50:00Z"),
        ]);

        let deps = parse(&body).unwrap();
        assert_eq!(deps.len(), 1);
    }

    #[test]
    fn filtered_events_do_not_need_destination() {
        let mut event = Event::new("14", "unused", "2024-12-20T13:50:00Z");
        event.destination = None;

        let deps = parse(&ojp_response(&[event])).unwrap();
        assert!(deps.is_empty());
    }

    #[test]
    fn missing_this_call_is_fatal_even_when_filtered() {
        let mut event = Event::new("14", "Carouge", "2024-12-20T13:50:00Z");
        event.with_this_call = false;

        let body = ojp_response(&[Event::new("18", "CERN", "2024-12-20T13:50:00Z"), event]);

        let err = parse(&body).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingElement { index: 1, ref element } if element == "ThisCall"
        ));
    }

    #[test]
    fn missing_service_is_fatal() {
        let mut event = Event::new("18", "CERN", "2024-12-20T13:50:00Z");
        event.with_service = false;

        let err = parse(&ojp_response(&[event])).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingElement { ref element, .. } if element == "Service"
        ));
    }

    #[test]
    fn missing_line_is_fatal() {
        let mut event = Event::new("18", "CERN", "2024-12-20T13:50:00Z");
        event.line = None;

        let err = parse(&ojp_response(&[event])).unwrap_err();
        assert_eq!(err.to_string(), "stop event 0: missing PublishedLineName/Text");
    }

    #[test]
    fn missing_destination_on_matching_line_is_fatal() {
        let mut event = Event::new("18", "CERN", "2024-12-20T13:50:00Z");
        event.destination = None;

        let err = parse(&ojp_response(&[event])).unwrap_err();
        assert_eq!(err.to_string(), "stop event 0: missing DestinationText/Text");
    }

    #[test]
    fn missing_timetabled_time_on_matching_event_is_fatal() {
        let mut event = Event::new("18", "CERN", "unused");
        event.timetabled = None;

        let err = parse(&ojp_response(&[event])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "stop event 0: missing CallAtStop/ServiceDeparture/TimetabledTime"
        );
    }

    #[test]
    fn invalid_time_is_fatal() {
        let event = Event::new("18", "CERN", "2024-12-20 13:50");

        let err = parse(&ojp_response(&[event])).unwrap_err();
        assert!(matches!(err, ParseError::InvalidTime { ref value, .. } if value == "2024-12-20 13:50"));
    }

    #[test]
    fn padded_time_is_fatal() {
        for padded in [" 2024-12-20T13:50:00Z", "2024-12-20T13:50:00Z ", "2024-12-20T 13:50:00Z"] {
            let event = Event::new("18", "CERN", padded);

            let err = parse(&ojp_response(&[event])).unwrap_err();
            assert!(
                matches!(err, ParseError::InvalidTime { ref value, .. } if value == padded),
                "{padded:?}"
            );
        }
    }

    #[test]
    fn invalid_estimate_is_fatal() {
        let event = Event::new("18", "CERN", "2024-12-20T13:50:00Z").estimated("soon");

        let err = parse(&ojp_response(&[event])).unwrap_err();
        assert!(matches!(err, ParseError::InvalidTime { .. }));
    }

    #[test]
    fn no_partial_result_on_error() {
        let mut broken = Event::new("18", "CERN", "unused");
        broken.timetabled = None;

        let body = ojp_response(&[Event::new("18", "CERN", "2024-12-20T13:50:00Z"), broken]);
        assert!(parse(&body).is_err());
    }

    #[test]
    fn empty_delivery_gives_empty_list() {
        assert!(parse(&ojp_response(&[])).unwrap().is_empty());
    }

    #[test]
    fn malformed_xml_is_an_error() {
        let err = parse("<OJP><unclosed></OJP>").unwrap_err();
        assert!(matches!(err, ParseError::Xml(_)));
    }

    #[test]
    fn elements_in_other_namespaces_are_ignored() {
        // The same document read as TRIAS has no stop events at all
        let body = ojp_response(&[Event::new("18", "CERN", "2024-12-20T13:50:00Z")]);
        let deps = parse_departures(Schema::Trias, &body, "18", "CERN").unwrap();
        assert!(deps.is_empty());
    }

    #[test]
    fn parses_trias_response() {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<trias:Trias xmlns:siri="http://www.siri.org.uk/siri" xmlns:trias="http://www.vdv.de/trias" version="1.1">
  <trias:ServiceDelivery>
    <siri:ResponseTimestamp>2024-12-20T13:44:04Z</siri:ResponseTimestamp>
    <trias:DeliveryPayload>
      <trias:StopEventResponse>
        <trias:StopEventResult>
          <trias:StopEvent>
            <trias:ThisCall>
              <trias:CallAtStop>
                <trias:ServiceDeparture>
                  <trias:TimetabledTime>2024-12-20T13:50:00Z</trias:TimetabledTime>
                  <trias:EstimatedTime>2024-12-20T13:52:00Z</trias:EstimatedTime>
                </trias:ServiceDeparture>
              </trias:CallAtStop>
            </trias:ThisCall>
            <trias:Service>
              <trias:PublishedLineName><trias:Text>18</trias:Text></trias:PublishedLineName>
              <trias:DestinationText><trias:Text>Meyrin-Gravière/CERN</trias:Text></trias:DestinationText>
            </trias:Service>
          </trias:StopEvent>
        </trias:StopEventResult>
      </trias:StopEventResponse>
    </trias:DeliveryPayload>
  </trias:ServiceDelivery>
</trias:Trias>"#;

        let deps = parse_departures(Schema::Trias, body, "18", "CERN").unwrap();
        assert_eq!(
            deps,
            vec![Departure::new(
                "18",
                "Meyrin-Gravière/CERN",
                utc(13, 50),
                Some(utc(13, 52))
            )]
        );
    }
}
