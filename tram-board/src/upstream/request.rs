//! Stop event request documents.
//!
//! Builds the XML body for a stop event request: the next 40 departures at
//! one stop, with real-time data and without previous or onward calls.

use chrono::{DateTime, Local, Utc};

use super::schema::Schema;

/// Maximum number of stop events requested.
pub const NUMBER_OF_RESULTS: u32 = 40;

/// Identifies us to the upstream.
pub const REQUESTOR_REF: &str = "tram-board";

/// Format of `DepArrTime`: local wall-clock time, no zone suffix.
const DEP_ARR_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Format of `RequestTimestamp`: UTC with milliseconds.
const REQUEST_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Build a stop event request for `stop` as of `now`.
pub fn build_request(schema: Schema, stop: &str, now: DateTime<Local>) -> String {
    let dep_arr_time = now.naive_local().format(DEP_ARR_TIME_FORMAT).to_string();
    let timestamp = now
        .with_timezone(&Utc)
        .format(REQUEST_TIMESTAMP_FORMAT)
        .to_string();
    let stop = escape_xml(stop);

    match schema {
        Schema::Ojp => ojp_request(&stop, &dep_arr_time, &timestamp),
        Schema::Trias => trias_request(&stop, &dep_arr_time, &timestamp),
    }
}

fn ojp_request(stop: &str, dep_arr_time: &str, timestamp: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<OJP xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema" xmlns="http://www.siri.org.uk/siri" version="1.0" xmlns:ojp="http://www.vdv.de/ojp" xsi:schemaLocation="http://www.siri.org.uk/siri ../ojp-xsd-v1.0/OJP.xsd">
    <OJPRequest>
        <ServiceRequest>
            <RequestTimestamp>{timestamp}</RequestTimestamp>
            <RequestorRef>{REQUESTOR_REF}</RequestorRef>
            <ojp:OJPStopEventRequest>
                <RequestTimestamp>{timestamp}</RequestTimestamp>
                <ojp:Location>
                    <ojp:PlaceRef>
                        <StopPlaceRef>{stop}</StopPlaceRef>
                    </ojp:PlaceRef>
                    <ojp:DepArrTime>{dep_arr_time}</ojp:DepArrTime>
                </ojp:Location>
                <ojp:Params>
                    <ojp:NumberOfResults>{NUMBER_OF_RESULTS}</ojp:NumberOfResults>
                    <ojp:StopEventType>departure</ojp:StopEventType>
                    <ojp:IncludePreviousCalls>false</ojp:IncludePreviousCalls>
                    <ojp:IncludeOnwardCalls>false</ojp:IncludeOnwardCalls>
                    <ojp:IncludeRealtimeData>true</ojp:IncludeRealtimeData>
                </ojp:Params>
            </ojp:OJPStopEventRequest>
        </ServiceRequest>
    </OJPRequest>
</OJP>
"#
    )
}

fn trias_request(stop: &str, dep_arr_time: &str, timestamp: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Trias version="1.1" xmlns="http://www.vdv.de/trias" xmlns:siri="http://www.siri.org.uk/siri" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <ServiceRequest>
        <siri:RequestTimestamp>{timestamp}</siri:RequestTimestamp>
        <siri:RequestorRef>{REQUESTOR_REF}</siri:RequestorRef>
        <RequestPayload>
            <StopEventRequest>
                <Location>
                    <LocationRef>
                        <StopPointRef>{stop}</StopPointRef>
                    </LocationRef>
                    <DepArrTime>{dep_arr_time}</DepArrTime>
                </Location>
                <Params>
                    <NumberOfResults>{NUMBER_OF_RESULTS}</NumberOfResults>
                    <StopEventType>departure</StopEventType>
                    <IncludePreviousCalls>false</IncludePreviousCalls>
                    <IncludeOnwardCalls>false</IncludeOnwardCalls>
                    <IncludeRealtimeData>true</IncludeRealtimeData>
                </Params>
            </StopEventRequest>
        </RequestPayload>
    </ServiceRequest>
</Trias>
"#
    )
}

/// Escape the five XML special characters.
fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
