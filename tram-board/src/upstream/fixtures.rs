//! OJP response documents for tests.

/// One OJP stop event with a timetabled departure.
pub(crate) fn stop_event(line: &str, destination: &str, timetabled: &str) -> String {
    format!(
        "<ojp:StopEvent>\
           <ojp:ThisCall><ojp:CallAtStop><ojp:ServiceDeparture>\
             <ojp:TimetabledTime>{timetabled}</ojp:TimetabledTime>\
           </ojp:ServiceDeparture></ojp:CallAtStop></ojp:ThisCall>\
           <ojp:Service>\
             <ojp:PublishedLineName><ojp:Text>{line}</ojp:Text></ojp:PublishedLineName>\
             <ojp:DestinationText><ojp:Text>{destination}</ojp:Text></ojp:DestinationText>\
           </ojp:Service>\
         </ojp:StopEvent>"
    )
}

/// Minimal OJP document wrapping the given stop events.
pub(crate) fn ojp_response(events: &[String]) -> String {
    format!(
        r#"<OJP xmlns="http://www.siri.org.uk/siri" xmlns:ojp="http://www.vdv.de/ojp">{}</OJP>"#,
        events.concat()
    )
}
