use crate::framework::core::CapturedEvent;

/// Filter events by a case-insensitive substring of the request URL.
///
/// An empty query returns every event in its original order, including events
/// without a request. A non-empty query only ever matches events that carry a
/// request.
pub fn filter_events<'a, I>(events: I, query: &str) -> Vec<&'a CapturedEvent>
where
    I: IntoIterator<Item = &'a CapturedEvent>,
{
    if query.is_empty() {
        return events.into_iter().collect();
    }

    let needle = query.to_lowercase();
    events
        .into_iter()
        .filter(|event| uri_contains(event, &needle))
        .collect()
}

/// `needle` must already be lower-cased
fn uri_contains(event: &CapturedEvent, needle: &str) -> bool {
    event
        .request
        .as_ref()
        .is_some_and(|request| request.uri.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::core::HttpRequest;
    use chrono::Utc;

    fn event(id: &str, uri: Option<&str>) -> CapturedEvent {
        CapturedEvent::new_with_id_and_timestamp(
            id.to_string(),
            Utc::now(),
            uri.map(|uri| HttpRequest::new("GET", uri)),
        )
    }

    fn ids(events: &[&CapturedEvent]) -> Vec<String> {
        events.iter().map(|e| e.id.clone()).collect()
    }

    fn sample() -> Vec<CapturedEvent> {
        vec![
            event("1", Some("https://api.example.com/Users/42")),
            event("2", None),
            event("3", Some("https://cdn.example.com/logo.png")),
            event("4", Some("https://api.example.com/users?page=2")),
        ]
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let events = sample();
        let result = filter_events(&events, "");
        assert_eq!(ids(&result), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_query_is_case_insensitive_and_order_preserving() {
        let events = sample();
        let result = filter_events(&events, "USERS");
        assert_eq!(ids(&result), vec!["1", "4"]);
    }

    #[test]
    fn test_events_without_request_never_match_a_query() {
        let events = sample();
        for query in ["h", "example", "/"] {
            let result = filter_events(&events, query);
            assert!(result.iter().all(|e| e.request.is_some()));
        }
    }

    #[test]
    fn test_no_match_yields_empty_result() {
        let events = sample();
        assert!(filter_events(&events, "graphql").is_empty());
    }
}
