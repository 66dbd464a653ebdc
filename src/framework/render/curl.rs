use super::body::body_to_json;
use crate::framework::core::{CapturedEvent, HttpRequest};

/// Header never copied into an exported command
const REDACTED_HEADER: &str = "Cookie";

const LINE_BREAK: &str = "\\\n\t";

/// Render a request as a multi-line shell command reproducing it.
///
/// `-X GET` is emitted only for GET requests; other methods get no method
/// flag. This matches the output users already rely on and is kept as is.
pub fn to_curl(request: &HttpRequest) -> String {
    let mut components = vec!["curl -i".to_string()];

    if request.method.eq_ignore_ascii_case("GET") {
        components.push("-X GET".to_string());
    }

    for (name, value) in request.headers.iter() {
        if name == REDACTED_HEADER {
            continue;
        }
        components.push(format!("-H '{}: {}'", name, value));
    }

    let data = body_to_json(&request.data).replace('\'', "\\'");
    components.push(format!("-d '{}'", data));

    components.push(format!("'{}'", request.uri));

    format!("$ {}", components.join(LINE_BREAK))
}

/// Curl command for an event, `None` when nothing was captured for the request
pub fn curl_for_event(event: &CapturedEvent) -> Option<String> {
    event.request.as_ref().map(to_curl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_plain_get() {
        let request = HttpRequest::new("GET", "http://x/y");
        assert_eq!(
            to_curl(&request),
            "$ curl -i\\\n\t-X GET\\\n\t-d 'null'\\\n\t'http://x/y'"
        );
    }

    #[test]
    fn test_method_flag_only_for_get() {
        let lowercase_get = to_curl(&HttpRequest::new("get", "http://x/y"));
        assert!(lowercase_get.contains("-X GET"));

        for method in ["POST", "PUT", "DELETE", "PATCH"] {
            let command = to_curl(&HttpRequest::new(method, "http://x/y"));
            assert!(!command.contains("-X"), "{} should not emit a method flag", method);
        }
    }

    #[test]
    fn test_headers_in_order_without_cookie() {
        let request = HttpRequest::new("POST", "https://api.example.com/login")
            .with_header("Content-Type", "application/json")
            .with_header("Cookie", "session=secret")
            .with_header("cookie", "lowercase=kept")
            .with_header("X-Request-Id", "abc")
            .with_data(json!({"user": "alice"}));

        let command = to_curl(&request);
        assert_eq!(
            command,
            "$ curl -i\\\n\t\
             -H 'Content-Type: application/json'\\\n\t\
             -H 'cookie: lowercase=kept'\\\n\t\
             -H 'X-Request-Id: abc'\\\n\t\
             -d '{\"user\":\"alice\"}'\\\n\t\
             'https://api.example.com/login'"
        );
        assert!(!command.contains("-H 'Cookie:"));
        assert!(!command.contains("secret"));
    }

    #[test]
    fn test_cookie_dropped_at_either_end_of_headers() {
        let first = HttpRequest::new("GET", "http://x/y")
            .with_header("Cookie", "session=first")
            .with_header("Accept", "*/*");
        assert_eq!(
            to_curl(&first),
            "$ curl -i\\\n\t-X GET\\\n\t-H 'Accept: */*'\\\n\t-d 'null'\\\n\t'http://x/y'"
        );

        let last = HttpRequest::new("DELETE", "http://x/y")
            .with_header("Accept", "*/*")
            .with_header("Cookie", "session=last");
        assert_eq!(
            to_curl(&last),
            "$ curl -i\\\n\t-H 'Accept: */*'\\\n\t-d 'null'\\\n\t'http://x/y'"
        );

        let only = HttpRequest::new("GET", "http://x/y").with_header("Cookie", "session=only");
        assert!(!to_curl(&only).contains("-H"));
    }

    #[test]
    fn test_single_quotes_in_body_are_escaped() {
        let request = HttpRequest::new("POST", "http://x/y").with_data("it's");
        let command = to_curl(&request);
        assert!(command.contains("-d '\"it\\'s\"'"));

        let data_line = command.lines().find(|line| line.starts_with("\t-d")).unwrap();
        let inner = &data_line["\t-d '".len()..data_line.len() - "'\\".len()];
        for (index, _) in inner.match_indices('\'') {
            assert_eq!(&inner[index - 1..index], "\\");
        }
    }

    #[test]
    fn test_event_without_request_has_no_command() {
        let event = CapturedEvent::new_with_id_and_timestamp("e".to_string(), Utc::now(), None);
        assert!(curl_for_event(&event).is_none());

        let event = CapturedEvent::pending(HttpRequest::new("GET", "http://x/y"));
        assert!(curl_for_event(&event).unwrap().ends_with("'http://x/y'"));
    }
}
