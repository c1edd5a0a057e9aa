//! HTTP routes served by the publisher.

/// `GET` → [`ifchart_core::ServerInfo`] as JSON.
pub const INFO_PATH: &str = "/api/info";

/// `GET` → `text/event-stream`, one snapshot per `data:` event.
pub const EVENTS_PATH: &str = "/api/events";

/// Turn a configured address (`host:port` or a full URL) into a base URL.
pub fn base_url(address: &str) -> String {
    let address = address.trim_end_matches('/');
    if address.starts_with("http://") || address.starts_with("https://") {
        address.to_string()
    } else {
        format!("http://{address}")
    }
}

/// Absolute URL of `path` on the publisher at `address`.
pub fn url(address: &str, path: &str) -> String {
    format!("{}{path}", base_url(address))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_address_gets_http_scheme() {
        assert_eq!(url("127.0.0.1:8000", EVENTS_PATH), "http://127.0.0.1:8000/api/events");
    }

    #[test]
    fn full_url_is_kept() {
        assert_eq!(url("https://lab.local/", INFO_PATH), "https://lab.local/api/info");
    }
}
