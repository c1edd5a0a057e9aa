//! Text and JSON renderings of a [`WindowStore`].

use ifchart_config::SortOrder;
use ifchart_core::{InterfaceState, Series, ViewState, WindowStore};
use ifchart_system::format_bytes;
use serde::Serialize;
use std::fmt::Write as _;

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Header title until metadata arrives or fails.
pub const LOADING: &str = "Loading ...";

/// Shown while the stream is not open.
pub const CONNECTING: &str = "Connecting ...";

/// Interfaces in display order.
pub fn ordered(store: &WindowStore, sort: SortOrder) -> Vec<&InterfaceState> {
    let mut interfaces: Vec<_> = store.interfaces().iter().collect();
    if sort == SortOrder::Name {
        interfaces.sort_by(|a, b| a.name.cmp(&b.name));
    }
    interfaces
}

/// One bar per sample, scaled against the window's peak.
pub fn sparkline(series: &Series) -> String {
    let peak = series.peak();
    series
        .values()
        .map(|v| {
            if peak == 0 {
                BARS[0]
            } else {
                let level = (v as f64 / peak as f64 * (BARS.len() - 1) as f64).round() as usize;
                BARS[level.min(BARS.len() - 1)]
            }
        })
        .collect()
}

/// Header line plus one line per interface.
pub fn render_text(store: &WindowStore, view: &ViewState, sort: SortOrder, stamp: &str) -> String {
    let mut out = String::new();

    let title = match (&view.info, &view.error) {
        (Some(info), _) => format!("{} v{}", info.name, info.version),
        (None, Some(_)) => view.version().to_string(),
        (None, None) => LOADING.to_string(),
    };
    let _ = writeln!(out, "── {title} ── {stamp}");

    if !view.status.is_open() {
        let _ = writeln!(out, "{CONNECTING}");
    }

    let width = store.names().map(str::len).max().unwrap_or(0);
    for iface in ordered(store, sort) {
        let _ = writeln!(
            out,
            "{:<width$}  ↓ {:>10}  ↑ {:>10}  rx {}  tx {}",
            iface.name,
            format_bytes(iface.rx.newest().value),
            format_bytes(iface.tx.newest().value),
            sparkline(&iface.rx),
            sparkline(&iface.tx),
        );
    }

    out
}

/// Chart point: the offset as an ordinal category label.
#[derive(Debug, Serialize)]
pub struct Point {
    pub x: String,
    pub y: u64,
}

#[derive(Debug, Serialize)]
pub struct Chart<'a> {
    pub name: &'a str,
    pub rx:   Vec<Point>,
    pub tx:   Vec<Point>,
}

fn points(series: &Series) -> Vec<Point> {
    series
        .samples()
        .iter()
        .map(|s| Point { x: s.offset.to_string(), y: s.value })
        .collect()
}

pub fn charts(store: &WindowStore, sort: SortOrder) -> Vec<Chart<'_>> {
    ordered(store, sort)
        .into_iter()
        .map(|iface| Chart {
            name: &iface.name,
            rx:   points(&iface.rx),
            tx:   points(&iface.tx),
        })
        .collect()
}

/// The whole store as one JSON line.
pub fn render_json(store: &WindowStore, sort: SortOrder) -> serde_json::Result<String> {
    serde_json::to_string(&charts(store, sort))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifchart_core::reducer::apply;
    use ifchart_core::{ConnectionStatus, Reading, ServerInfo, Snapshot, WINDOW_SIZE};

    fn store(readings: &[(&str, u64, u64)]) -> WindowStore {
        let snap = Snapshot::new(
            readings.iter().map(|&(n, rx, tx)| Reading::new(n, rx, tx)).collect(),
        )
        .unwrap();
        apply(&WindowStore::default(), &snap)
    }

    #[test]
    fn sparkline_scales_to_peak() {
        let s = store(&[("eth0", 80, 0)]);
        let line = sparkline(&s.get("eth0").unwrap().rx);
        assert_eq!(line.chars().count(), WINDOW_SIZE);
        assert!(line.ends_with('█'));
        assert!(line.starts_with('▁'));
    }

    #[test]
    fn sort_by_name_is_display_only() {
        let s = store(&[("wlan0", 1, 1), ("eth0", 2, 2)]);
        let names: Vec<_> = ordered(&s, SortOrder::Name).into_iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["eth0", "wlan0"]);
        assert_eq!(s.names().collect::<Vec<_>>(), ["wlan0", "eth0"]);
    }

    #[test]
    fn text_shows_connecting_until_open() {
        let s = store(&[("eth0", 1_500, 0)]);
        let mut view = ViewState::default();
        view.load_succeeded(ServerInfo { version: "1.0.0".into(), name: "lab".into() });

        let text = render_text(&s, &view, SortOrder::Snapshot, "12:00:00");
        assert!(text.contains("lab v1.0.0"));
        assert!(text.contains(CONNECTING));
        assert!(text.contains("1.5 KB"));

        view.status = ConnectionStatus::Open;
        let text = render_text(&s, &view, SortOrder::Snapshot, "12:00:00");
        assert!(!text.contains(CONNECTING));
    }

    #[test]
    fn header_says_loading_before_metadata() {
        let s = store(&[]);
        let mut view = ViewState::default();
        let text = render_text(&s, &view, SortOrder::Snapshot, "12:00:00");
        assert!(text.starts_with(&format!("── {LOADING} ── 12:00:00")));

        view.begin_load();
        view.load_failed("refused".into());
        let text = render_text(&s, &view, SortOrder::Snapshot, "12:00:00");
        assert!(text.contains(ifchart_core::state::VERSION_UNAVAILABLE));
        assert!(!text.contains(LOADING));
    }

    #[test]
    fn json_uses_ordinal_offsets() {
        let s = store(&[("eth0", 100, 50)]);
        let json = render_json(&s, SortOrder::Snapshot).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let rx = value[0]["rx"].as_array().unwrap();
        assert_eq!(rx.len(), WINDOW_SIZE);
        assert_eq!(rx[0]["x"], "60");
        assert_eq!(rx[WINDOW_SIZE - 1]["x"], "2");
        assert_eq!(rx[WINDOW_SIZE - 1]["y"], 100);
        assert_eq!(value[0]["name"], "eth0");
    }
}
