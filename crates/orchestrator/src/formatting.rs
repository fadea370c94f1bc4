//! Reply text built from route summaries.

use relay_core::{DirectionsRoute, RouteSummary};

/// Round to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Build a summary from a route candidate and the display labels of its ends.
pub fn summarize(origin: &str, destination: &str, route: &DirectionsRoute) -> RouteSummary {
    RouteSummary {
        origin: origin.to_string(),
        destination: destination.to_string(),
        duration_minutes: round1(route.duration_secs / 60.0),
        distance_km: round1(route.distance_meters / 1000.0),
    }
}

/// Multi-line reply for a freshly resolved route.
pub fn format_route_reply(summary: &RouteSummary) -> String {
    format!(
        "Route found!\nFrom: {}\nTo: {}\nDuration: {:.1} minutes\nDistance: {:.1} km",
        summary.origin, summary.destination, summary.duration_minutes, summary.distance_km
    )
}

/// Answer to a duration follow-up, built only from the cached route.
pub fn format_duration_reply(summary: &RouteSummary) -> String {
    format!(
        "The trip from {} to {} takes about {:.1} minutes ({:.1} hours) and covers {:.1} km.",
        summary.origin,
        summary.destination,
        summary.duration_minutes,
        summary.duration_minutes / 60.0,
        summary.distance_km
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris_berlin() -> RouteSummary {
        summarize(
            "Paris",
            "Berlin",
            &DirectionsRoute {
                duration_secs: 12_600.0,
                distance_meters: 1_050_000.0,
            },
        )
    }

    #[test]
    fn test_summarize_converts_units() {
        let summary = paris_berlin();
        assert_eq!(summary.duration_minutes, 210.0);
        assert_eq!(summary.distance_km, 1050.0);
    }

    #[test]
    fn test_summarize_rounds_to_one_decimal() {
        let summary = summarize(
            "A",
            "B",
            &DirectionsRoute {
                duration_secs: 1_000.0,
                distance_meters: 12_345.0,
            },
        );
        assert_eq!(summary.duration_minutes, 16.7);
        assert_eq!(summary.distance_km, 12.3);
    }

    #[test]
    fn test_route_reply() {
        let reply = format_route_reply(&paris_berlin());
        assert_eq!(
            reply,
            "Route found!\nFrom: Paris\nTo: Berlin\nDuration: 210.0 minutes\nDistance: 1050.0 km"
        );
    }

    #[test]
    fn test_duration_reply() {
        let reply = format_duration_reply(&paris_berlin());
        assert!(reply.contains("210.0 minutes"));
        assert!(reply.contains("3.5 hours"));
        assert!(reply.contains("1050.0 km"));
        assert!(reply.contains("Paris"));
    }
}
