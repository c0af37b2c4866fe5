use giron_client::api::Time;

/// Renders a store timestamp for display, eg "Oct 25, 2024 14:03"
pub fn format_time(t: &Time) -> String {
    t.format("%b %e, %Y %H:%M").to_string()
}
