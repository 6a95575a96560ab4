/// Utility helpers for the CorpsSmp page

/// Milliseconds since the Unix epoch, from the browser clock on the web.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Resolve after `ms` milliseconds on the UI event loop.
#[cfg(target_arch = "wasm32")]
pub async fn sleep_ms(ms: u32) {
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep_ms(ms: u32) {
    tokio::time::sleep(std::time::Duration::from_millis(u64::from(ms))).await;
}

/// Substitute `{address}` placeholders in page copy with the server address.
pub fn fill_address<S: AsRef<str>>(template: S, address: &str) -> String {
    template.as_ref().replace("{address}", address)
}

/// Integer percentage of `part` over `whole`, clamped to 0..=100.
/// Returns `None` while `whole` is unknown (NaN, infinite, or zero).
pub fn percent_of(part: f64, whole: f64) -> Option<u8> {
    if !whole.is_finite() || whole <= 0.0 || !part.is_finite() {
        return None;
    }
    Some(((part / whole) * 100.0).round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_address_replaces_every_placeholder() {
        let text = fill_address("enter: {address} ({address})", "play.corpssmp.lol");
        assert_eq!(text, "enter: play.corpssmp.lol (play.corpssmp.lol)");
    }

    #[test]
    fn percent_of_needs_a_known_duration() {
        assert_eq!(percent_of(30.0, f64::NAN), None);
        assert_eq!(percent_of(30.0, 0.0), None);
        assert_eq!(percent_of(30.0, f64::INFINITY), None);
        assert_eq!(percent_of(30.0, 120.0), Some(25));
        assert_eq!(percent_of(130.0, 120.0), Some(100));
    }
}
