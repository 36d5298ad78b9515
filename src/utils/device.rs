//! Device hint derivation from User-Agent strings.

/// Markers that identify a mobile browser.
const MOBILE_MARKERS: &[&str] = &["mobile", "iphone", "android", "windows phone"];

/// Markers that identify a tablet.
const TABLET_MARKERS: &[&str] = &["tablet", "ipad", "kindle"];

/// Markers that identify a desktop OS.
const DESKTOP_MARKERS: &[&str] = &["windows nt", "macintosh", "x11", "cros"];

/// Derives a coarse device hint from a raw User-Agent string.
///
/// The hint is stored as free text on the click row; the analytics
/// classifier re-buckets it at read time, so unrecognized agents are stored
/// as `None` rather than guessed.
///
/// Android UAs carry "Mobile" only on phones, so tablets are checked first.
pub fn device_hint(user_agent: Option<&str>) -> Option<&'static str> {
    let ua = user_agent?.to_lowercase();

    if TABLET_MARKERS.iter().any(|m| ua.contains(m)) {
        return Some("tablet");
    }
    if MOBILE_MARKERS.iter().any(|m| ua.contains(m)) {
        return Some("mobile");
    }
    if DESKTOP_MARKERS.iter().any(|m| ua.contains(m)) {
        return Some("desktop");
    }

    None
}
