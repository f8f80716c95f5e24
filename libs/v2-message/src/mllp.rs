//! MLLP envelope framing
//!
//! Over a byte stream, each message travels inside an envelope: a vertical
//! tab (0x0B) opens the frame and a file separator followed by a carriage
//! return (0x1C 0x0D) closes it. Anything between frames is noise from the
//! transport's point of view.

use once_cell::sync::Lazy;
use regex::Regex;

static FRAME: Lazy<Regex> =
    Lazy::new(|| Regex::new("(?s)\\x0B(.*?)\\x1C\\x0D").expect("frame pattern"));

/// Extract every framed message from a buffered stream, ignoring bytes
/// outside frames. An unterminated trailing frame is not returned.
pub fn split_stream(buffer: &str) -> Vec<String> {
    FRAME
        .captures_iter(buffer)
        .map(|capture| capture[1].to_string())
        .collect()
}
