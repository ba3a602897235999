use std::{borrow::Cow, sync::OnceLock};

use rust_embed::RustEmbed;
use tracing::error;

/// Stylesheet and icon, compiled into the binary.
#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

static MAIN_CSS: OnceLock<String> = OnceLock::new();
static FAVICON_DATA_URI: OnceLock<String> = OnceLock::new();

pub fn main_css() -> &'static str {
    MAIN_CSS.get_or_init(|| load_text("main.css")).as_str()
}

/// `data:` URI of the header badge icon.
pub fn favicon_data_uri() -> &'static str {
    FAVICON_DATA_URI
        .get_or_init(|| svg_data_uri(&load_text("favicon.svg")))
        .as_str()
}

fn load_text(name: &str) -> String {
    let Some(bytes) = load_asset(name) else {
        error!("embedded asset {name} is missing");
        return String::new();
    };
    String::from_utf8_lossy(&bytes).into_owned()
}

fn load_asset(name: &str) -> Option<Cow<'static, [u8]>> {
    EmbeddedAssets::get(name.trim_start_matches('/')).map(|file| file.data)
}

/// Percent-encodes the handful of characters that break an inline SVG URI.
fn svg_data_uri(svg: &str) -> String {
    let mut encoded = String::with_capacity(svg.len() + 32);
    encoded.push_str("data:image/svg+xml;charset=utf-8,");
    for ch in svg.chars() {
        match ch {
            '\n' | '\r' => encoded.push(' '),
            '"' => encoded.push('\''),
            '#' => encoded.push_str("%23"),
            '%' => encoded.push_str("%25"),
            '<' => encoded.push_str("%3C"),
            '>' => encoded.push_str("%3E"),
            other => encoded.push(other),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_stylesheet_is_present() {
        assert!(main_css().contains(".app-header"));
    }

    #[test]
    fn svg_uri_escapes_markup() {
        let uri = svg_data_uri("<svg fill=\"#fff\"/>");
        assert_eq!(uri, "data:image/svg+xml;charset=utf-8,%3Csvg fill='%23fff'/%3E");
        assert!(favicon_data_uri().starts_with("data:image/svg+xml"));
    }
}
