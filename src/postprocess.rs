use crate::config::Postprocess;
use unicode_normalization::UnicodeNormalization;

/// Cleans raw page text before it is segmented or collapsed.
pub fn clean_page_text(cfg: &Postprocess, raw: &str) -> String {
    let mut s = raw.replace("\r\n", "\n").replace('\r', "\n");

    if cfg.normalize_unicode {
        s = s.nfkc().collect::<String>();
    }

    if cfg.strip_control_chars {
        s = strip_control_chars(&s);
    }

    s
}

fn strip_control_chars(s: &str) -> String {
    s.chars()
        // Whitespace controls (form feed, vertical tab) still separate words.
        .filter(|&ch| ch.is_whitespace() || !ch.is_ascii_control())
        .collect()
}
