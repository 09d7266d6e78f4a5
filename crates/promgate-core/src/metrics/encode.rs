//! Prometheus text exposition helpers (format version 0.0.4).

use std::fmt::Write;

/// Content type served alongside [`Registry::render`](super::Registry::render).
pub const TEXT_FORMAT_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Escape a label value.
pub(crate) fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Escape HELP text. Quotes are legal there.
pub(crate) fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Format a float the way scrapers and most client libraries print it:
/// integral values keep one decimal (`1.0`), infinities are `+Inf`/`-Inf`.
pub(crate) fn fmt_float(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        if v > 0.0 {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        }
    } else if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

pub(crate) fn write_header(out: &mut String, name: &str, help: &str, kind: &str) {
    let _ = writeln!(out, "# HELP {} {}", name, escape_help(help));
    let _ = writeln!(out, "# TYPE {} {}", name, kind);
}

/// `k1="v1",k2="v2"` in declared label order.
pub(crate) fn label_pairs(names: &[String], values: &[String]) -> String {
    names
        .iter()
        .zip(values)
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

/// `{..}` or nothing when there are no labels.
pub(crate) fn braced(pairs: &str) -> String {
    if pairs.is_empty() {
        String::new()
    } else {
        format!("{{{pairs}}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_keep_one_decimal() {
        assert_eq!(fmt_float(1.0), "1.0");
        assert_eq!(fmt_float(0.005), "0.005");
        assert_eq!(fmt_float(10.0), "10.0");
        assert_eq!(fmt_float(-2.0), "-2.0");
        assert_eq!(fmt_float(f64::INFINITY), "+Inf");
    }

    #[test]
    fn label_values_are_escaped() {
        assert_eq!(escape_label("a\"b\\c\nd"), "a\\\"b\\\\c\\nd");
        assert_eq!(escape_help("say \"hi\"\n"), "say \"hi\"\\n");
    }

    #[test]
    fn pairs_follow_declared_order() {
        let names = vec!["method".to_string(), "path".to_string()];
        let values = vec!["GET".to_string(), "/".to_string()];
        assert_eq!(label_pairs(&names, &values), "method=\"GET\",path=\"/\"");
        assert_eq!(braced(""), "");
        assert_eq!(braced("a=\"b\""), "{a=\"b\"}");
    }
}
