use gpusmi_types::Compatibility;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Records carry this key purely for visual spacing in legacy output; the
/// whole line is dropped from the rendered block.
pub const SPACING_SENTINEL: &str = "AMDSMI_SPACING_REMOVAL";

static GPU_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"GPU: ([0-9]+)").expect("valid heading pattern"));

/// Upper-case every string key at every nesting depth, values untouched.
pub fn capitalize_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (key, child) in map {
                out.insert(key.to_uppercase(), capitalize_keys(child));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(capitalize_keys).collect()),
        other => other.clone(),
    }
}

/// Render a record as an indented human-readable block.
///
/// Keys are upper-cased, nested maps indent their children, list items get
/// a marker, then the dialect cosmetic passes run: the gpuvsmi `GPU N:`
/// heading rewrite, spacer-line removal, quote stripping, and the
/// marker/indent cleanup that aligns list children under scalar siblings.
pub fn render(value: &Value, compat: Compatibility) -> String {
    let capitalized = capitalize_keys(value);
    let mut block = String::new();
    write_block(&mut block, &capitalized, 0);
    cleanup(&block, compat)
}

fn write_block(out: &mut String, value: &Value, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                match child {
                    Value::Object(nested) if !nested.is_empty() => {
                        out.push_str(&format!("{}{}:\n", pad, key));
                        write_block(out, child, indent + 1);
                    }
                    Value::Array(items) if !items.is_empty() => {
                        out.push_str(&format!("{}{}:\n", pad, key));
                        for item in items {
                            write_item(out, item, indent);
                        }
                    }
                    scalar => {
                        out.push_str(&format!("{}{}: {}\n", pad, key, scalar_text(scalar)));
                    }
                }
            }
        }
        other => {
            out.push_str(&format!("{}{}\n", pad, scalar_text(other)));
        }
    }
}

fn write_item(out: &mut String, item: &Value, indent: usize) {
    let pad = "  ".repeat(indent);
    match item {
        Value::Object(map) if !map.is_empty() => {
            let mut nested = String::new();
            write_block(&mut nested, item, indent + 1);
            let mut lines = nested.lines();
            if let Some(first) = lines.next() {
                out.push_str(&format!("{}- {}\n", pad, first.trim_start()));
            }
            for rest in lines {
                out.push_str(rest);
                out.push('\n');
            }
        }
        Value::Array(items) if !items.is_empty() => {
            out.push_str(&format!("{}-\n", pad));
            for nested in items {
                write_item(out, nested, indent + 1);
            }
        }
        other => {
            out.push_str(&format!("{}- {}\n", pad, scalar_text(other)));
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) => "[]".to_string(),
        Value::Object(_) => "{}".to_string(),
    }
}

fn cleanup(block: &str, compat: Compatibility) -> String {
    let mut text = block.to_string();

    if compat == Compatibility::GpuvSmi {
        text = GPU_HEADING.replace_all(&text, "GPU $1:").to_string();
    }

    let mut cleaned = String::new();
    for line in text.lines() {
        if line_key(line) == Some(SPACING_SENTINEL) {
            continue;
        }
        let line = line.replace(['\'', '"'], "");
        let line = strip_list_marker(&line);
        let line = expand_indent(&line);
        cleaned.push_str(&line);
        cleaned.push('\n');
    }
    cleaned
}

fn line_key(line: &str) -> Option<&str> {
    let key = line.trim_start_matches(' ');
    let key = key.strip_prefix("- ").unwrap_or(key);
    key.split_once(':').map(|(head, _)| head)
}

/// Replace one leading list-marker dash with a space; dashes inside key
/// names stay.
fn strip_list_marker(line: &str) -> String {
    let trimmed = line.trim_start_matches(' ');
    match trimmed.strip_prefix('-') {
        Some(tail) => {
            let indent = &line[..line.len() - trimmed.len()];
            format!("{} {}", indent, tail)
        }
        None => line.to_string(),
    }
}

/// Expand two-space indentation to four, over the key portion of the line.
fn expand_indent(line: &str) -> String {
    match line.find(':') {
        Some(pos) => format!("{}{}", line[..pos].replace("  ", "    "), &line[pos..]),
        None => line.replace("  ", "    "),
    }
}
