// JSON output rendering shared by the file and project commands.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

/// Render a JSON value with 4-space indentation. Object keys come out
/// sorted because `serde_json::Map` is ordered by key.
pub fn to_pretty_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .expect("serializing an in-memory JSON value cannot fail");
    String::from_utf8(buf).expect("serde_json emits valid UTF-8")
}

/// Print a JSON value to stdout.
pub fn print_json(value: &Value) {
    println!("{}", to_pretty_json(value));
}
