//! Literal evaluation over the Python syntax tree
//!
//! Parameter defaults and docstrings are read from source text, never by
//! running the module. Only literal expressions are understood: strings,
//! numbers, booleans, `None`, and lists, tuples, sets and dicts built from
//! them. Anything else evaluates to `None` and the caller reports it.

use serde_json::{Map, Number, Value};
use tree_sitter::Node;

/// Evaluate a literal expression node into a JSON value
pub fn literal_value(node: Node<'_>, source: &[u8]) -> Option<Value> {
    match node.kind() {
        "string" | "concatenated_string" => string_value(node, source).map(Value::String),
        "integer" => integer_value(node.utf8_text(source).ok()?),
        "float" => float_value(node.utf8_text(source).ok()?),
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        "none" => Some(Value::Null),
        "unary_operator" => {
            let operator = node.child_by_field_name("operator")?;
            let argument = literal_value(node.child_by_field_name("argument")?, source)?;
            match operator.utf8_text(source).ok()? {
                "-" => negate(&argument),
                "+" => argument.is_number().then_some(argument),
                _ => None,
            }
        }
        "parenthesized_expression" => literal_value(first_named(node)?, source),
        "list" | "tuple" | "set" => {
            let mut cursor = node.walk();
            node.named_children(&mut cursor)
                .filter(|child| child.kind() != "comment")
                .map(|child| literal_value(child, source))
                .collect::<Option<Vec<_>>>()
                .map(Value::Array)
        }
        "dictionary" => dictionary_value(node, source),
        _ => None,
    }
}

/// Decode a plain string literal (including implicit concatenation)
///
/// f-strings and byte strings are not plain strings and yield `None`.
pub fn string_value(node: Node<'_>, source: &[u8]) -> Option<String> {
    match node.kind() {
        "string" => decode_string_literal(node.utf8_text(source).ok()?),
        "concatenated_string" => {
            let mut cursor = node.walk();
            node.named_children(&mut cursor)
                .filter(|child| child.kind() != "comment")
                .map(|child| string_value(child, source))
                .collect::<Option<Vec<_>>>()
                .map(|parts| parts.concat())
        }
        _ => None,
    }
}

/// Decode the source text of a single Python string literal
pub fn decode_string_literal(text: &str) -> Option<String> {
    let quote_at = text.find(['\'', '"'])?;
    let prefix = text[..quote_at].to_ascii_lowercase();
    if prefix.chars().any(|c| !matches!(c, 'r' | 'u' | 'b' | 'f')) {
        return None;
    }
    if prefix.contains('b') || prefix.contains('f') {
        return None;
    }

    let quoted = &text[quote_at..];
    let quote = &quoted[..1];
    let triple = quote.repeat(3);
    let delimiter = if quoted.len() >= 6 && quoted.starts_with(&triple) {
        triple.as_str()
    } else {
        quote
    };
    let body = quoted
        .strip_prefix(delimiter)?
        .strip_suffix(delimiter)?;

    if prefix.contains('r') {
        Some(body.to_string())
    } else {
        Some(unescape(body))
    }
}

fn dictionary_value(node: Node<'_>, source: &[u8]) -> Option<Value> {
    let mut map = Map::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "comment" => {}
            "pair" => {
                let key = literal_value(child.child_by_field_name("key")?, source)?;
                let value = literal_value(child.child_by_field_name("value")?, source)?;
                map.insert(json_key(&key)?, value);
            }
            _ => return None,
        }
    }
    Some(Value::Object(map))
}

/// Object key for a literal dict key, following `json.dumps` conventions
fn json_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn first_named(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .find(|child| child.kind() != "comment")
}

fn integer_value(text: &str) -> Option<Value> {
    let digits = text.replace('_', "").to_ascii_lowercase();
    if digits.ends_with('j') || digits.ends_with('l') {
        return None;
    }

    let parsed = if let Some(hex) = digits.strip_prefix("0x") {
        i128::from_str_radix(hex, 16)
    } else if let Some(oct) = digits.strip_prefix("0o") {
        i128::from_str_radix(oct, 8)
    } else if let Some(bin) = digits.strip_prefix("0b") {
        i128::from_str_radix(bin, 2)
    } else {
        digits.parse::<i128>()
    };
    integer_json(parsed.ok()?)
}

fn integer_json(value: i128) -> Option<Value> {
    if let Ok(small) = i64::try_from(value) {
        Some(Value::Number(small.into()))
    } else {
        u64::try_from(value).ok().map(|big| Value::Number(big.into()))
    }
}

fn float_value(text: &str) -> Option<Value> {
    let digits = text.replace('_', "").to_ascii_lowercase();
    if digits.ends_with('j') {
        return None;
    }
    let value: f64 = digits.parse().ok()?;
    Number::from_f64(value).map(Value::Number)
}

fn negate(value: &Value) -> Option<Value> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(i) = number.as_i64() {
        integer_json(-i128::from(i))
    } else if let Some(u) = number.as_u64() {
        integer_json(-i128::from(u))
    } else {
        Number::from_f64(-number.as_f64()?).map(Value::Number)
    }
}

/// Apply Python escape sequences of a non-raw string body
fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            out.push('\\');
            break;
        };
        match escaped {
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0B}'),
            '0'..='7' => {
                let mut code = escaped.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(digit) => {
                            code = code * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.extend(char::from_u32(code));
            }
            'x' => push_hex(&mut out, &mut chars, 2, "\\x"),
            'u' => push_hex(&mut out, &mut chars, 4, "\\u"),
            'U' => push_hex(&mut out, &mut chars, 8, "\\U"),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    out
}

fn push_hex(
    out: &mut String,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    width: usize,
    marker: &str,
) {
    let mut digits = String::with_capacity(width);
    while digits.len() < width {
        match chars.peek() {
            Some(d) if d.is_ascii_hexdigit() => {
                digits.push(*d);
                chars.next();
            }
            _ => break,
        }
    }
    let decoded = (digits.len() == width)
        .then(|| u32::from_str_radix(&digits, 16).ok())
        .flatten()
        .and_then(char::from_u32);
    match decoded {
        Some(c) => out.push(c),
        None => {
            out.push_str(marker);
            out.push_str(&digits);
        }
    }
}
