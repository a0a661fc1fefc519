//! Stateless string helpers shared by the classifier, synthesizer and renderers.

/// Repeat `s` `count` times.
pub fn repeat(s: &str, count: usize) -> String {
    s.repeat(count)
}

/// Spaces for an indentation column.
pub fn indent(width: usize) -> String {
    repeat(" ", width)
}

/// Drop a single leading space from every line.
///
/// Doc comments arrive with the space that followed the comment marker still
/// attached; this strips exactly one of them and leaves deeper indentation alone.
pub fn trim_leading_space(text: &str) -> String {
    text.split('\n')
        .map(|line| line.strip_prefix(' ').unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// UpperCamel / lowerCamel → lower-hyphen.
///
/// Every uppercase character starts a new word, so acronyms split letter by
/// letter: `getVPCId` → `get-v-p-c-id`.
pub fn camel_to_hyphen(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 && !out.ends_with('-') {
                out.push('-');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Attribute name for a member: hyphenated, with the getter prefix removed.
///
/// `getMaxSize` → `max-size`, `name` → `name`.
pub fn attribute_name(member: &str) -> String {
    let hyphenated = camel_to_hyphen(member);
    match hyphenated.strip_prefix("get-") {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => hyphenated,
    }
}

/// Collapse a trailing all-zero fraction: `5.0` → `5`, `5.50` → `5.50`.
pub fn trim_decimal(number: &str) -> String {
    match number.split_once('.') {
        Some((whole, fraction))
            if !whole.is_empty()
                && !fraction.is_empty()
                && fraction.chars().all(|c| c == '0') =>
        {
            whole.to_string()
        }
        _ => number.to_string(),
    }
}

/// Join items as `a, b and c` (or `a, b or c`).
pub fn join_natural(items: &[String], last_separator: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} {} {}", init.join(", "), last_separator, last),
    }
}

/// Wrap in reST inline-literal delimiters.
pub fn literal(text: &str) -> String {
    format!("``{}``", text)
}

/// Simple name of a possibly qualified (and possibly generic) type name.
///
/// `java.util.List<java.lang.String>` → `List`, `gyro.aws.Foo` → `Foo`.
pub fn simple_name(qualified: &str) -> &str {
    let raw = qualified.split('<').next().unwrap_or(qualified).trim();
    raw.rsplit('.').next().unwrap_or(raw)
}
