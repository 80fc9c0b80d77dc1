use chrono::{DateTime, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Decodes the HTML character references WordPress leaves in rendered
/// fields, e.g. "A &amp; B" or "It&#8217;s". References that cannot be
/// resolved are kept untouched.
pub fn unescape_entities(text: &str) -> String {
    lazy_static! {
        static ref ENTITY_REGEX: Regex = Regex::new(
            r"&(?:#[xX](?P<hex>[0-9a-fA-F]{1,6})|#(?P<dec>[0-9]{1,7})|(?P<name>[a-zA-Z][a-zA-Z0-9]{1,31}));"
        ).unwrap();
    }

    ENTITY_REGEX
        .replace_all(text, |caps: &Captures| {
            let decoded = if let Some(hex) = caps.name("hex") {
                u32::from_str_radix(hex.as_str(), 16)
                    .ok()
                    .and_then(char::from_u32)
                    .map(String::from)
            } else if let Some(dec) = caps.name("dec") {
                dec.as_str()
                    .parse::<u32>()
                    .ok()
                    .and_then(char::from_u32)
                    .map(String::from)
            } else {
                named_entity(&caps["name"]).map(String::from)
            };

            decoded.unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<&'static str> {
    let decoded = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "laquo" => "\u{ab}",
        "raquo" => "\u{bb}",
        "hellip" => "\u{2026}",
        "middot" => "\u{b7}",
        "copy" => "\u{a9}",
        "reg" => "\u{ae}",
        "trade" => "\u{2122}",
        "deg" => "\u{b0}",
        "plusmn" => "\u{b1}",
        "times" => "\u{d7}",
        "divide" => "\u{f7}",
        "sect" => "\u{a7}",
        "para" => "\u{b6}",
        "euro" => "\u{20ac}",
        "pound" => "\u{a3}",
        "cent" => "\u{a2}",
        "yen" => "\u{a5}",
        _ => return None,
    };
    Some(decoded)
}

/// Parses the date format of the *_gmt fields, e.g. 2020-01-02T03:04:05
pub fn parse_gmt_date_time(buf: &str) -> Result<DateTime<Utc>, String> {
    let naive = NaiveDateTime::parse_from_str(buf, "%Y-%m-%dT%H:%M:%S")
        .map_err(|_| format!("Unable to parse date time {}", buf))?;
    Ok(naive.and_utc())
}
