//! Response body decoding.
//!
//! The declared `Content-Type` charset wins. Without one, the encoding is
//! guessed from a byte order mark, then from the XML declaration, and
//! finally defaults to UTF-8.

use encoding_rs::{Encoding, UTF_8};

/// How far into the body the XML declaration may end.
const XML_DECL_LIMIT: usize = 256;

/// Decode a response body to text.
pub fn decode_body(content_type: Option<&str>, bytes: &[u8]) -> String {
    let encoding = content_type
        .and_then(declared_charset)
        .or_else(|| Encoding::for_bom(bytes).map(|(encoding, _)| encoding))
        .or_else(|| xml_declared_encoding(bytes))
        .unwrap_or(UTF_8);

    // decode() strips a BOM and lets it override the chosen encoding
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::warn!(encoding = used.name(), "response body had undecodable bytes");
    }
    text.into_owned()
}

/// Charset parameter of a `Content-Type` value, if it names a known encoding.
fn declared_charset(content_type: &str) -> Option<&'static Encoding> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        Encoding::for_label(value.trim().trim_matches('"').as_bytes())
    })
}

/// `encoding="..."` from a leading `<?xml ... ?>` declaration.
fn xml_declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(XML_DECL_LIMIT)];
    if !head.starts_with(b"<?xml") {
        return None;
    }
    let end = head.windows(2).position(|w| w == b"?>")?;
    let decl = &head[..end];

    let at = decl.windows(8).position(|w| w == b"encoding")?;
    let rest = &decl[at + 8..];
    let rest = &rest[rest.iter().position(|&b| b == b'=')? + 1..];
    let rest = &rest[rest.iter().position(|&b| !b.is_ascii_whitespace())?..];
    let (&quote, rest) = rest.split_first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let label = &rest[..rest.iter().position(|&b| b == quote)?];
    Encoding::for_label(label)
}
