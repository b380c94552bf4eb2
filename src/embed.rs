pub const BYTES_PER_LINE: usize = 20;

/// Formats `bytes` as the body of a C `unsigned char[]` initializer.
///
/// Every run of [`BYTES_PER_LINE`] bytes starts on a new line indented by
/// `indent` spaces. Each byte is written as `0x??, ` so the caller can
/// append its own terminator.
pub fn bytes_to_c_array(bytes: &[u8], indent: usize) -> String {
    let mut out = String::with_capacity(bytes.len() * 6 + bytes.len() / BYTES_PER_LINE * (indent + 1));
    for (index, b) in bytes.iter().enumerate() {
        if index % BYTES_PER_LINE == 0 {
            out.push('\n');
            out.push_str(&" ".repeat(indent));
        }
        out.push_str(&format!("0x{:02x}, ", b));
    }
    out
}

#[cfg(test)]
pub(crate) fn decode_c_array(text: &str) -> Vec<u8> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.strip_prefix("0x"))
        .filter_map(|s| u8::from_str_radix(s, 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_breaks_every_twenty_bytes() {
        let bytes: Vec<u8> = (0..45).collect();
        let text = bytes_to_c_array(&bytes, 4);
        let lines: Vec<&str> = text.split('\n').collect();
        // leading break, then ceil(45 / 20) lines
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "");
        assert!(lines[1].starts_with("    0x00, 0x01, "));
        assert_eq!(lines[1].matches("0x").count(), 20);
        assert_eq!(lines[3].matches("0x").count(), 5);
    }

    #[test]
    fn test_lossless_with_terminator() {
        let original = "name: \"a\"\n\tvalue: ÿ\n".as_bytes();
        let mut text = bytes_to_c_array(original, 12);
        text.push_str("0x0a, 0x00");
        let decoded = decode_c_array(&text);
        assert_eq!(&decoded[..original.len()], original);
        assert_eq!(&decoded[original.len()..], &[0x0a, 0x00]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(bytes_to_c_array(&[], 8), "");
    }
}
