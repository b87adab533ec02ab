//! Line splitting with CRLF normalization.

/// Iterator over the lines of a byte buffer.
///
/// Lines are separated by `\n`. One trailing `\r` is stripped from each
/// line. A terminator at the very end of the buffer does not start another
/// line, so `b"a\n"` yields one line and `b""` yields none.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    remaining: Option<&'a [u8]>,
}

impl<'a> Lines<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            remaining: if data.is_empty() { None } else { Some(data) },
        }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let data = self.remaining?;

        let line = match data.iter().position(|&b| b == b'\n') {
            Some(pos) => {
                let rest = &data[pos + 1..];
                self.remaining = if rest.is_empty() { None } else { Some(rest) };
                &data[..pos]
            }
            None => {
                self.remaining = None;
                data
            }
        };

        Some(strip_cr(line))
    }
}

/// Strip a single trailing carriage return.
#[inline]
pub fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}
