use std::io::{self, BufRead};

/// Reads one line without its terminator. `None` at end of input.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so a
/// stray Latin-1 file name only garbles that line.
pub fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();

    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }

    while matches!(buf.last(), Some(b'\n' | b'\r')) {
        buf.pop();
    }

    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}
