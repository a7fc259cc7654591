use std::io::{self, ErrorKind, Write};

/// Write `text` followed by a newline.
///
/// A closed reader (`saw-rank rank --format tsv | head -1`) is not an error:
/// `BrokenPipe` is swallowed and the remaining output is dropped.
pub fn write_line<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    match writeln!(out, "{}", text) {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

/// [`write_line`] to stdout
pub fn print_line(text: &str) -> io::Result<()> {
    write_line(&mut io::stdout().lock(), text)
}
