use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csvforge_core::{CellValue, Dataset};

use crate::errors::GenerationError;

/// Quote `value` when it holds a delimiter, a line break or a quote.
///
/// Internal quotes are doubled. Values that need no quoting are borrowed.
pub fn escape_csv(value: &str) -> Cow<'_, str> {
    if !value.contains([',', '\n', '\r', '"']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('"');
    for ch in value.chars() {
        if ch == '"' {
            escaped.push('"');
        }
        escaped.push(ch);
    }
    escaped.push('"');
    Cow::Owned(escaped)
}

/// Header plus one line per row, joined by `\n`, without a trailing newline.
///
/// A record made of a single empty field is written as `""` so the line is
/// not mistaken for a blank one when read back.
pub fn serialize(dataset: &Dataset) -> Result<String, GenerationError> {
    let bytes = encode(dataset)?;
    String::from_utf8(bytes).map_err(|err| GenerationError::MalformedCsv(err.to_string()))
}

/// Write [`serialize`] output to `path`, returning the bytes written.
pub fn write_dataset_csv(path: &Path, dataset: &Dataset) -> Result<u64, GenerationError> {
    let bytes = encode(dataset)?;
    let mut writer = CountingWriter::new(BufWriter::new(File::create(path)?));
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(writer.bytes_written())
}

fn encode(dataset: &Dataset) -> Result<Vec<u8>, csv::Error> {
    if dataset.column_count() == 0 {
        return Ok(Vec::new());
    }
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(dataset.columns())?;
    for row in dataset.rows() {
        writer.write_record(row.iter().map(CellValue::to_csv))?;
    }

    writer.flush()?;
    let mut bytes = writer.into_inner().map_err(|err| err.into_error())?;
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }
    Ok(bytes)
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_values_are_borrowed() {
        assert!(matches!(escape_csv("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn quotes_are_doubled() {
        assert_eq!(escape_csv("a,b\"c"), "\"a,b\"\"c\"");
        assert_eq!(escape_csv("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn missing_cells_serialize_empty() {
        let dataset = Dataset::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![CellValue::Missing, CellValue::Int(2)]],
        )
        .expect("dataset");
        assert_eq!(serialize(&dataset).expect("serialize"), "a,b\n,2");
    }

    #[test]
    fn lone_empty_field_is_quoted() {
        let dataset = Dataset::new(
            vec!["a".to_string()],
            vec![
                vec![CellValue::Text("x".to_string())],
                vec![CellValue::Missing],
            ],
        )
        .expect("dataset");
        assert_eq!(serialize(&dataset).expect("serialize"), "a\nx\n\"\"");
    }

    #[test]
    fn writer_matches_escape_rule() {
        let fields = ["a,b\"c", "plain", "x\ny", "r\rs", " sp "];
        let dataset = Dataset::new(
            fields.iter().map(|field| field.to_string()).collect(),
            Vec::new(),
        )
        .expect("dataset");
        let expected: Vec<String> = fields
            .iter()
            .map(|field| escape_csv(field).into_owned())
            .collect();
        assert_eq!(serialize(&dataset).expect("serialize"), expected.join(","));
    }
}
