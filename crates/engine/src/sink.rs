// crates/engine/src/sink.rs
use crate::error::{EngineError, Result};
use crate::options::{OutputFormat, OutputTarget};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use wordfreq_core::rank::{self, RankEntry, RankSink};

const OUT_BUFFER_SIZE: usize = 128 * 1024;

#[derive(Serialize)]
struct JsonEntry<'a> {
    word: &'a str,
    count: u32,
}

/// [`RankSink`] writing one of the [`OutputFormat`]s to any writer.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
    format: OutputFormat,
    written: usize,
}

impl<W: Write> WriterSink<W> {
    pub const fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            writer,
            format,
            written: 0,
        }
    }

    /// Lines (or JSON objects) written so far.
    #[must_use]
    pub const fn written(&self) -> usize {
        self.written
    }

    /// Closes the JSON array if needed, flushes, and hands the writer back.
    ///
    /// # Errors
    ///
    /// The writer's I/O error.
    pub fn finish(mut self) -> io::Result<W> {
        if self.format == OutputFormat::Json {
            if self.written == 0 {
                self.writer.write_all(b"[")?;
            }
            self.writer.write_all(b"]\n")?;
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> RankSink for WriterSink<W> {
    type Error = io::Error;

    fn emit(&mut self, entry: &RankEntry<'_>) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(self.writer, "{} {}", entry.count, entry.word_str())?;
            }
            OutputFormat::Tsv => {
                writeln!(self.writer, "{}\t{}", entry.word_str(), entry.count)?;
            }
            OutputFormat::Json => {
                self.writer
                    .write_all(if self.written == 0 { b"[" } else { b"," })?;
                serde_json::to_writer(
                    &mut self.writer,
                    &JsonEntry {
                        word: entry.word_str(),
                        count: entry.count,
                    },
                )?;
            }
        }
        self.written += 1;
        Ok(())
    }
}

/// Writes `entries` to `target` in `format`.
///
/// # Errors
///
/// [`EngineError::OutputWrite`] naming the target on any I/O failure.
pub fn write_ranked(entries: &[RankEntry<'_>], format: OutputFormat, target: &OutputTarget) -> Result<()> {
    let to_error = |source: io::Error| EngineError::OutputWrite {
        path: target.display_path(),
        source,
    };
    match target {
        OutputTarget::Stdout => {
            let stdout = io::stdout().lock();
            write_all(entries, format, BufWriter::with_capacity(OUT_BUFFER_SIZE, stdout))
                .map_err(to_error)
        }
        OutputTarget::Path(path) => {
            let file = File::create(path).map_err(to_error)?;
            write_all(entries, format, BufWriter::with_capacity(OUT_BUFFER_SIZE, file))
                .map_err(to_error)
        }
    }
}

fn write_all<W: Write>(entries: &[RankEntry<'_>], format: OutputFormat, writer: W) -> io::Result<()> {
    let mut sink = WriterSink::new(writer, format);
    rank::emit(entries, &mut sink)?;
    sink.finish().map(drop)
}
