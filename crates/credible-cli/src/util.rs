use std::{
    fs::File,
    io::{self, BufRead, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Writes samples as plain text, one value per line.
///
/// Values are printed with the shortest representation that parses back to
/// the same `f64`.
pub fn write_samples<W>(writer: &mut W, samples: &[f64]) -> io::Result<()>
where
    W: io::Write,
{
    for value in samples {
        writeln!(writer, "{value}")?;
    }
    writer.flush()
}

/// Parses a plain-text sample list, one value per line.
///
/// Surrounding whitespace is trimmed; blank lines and lines starting with `#`
/// are skipped.
pub fn parse_samples<R>(reader: R) -> anyhow::Result<Vec<f64>>
where
    R: BufRead,
{
    let mut samples = vec![];
    for (line_idx, line) in reader.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = line.with_context(|| format!("Failed to read line {line_no}"))?;
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let value = text
            .parse::<f64>()
            .with_context(|| format!("Invalid sample on line {line_no}: {text:?}"))?;
        samples.push(value);
    }
    Ok(samples)
}

/// Read a sample file with one value per line
pub fn read_samples_file<P>(path: P) -> anyhow::Result<Vec<f64>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open sample file: {}", path.display()))?;
    parse_samples(io::BufReader::new(file))
        .with_context(|| format!("Failed to parse sample file: {}", path.display()))
}
