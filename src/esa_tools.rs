// ESA Trace Reader Module

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EsaError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("unexpected end of file, missing {context} line")]
    UnexpectedEof { context: &'static str },

    #[error("wrong field count in {context} line, expected {expected}: {line}")]
    FieldCount {
        context: String,
        expected: usize,
        line: String,
    },

    #[error("error parsing {field}: {value}")]
    HeaderValue { field: &'static str, value: String },

    #[error("error parsing {field} at data point {index}: {value}")]
    DataValue {
        field: &'static str,
        index: usize,
        value: String,
    },

    #[error("data section has more rows than the declared {declared} points")]
    TooManyPoints { declared: usize },
}

pub type Result<T> = std::result::Result<T, EsaError>;

/// Frequency unit string as written by the instrument (e.g. "Hz").
#[derive(Default, Clone, Debug, PartialEq)]
pub struct FreqUnits(pub String);

/// Amplitude unit string as written by the instrument (e.g. "dBuV").
#[derive(Default, Clone, Debug, PartialEq)]
pub struct AmplitudeUnits(pub String);

/// Time unit string as written by the instrument (e.g. "s").
#[derive(Default, Clone, Debug, PartialEq)]
pub struct TimeUnits(pub String);

/// One capture's full metadata plus its frequency and amplitude sample
/// arrays, as decoded from an ESA trace export.
///
/// Unit strings are captured verbatim from the file; no normalization or
/// conversion is applied.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct Trace {
    pub timestamp: Option<String>,
    pub original_filename: String,
    pub title: String,
    pub model: String,
    pub serial_num: String,
    pub center_freq: f64,
    pub center_freq_units: FreqUnits,
    pub span: f64,
    pub span_units: FreqUnits,
    pub rbw: f64,
    pub rbw_units: FreqUnits,
    pub vbw: f64,
    pub vbw_units: FreqUnits,
    pub ref_level: f64,
    pub ref_level_units: AmplitudeUnits,
    pub sweep_time: f64,
    pub sweep_time_units: TimeUnits,
    pub num_points: usize,
    pub freq_label: String,
    pub trace1_label: String,
    pub trace2_label: String,
    pub trace3_label: String,
    pub freq_units: String,
    pub trace1_units: String,
    pub trace2_units: String,
    pub trace3_units: String,
    pub frequency: Vec<f64>,
    pub trace1: Vec<f64>,
    pub trace2: Vec<f64>,
    pub trace3: Vec<f64>,
}

/// Main ESA trace file reader
#[derive(Default)]
pub struct EsaFile {
    pub file_path: String,
    pub trace: Trace,
}

type LineReader = io::Lines<BufReader<File>>;

/// Pull the next line, treating EOF as an error naming the line we expected.
fn next_line(lines: &mut LineReader, context: &'static str) -> Result<String> {
    match lines.next() {
        Some(line) => Ok(line?),
        None => Err(EsaError::UnexpectedEof { context }),
    }
}

/// Split a line on commas and assert the field count.
///
/// The ESA export is not RFC 4180 CSV: there is no quoting and no escaping,
/// so a plain split is the whole grammar.
fn split_fields<'a>(line: &'a str, expected: usize, context: &str) -> Result<Vec<&'a str>> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != expected {
        return Err(EsaError::FieldCount {
            context: context.to_string(),
            expected,
            line: line.to_string(),
        });
    }
    Ok(fields)
}

/// Read a two-field header line and return the second field.
fn read_text_line(lines: &mut LineReader, context: &'static str) -> Result<String> {
    let line = next_line(lines, context)?;
    let fields = split_fields(&line, 2, context)?;
    Ok(fields[1].to_string())
}

/// Read a three-field header line (label, value, units) and return the
/// parsed value together with the trimmed units string.
fn read_value_line(lines: &mut LineReader, context: &'static str) -> Result<(f64, String)> {
    let line = next_line(lines, context)?;
    let fields = split_fields(&line, 3, context)?;
    let value = fields[1].parse().map_err(|_| EsaError::HeaderValue {
        field: context,
        value: fields[1].to_string(),
    })?;
    Ok((value, fields[2].trim().to_string()))
}

fn parse_point(field: &str, name: &'static str, index: usize) -> Result<f64> {
    field.trim().parse().map_err(|_| EsaError::DataValue {
        field: name,
        index,
        value: field.trim().to_string(),
    })
}

impl EsaFile {
    /// Create a new EsaFile instance
    pub fn new() -> Self {
        EsaFile::default()
    }

    /// Load an ESA trace export from the given path.
    ///
    /// On error the fields parsed before the failure remain in `self.trace`,
    /// so callers can inspect how far the file got before it broke.
    pub fn load_file<P: AsRef<Path>>(&mut self, input_file: P) -> Result<()> {
        self.file_path = input_file.as_ref().to_string_lossy().to_string();
        self.trace = Trace::default();

        let file = File::open(&input_file)?;
        let mut lines = BufReader::new(file).lines();

        // Line 1: timestamp and original filename. The timestamp field is
        // unreliable across firmware revisions, so it is kept verbatim.
        let line = next_line(&mut lines, "first")?;
        let fields = split_fields(&line, 2, "first")?;
        let stamp = fields[0].trim();
        self.trace.timestamp = (!stamp.is_empty()).then(|| stamp.to_string());
        self.trace.original_filename = fields[1].to_string();

        self.trace.title = read_text_line(&mut lines, "title")?;
        self.trace.model = read_text_line(&mut lines, "model")?;

        // The instrument pads the serial number with a NUL byte.
        let serial = read_text_line(&mut lines, "serial number")?;
        self.trace.serial_num = serial.strip_suffix('\0').unwrap_or(&serial).to_string();

        let (value, units) = read_value_line(&mut lines, "center frequency")?;
        self.trace.center_freq = value;
        self.trace.center_freq_units = FreqUnits(units);

        let (value, units) = read_value_line(&mut lines, "span")?;
        self.trace.span = value;
        self.trace.span_units = FreqUnits(units);

        let (value, units) = read_value_line(&mut lines, "rbw")?;
        self.trace.rbw = value;
        self.trace.rbw_units = FreqUnits(units);

        let (value, units) = read_value_line(&mut lines, "vbw")?;
        self.trace.vbw = value;
        self.trace.vbw_units = FreqUnits(units);

        let (value, units) = read_value_line(&mut lines, "ref level")?;
        self.trace.ref_level = value;
        self.trace.ref_level_units = AmplitudeUnits(units);

        let (value, units) = read_value_line(&mut lines, "sweep time")?;
        self.trace.sweep_time = value;
        self.trace.sweep_time_units = TimeUnits(units);

        let points = read_text_line(&mut lines, "num of points")?;
        self.trace.num_points = points.parse().map_err(|_| EsaError::HeaderValue {
            field: "num of points",
            value: points.clone(),
        })?;

        // Lines 12 and 13 are blank separators, skipped without validation.
        for _ in 0..2 {
            if let Some(line) = lines.next() {
                line?;
            }
        }

        // Column labels and units for the data section.
        let line = next_line(&mut lines, "column labels")?;
        let fields = split_fields(&line, 4, "column labels")?;
        self.trace.freq_label = fields[0].to_string();
        self.trace.trace1_label = fields[1].to_string();
        self.trace.trace2_label = fields[2].to_string();
        self.trace.trace3_label = fields[3].to_string();

        let line = next_line(&mut lines, "column units")?;
        let fields = split_fields(&line, 4, "column units")?;
        self.trace.freq_units = fields[0].trim().to_string();
        self.trace.trace1_units = fields[1].trim().to_string();
        self.trace.trace2_units = fields[2].trim().to_string();
        self.trace.trace3_units = fields[3].trim().to_string();

        // Data section. The declared point count is the array capacity;
        // a short file leaves trailing entries at zero.
        let num_points = self.trace.num_points;
        self.trace.frequency = vec![0.0; num_points];
        self.trace.trace1 = vec![0.0; num_points];
        self.trace.trace2 = vec![0.0; num_points];
        self.trace.trace3 = vec![0.0; num_points];

        let mut index = 0;
        for line in &mut lines {
            let line = line?;
            if index >= num_points {
                return Err(EsaError::TooManyPoints {
                    declared: num_points,
                });
            }
            let fields = split_fields(&line, 4, &format!("data point {}", index))?;
            self.trace.frequency[index] = parse_point(fields[0], "frequency", index)?;
            self.trace.trace1[index] = parse_point(fields[1], "trace 1", index)?;
            self.trace.trace2[index] = parse_point(fields[2], "trace 2", index)?;
            self.trace.trace3[index] = parse_point(fields[3], "trace 3", index)?;
            index += 1;
        }

        Ok(())
    }

    /// Get the sample data for one of the three trace columns (1 to 3)
    pub fn get_trace(&self, trace_num: u32) -> Option<&[f64]> {
        match trace_num {
            1 => Some(&self.trace.trace1),
            2 => Some(&self.trace.trace2),
            3 => Some(&self.trace.trace3),
            _ => None,
        }
    }
}
