// src/lib.rs
// ESA Reader Library - Public API

//! # ESA Reader
//!
//! A Rust library for reading Keysight/Agilent ESA spectrum analyzer trace
//! exports (E4402B, E4411B and friends).
//!
//! ## Features
//!
//! - Parse the fixed-format metadata header (model, serial number, sweep
//!   parameters, point count)
//! - Decode the frequency and trace-1/2/3 sample columns
//! - Capture column labels and raw unit strings
//! - Proper error handling, with the partially parsed record kept around
//!   for diagnostics when a file is malformed
//!
//! The export format looks like CSV but is not RFC 4180 compliant: there is
//! no field quoting and no escaping, and the header has a strict per-line
//! field count.
//!
//! ## Example
//!
//! ```no_run
//! use esa_reader::EsaFile;
//!
//! let mut esa = EsaFile::new();
//! esa.load_file("TRACE924.CSV").expect("Failed to load file");
//!
//! println!("Model: {}", esa.trace.model);
//! println!("Center frequency: {} {}", esa.trace.center_freq, esa.trace.center_freq_units.0);
//! println!("Points: {}", esa.trace.num_points);
//!
//! // Access a trace column
//! if let Some(trace) = esa.get_trace(1) {
//!     println!("First sample: {} {}", trace[0], esa.trace.trace1_units);
//! }
//! ```

mod esa_tools;

pub use esa_tools::{AmplitudeUnits, EsaError, EsaFile, FreqUnits, Result, TimeUnits, Trace};
