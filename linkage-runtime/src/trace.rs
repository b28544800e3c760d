use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use linkage_core::Pose;

use crate::Error;

pub trait TraceWriter {
    /// Write a single serializable record.
    fn write_record<T: serde::Serialize>(&mut self, record: T) -> Result<(), Error>;
}

pub trait Tracer {
    type Instance: TraceWriter;

    fn from_path<P: AsRef<Path>>(path: P) -> Self;

    /// Open a trace writer for `name`.
    fn instance(&self, name: &str) -> Result<Self::Instance, Error>;
}

/// Record a value into a trace.
pub trait Trace<T: TraceWriter> {
    fn record(&self, writer: &mut T, timestamp: Duration) -> Result<(), Error>;
}

#[derive(serde_derive::Serialize)]
struct PoseTrace {
    /// Milliseconds since the session started.
    timestamp: u64,
    /// Joint index, 0 is the base.
    joint: usize,
    x: f64,
    y: f64,
}

impl<T: TraceWriter> Trace<T> for Pose {
    fn record(&self, writer: &mut T, timestamp: Duration) -> Result<(), Error> {
        for (joint, point) in self.points().iter().enumerate() {
            writer.write_record(PoseTrace {
                timestamp: timestamp.as_millis() as u64,
                joint,
                x: point.x,
                y: point.y,
            })?;
        }

        Ok(())
    }
}

pub struct NullTracer;

impl Tracer for NullTracer {
    type Instance = NullTracerInstance;

    fn from_path<P: AsRef<Path>>(_: P) -> Self {
        Self {}
    }

    fn instance(&self, _: &str) -> Result<Self::Instance, Error> {
        Ok(Self::Instance {})
    }
}

pub struct NullTracerInstance;

impl TraceWriter for NullTracerInstance {
    fn write_record<T: serde::Serialize>(&mut self, _: T) -> Result<(), Error> {
        Ok(())
    }
}

pub struct CsvTracer(PathBuf);

impl CsvTracer {
    /// Trace file for `name`.
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.0.join(name.to_owned() + "_trace0.csv")
    }
}

impl Tracer for CsvTracer {
    type Instance = CsvTracerInstance;

    fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self(path.as_ref().to_path_buf())
    }

    fn instance(&self, name: &str) -> Result<Self::Instance, Error> {
        let writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::NonNumeric)
            .has_headers(true)
            .from_path(self.file_path(name))?;

        Ok(Self::Instance { writer })
    }
}

pub struct CsvTracerInstance {
    writer: csv::Writer<std::fs::File>,
}

impl TraceWriter for CsvTracerInstance {
    fn write_record<T: serde::Serialize>(&mut self, record: T) -> Result<(), Error> {
        self.writer.serialize(record)?;
        self.writer.flush()?;

        Ok(())
    }
}
