//! Progress reporting for reading container files.
//!
//! The bar is attached to a tracing span through `tracing-indicatif`, so it shares
//! stderr with the log output without the two garbling each other.
//! See <https://docs.rs/indicatif> for the template keys.

use std::io::Read;
use std::time::Instant;

use indicatif::{style::TemplateError, HumanBytes, HumanDuration, ProgressStyle};
use tracing::{info, info_span, span::EnteredSpan};
use tracing_indicatif::span_ext::IndicatifSpanExt;

/// Wraps a reader and advances a progress bar by every byte that is read through it.
pub struct ReadProgress<R: Read> {
    /// Expected number of bytes
    pub total: u64,
    /// Bytes read so far
    pub read: u64,
    reader: R,
    span: EnteredSpan,
    started: Instant,
    finished: bool,
}

impl<R: Read> ReadProgress<R> {
    pub fn new(reader: R, total: u64, name: &str) -> Result<Self, TemplateError> {
        let style = ProgressStyle::with_template(
            "{wide_bar} {binary_bytes}/{binary_total_bytes}  [est. {eta} remaining]",
        )?;
        let span = info_span!("read", file = name);
        span.pb_set_style(&style);
        span.pb_set_length(total);

        Ok(Self {
            total,
            read: 0,
            reader,
            span: span.entered(),
            started: Instant::now(),
            finished: false,
        })
    }

    fn update(&mut self, delta: u64) {
        self.span.pb_inc(delta);
        if !self.finished && (delta == 0 || self.read == self.total) {
            self.finished = true;
            let elapsed = self.started.elapsed();
            let rate = self.read as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
            info!(
                "read {} in {} ({}/s avg)",
                HumanBytes(self.read),
                HumanDuration(elapsed),
                HumanBytes(rate as u64)
            );
        }
    }
}

impl<R: Read> Read for ReadProgress<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.reader.read(buf)?;
        self.read += n as u64;
        self.update(n as u64);
        Ok(n)
    }
}
