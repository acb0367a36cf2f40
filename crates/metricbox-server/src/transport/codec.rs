//! Line framing for the TCP transport.
//!
//! - Inbound bytes => one `Inbound::Line` per `\n` (trailing `\r` stripped)
//! - Lines longer than the configured limit => a single `Inbound::Overlong`;
//!   the rest of that line is discarded and framing resumes after its `\n`
//! - Lines that are not UTF-8 => `Inbound::NotUtf8`; the line is consumed
//! - Outbound `Reply` => its wire form plus `\n`

use std::fmt::Write;

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder, LinesCodec, LinesCodecError};

use metricbox_core::error::MetricsError;
use metricbox_core::protocol::Reply;

#[derive(Debug, PartialEq, Eq)]
pub enum Inbound {
    Line(String),
    Overlong,
    NotUtf8,
}

#[derive(Debug, Clone)]
pub struct LineCodec {
    lines: LinesCodec,
}

impl LineCodec {
    pub fn new(max_line_bytes: usize) -> Self {
        Self {
            lines: LinesCodec::new_with_max_length(max_line_bytes),
        }
    }
}

fn map_lines(res: Result<Option<String>, LinesCodecError>) -> Result<Option<Inbound>, MetricsError> {
    match res {
        Ok(line) => Ok(line.map(Inbound::Line)),
        Err(LinesCodecError::MaxLineLengthExceeded) => Ok(Some(Inbound::Overlong)),
        Err(LinesCodecError::Io(e)) if e.kind() == std::io::ErrorKind::InvalidData => {
            Ok(Some(Inbound::NotUtf8))
        }
        Err(LinesCodecError::Io(e)) => Err(MetricsError::Io(e)),
    }
}

impl Decoder for LineCodec {
    type Item = Inbound;
    type Error = MetricsError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Inbound>, MetricsError> {
        map_lines(self.lines.decode(src))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Inbound>, MetricsError> {
        map_lines(self.lines.decode_eof(src))
    }
}

impl Encoder<Reply> for LineCodec {
    type Error = MetricsError;

    fn encode(&mut self, reply: Reply, dst: &mut BytesMut) -> Result<(), MetricsError> {
        writeln!(dst, "{reply}")
            .map_err(|e| MetricsError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))
    }
}
