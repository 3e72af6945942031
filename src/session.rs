//! The session driver: reads length-prefixed frames from a byte stream,
//! hands them to the codec and dispatcher, and writes the response back.
//!
//! This is the "external collaborator" the core command pipeline assumes:
//! it performs all the I/O and blocking, while [`dispatch::dispatch`]
//! remains pure. Generic over `Read + Write` so it can be driven by a
//! `TcpStream` in production and an in-memory cursor in tests.

use std::io::{self, Read, Write};

use crate::context::Context;
use crate::dispatch::dispatch;
use crate::message::commands::parse_body;
use crate::message::frame::{decode_frame, encode_frame};

/// Read one 2-byte-length-prefixed frame from `stream`, or `Ok(None)` on a
/// clean EOF before any bytes of a new frame arrive.
fn read_frame<R: Read>(stream: &mut R) -> io::Result<Option<Vec<u8>>> {
    let mut len_buf = [0u8; 2];
    match stream.read_exact(&mut len_buf) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }
    let len = u16::from_be_bytes(len_buf) as usize;
    let mut body = vec![0u8; len];
    stream.read_exact(&mut body)?;

    let mut frame = Vec::with_capacity(2 + len);
    frame.extend_from_slice(&len_buf);
    frame.extend_from_slice(&body);
    Ok(Some(frame))
}

/// Drive one connection to completion: read frames until the peer closes
/// the stream, dispatching each to a response and writing it back in
/// order. Framing and CA-translation failures are logged and the
/// offending frame is skipped; the connection is not closed because of
/// them.
pub fn run_session<S: Read + Write>(stream: &mut S, ctx: &Context, peer: &str) -> io::Result<()> {
    loop {
        let frame = match read_frame(stream)? {
            Some(f) => f,
            None => {
                log::info!("connection closed by peer: {peer}");
                return Ok(());
            }
        };

        let (command_code, body) = match decode_frame(&frame, ctx.header()) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::warn!("dropping malformed frame from {peer}: {e}");
                continue;
            }
        };

        let request = parse_body(command_code, body);
        log::debug!("{peer} >> {command_code}");

        let response_fields = match dispatch(ctx, request) {
            Ok(fields) => fields,
            Err(e) => {
                log::warn!("dropping frame from {peer} after dispatch error: {e}");
                continue;
            }
        };

        log::trace!("{peer} << {}", response_fields.trace());
        let response = encode_frame(ctx.header(), &response_fields);
        stream.write_all(&response)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_session_responds_to_diagnostics() {
        let ctx = Context::default();
        let mut request = Vec::new();
        request.extend_from_slice(&2u16.to_be_bytes());
        request.extend_from_slice(b"NC");

        let mut stream = Cursor::new(request);
        let mut transcript = Vec::new();
        {
            let mut io_stream = ReadWriteCursor {
                inner: &mut stream,
                out: &mut transcript,
            };
            run_session(&mut io_stream, &ctx, "test").unwrap();
        }

        let response_len = u16::from_be_bytes([transcript[0], transcript[1]]) as usize;
        assert_eq!(response_len, transcript.len() - 2);
        assert_eq!(&transcript[2..4], b"ND");
        assert_eq!(&transcript[4..6], b"00");
    }

    #[test]
    fn test_session_preserves_response_order_across_two_requests() {
        let ctx = Context::default();
        let mut request = Vec::new();
        for _ in 0..2 {
            request.extend_from_slice(&2u16.to_be_bytes());
            request.extend_from_slice(b"NC");
        }

        let mut stream = Cursor::new(request);
        let mut transcript = Vec::new();
        {
            let mut io_stream = ReadWriteCursor {
                inner: &mut stream,
                out: &mut transcript,
            };
            run_session(&mut io_stream, &ctx, "test").unwrap();
        }

        // Both responses are "ND00..." and appear back to back, in order.
        let first = transcript.windows(2).position(|w| w == b"ND").unwrap();
        let second = transcript[first + 2..]
            .windows(2)
            .position(|w| w == b"ND")
            .unwrap();
        assert!(second > 0);
    }

    struct ReadWriteCursor<'a> {
        inner: &'a mut Cursor<Vec<u8>>,
        out: &'a mut Vec<u8>,
    }

    impl<'a> Read for ReadWriteCursor<'a> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl<'a> Write for ReadWriteCursor<'a> {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.out.extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
