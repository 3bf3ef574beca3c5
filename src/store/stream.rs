//! Buffered stream helpers

use crate::{Error, Result, BUFFER_SIZE};
use std::io::{self, Read, Write};

/// Copy every byte from `source` to `destination` through a fixed
/// [`BUFFER_SIZE`] buffer. Returns the number of bytes copied.
///
/// Neither stream is closed; both stay owned by the caller.
pub fn copy_stream<R, W>(source: &mut R, destination: &mut W) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    Ok(pump(source, destination)?)
}

/// Read a stream to its end and decode it as UTF-8
pub fn read_to_string<R: Read + ?Sized>(source: &mut R) -> Result<String> {
    let bytes = read_bytes(source)?;
    decode(bytes, "input stream")
}

pub(crate) fn pump<R, W>(source: &mut R, destination: &mut W) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buffer = [0u8; BUFFER_SIZE];
    let mut total = 0u64;
    loop {
        let read = match source.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        destination.write_all(&buffer[..read])?;
        total += read as u64;
    }
    destination.flush()?;
    Ok(total)
}

pub(crate) fn read_bytes<R: Read + ?Sized>(source: &mut R) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    pump(source, &mut bytes)?;
    Ok(bytes)
}

/// Strict UTF-8; `origin` names the file or asset for the error
pub(crate) fn decode(bytes: Vec<u8>, origin: &str) -> Result<String> {
    String::from_utf8(bytes).map_err(|_| Error::Decode(origin.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Hands out at most `chunk` bytes per read and fails once `fail_after` is reached
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        chunk: usize,
        fail_after: Option<usize>,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if let Some(limit) = self.fail_after {
                if self.pos >= limit {
                    return Err(io::Error::new(io::ErrorKind::Other, "device went away"));
                }
            }
            let end = (self.pos + self.chunk.min(buf.len())).min(self.data.len());
            let n = end - self.pos;
            buf[..n].copy_from_slice(&self.data[self.pos..end]);
            self.pos = end;
            Ok(n)
        }
    }

    #[test]
    fn test_copy_stream_larger_than_buffer() {
        let data: Vec<u8> = (0..(BUFFER_SIZE * 3 + 17)).map(|i| (i % 251) as u8).collect();
        let mut source = Cursor::new(data.clone());
        let mut sink = Vec::new();

        let copied = copy_stream(&mut source, &mut sink).unwrap();

        assert_eq!(copied, data.len() as u64);
        assert_eq!(sink, data);
    }

    #[test]
    fn test_copy_stream_leaves_streams_usable() {
        let mut source = Cursor::new(b"abc".to_vec());
        let mut sink = Vec::new();
        copy_stream(&mut source, &mut sink).unwrap();

        sink.extend_from_slice(b"def");
        assert_eq!(sink, b"abcdef");
        assert_eq!(source.position(), 3);
    }

    #[test]
    fn test_copy_stream_propagates_read_error() {
        let mut source = Trickle {
            data: vec![7; 100],
            pos: 0,
            chunk: 10,
            fail_after: Some(30),
        };
        let mut sink = Vec::new();

        let err = copy_stream(&mut source, &mut sink).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(sink.len(), 30);
    }

    #[test]
    fn test_read_to_string_handles_split_multibyte() {
        let text = "héllo wörld ✓ ".repeat(1000);
        let mut source = Trickle {
            data: text.as_bytes().to_vec(),
            pos: 0,
            chunk: 3,
            fail_after: None,
        };

        assert_eq!(read_to_string(&mut source).unwrap(), text);
    }

    #[test]
    fn test_read_to_string_rejects_invalid_utf8() {
        let mut source = Cursor::new(vec![0x66, 0x6f, 0xff, 0x6f]);
        let err = read_to_string(&mut source).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}
