//! Read helper shared by the encrypt and decrypt loops

use tokio::io::{AsyncRead, AsyncReadExt};

/// Read until `buf` is full or the stream ends; returns the bytes read.
///
/// Unlike `read_exact`, end of stream is not an error here; the callers
/// decide whether a short count means "last chunk" or "truncated container".
pub(crate) async fn read_full<R>(input: &mut R, buf: &mut [u8]) -> std::io::Result<usize>
where
    R: AsyncRead + Unpin,
{
    let mut filled = 0;
    while filled < buf.len() {
        let n = input.read(&mut buf[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
