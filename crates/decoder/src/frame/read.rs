//! Read — assembly of exactly one frame from the byte source.

use tokio::io::{AsyncRead, AsyncReadExt};

use super::model::{Frame, FRAME_LEN};
use super::POLL_DELAY;

/// Read exactly one 8-byte frame, tolerating split and zero-byte reads.
///
/// A zero-byte read is not end-of-stream on a live serial line, only an
/// empty poll; it is retried after the poll delay. The logical operation
/// blocks until a full frame is assembled.
pub async fn read_frame<R>(source: &mut R) -> std::io::Result<Frame>
where
    R: AsyncRead + Unpin,
{
    let mut raw = [0u8; FRAME_LEN];
    let mut filled = 0;

    while filled < FRAME_LEN {
        let n = source.read(&mut raw[filled..]).await?;
        if n == 0 {
            tokio::time::sleep(POLL_DELAY).await;
            continue;
        }
        filled += n;
    }

    Ok(Frame::from_bytes(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::io::Builder;

    #[tokio::test]
    async fn read_one_frame() {
        let raw = [0x01, 0x00, 0x39, 0x00, 0x78, 0x56, 0x34, 0x12];
        let mut source = Builder::new().read(&raw).build();

        let frame = read_frame(&mut source).await.expect("frame");
        assert_eq!(frame.token_word, 0x0039_0001);
        assert_eq!(frame.param_word, 0x1234_5678);
    }

    #[tokio::test]
    async fn read_assembles_split_frame() {
        let raw = [0x01, 0x00, 0x39, 0x00, 0x78, 0x56, 0x34, 0x12];
        let mut source = Builder::new()
            .read(&raw[..1])
            .read(&raw[1..5])
            .read(&raw[5..])
            .build();

        let frame = read_frame(&mut source).await.expect("frame");
        assert_eq!(frame.token_word, 0x0039_0001);
        assert_eq!(frame.param_word, 0x1234_5678);
    }

    #[tokio::test]
    async fn read_propagates_io_error() {
        let mut source = Builder::new()
            .read_error(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"))
            .build();

        assert!(read_frame(&mut source).await.is_err());
    }
}
