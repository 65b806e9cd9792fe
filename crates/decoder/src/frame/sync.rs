//! Sync — frame-boundary acquisition on the raw byte stream.

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use super::model::{FRAME_LEN, SYNC_SENTINEL};
use super::POLL_DELAY;

/// Block until the byte source yields the 8-byte all-ones sync sentinel.
///
/// Maintains a sliding window: when a full window does not match, exactly the
/// oldest byte is dropped and one more is read. This recovers from mid-stream
/// garbage and frame-boundary drift after a device reset. Zero-byte reads are
/// retried after a short poll delay. The await points make this cancellable
/// from a `select!` without losing stream state the caller cares about.
pub async fn sync<R>(source: &mut R) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut window = BytesMut::with_capacity(FRAME_LEN * 2);
    let mut chunk = [0u8; FRAME_LEN];

    loop {
        while window.len() < FRAME_LEN {
            let want = FRAME_LEN - window.len();
            let n = source.read(&mut chunk[..want]).await?;
            if n == 0 {
                tokio::time::sleep(POLL_DELAY).await;
                continue;
            }
            window.extend_from_slice(&chunk[..n]);
        }

        if (&window[..]).get_u64_le() == SYNC_SENTINEL {
            return Ok(());
        }
        window.advance(1);
    }
}
