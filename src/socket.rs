//! Transport port consumed by the adapter.
use bytes::{BufMut, Bytes, BytesMut};
use std::{io, net::SocketAddr, time::Duration};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;


/// Upper bound of a single allocation made by [`Socket::receive`].
pub const READ_CAP: usize = 64 * 1024;

/// Connected, exclusively owned byte stream.
///
/// A read that outlives its timeout fails with [`io::ErrorKind::TimedOut`], an empty [`Bytes`]
/// means the peer closed its write half.
pub trait Socket: Send {
    /// Receive at most `max` bytes, waiting no longer than `timeout`.
    fn receive_max(
        &mut self,
        max: usize,
        timeout: Duration,
    ) -> impl Future<Output = io::Result<Bytes>> + Send;

    /// Receive whatever is available, bounded by [`READ_CAP`].
    fn receive(&mut self, timeout: Duration) -> impl Future<Output = io::Result<Bytes>> + Send {
        self.receive_max(READ_CAP, timeout)
    }

    /// Write all of `bytes`.
    fn send(&mut self, bytes: Bytes) -> impl Future<Output = io::Result<()>> + Send;

    /// Remote address.
    fn peer_addr(&self) -> io::Result<SocketAddr>;

    /// Local address.
    fn local_addr(&self) -> io::Result<SocketAddr>;
}

impl Socket for TcpStream {
    async fn receive_max(&mut self, max: usize, timeout: Duration) -> io::Result<Bytes> {
        let max = max.clamp(1, READ_CAP);
        let mut buf = BytesMut::with_capacity(max);

        let read = {
            let mut limited = (&mut buf).limit(max);
            tokio::time::timeout(timeout, self.read_buf(&mut limited)).await
        };

        match read {
            Ok(read) => {
                read?;
                Ok(buf.freeze())
            }
            Err(_) => Err(io::ErrorKind::TimedOut.into()),
        }
    }

    async fn send(&mut self, bytes: Bytes) -> io::Result<()> {
        self.write_all(&bytes).await
    }

    fn peer_addr(&self) -> io::Result<SocketAddr> {
        TcpStream::peer_addr(self)
    }

    fn local_addr(&self) -> io::Result<SocketAddr> {
        TcpStream::local_addr(self)
    }
}
