use bytes::Bytes;
use std::{collections::VecDeque, io, net::SocketAddr, time::Duration};

use crate::socket::Socket;

/// Scripted socket, replays read fragments and records every send.
#[derive(Debug, Default)]
pub(crate) struct MockSocket {
    reads: VecDeque<io::Result<Bytes>>,
    pub(crate) sent: Vec<Bytes>,
    pub(crate) receives: usize,
    pub(crate) fail_send: bool,
}

impl MockSocket {
    pub(crate) fn new<I, B>(fragments: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        Self {
            reads: fragments
                .into_iter()
                .map(|b| Ok(Bytes::copy_from_slice(b.as_ref())))
                .collect(),
            ..Default::default()
        }
    }

    pub(crate) fn split(input: &[u8], size: usize) -> Self {
        Self::new(input.chunks(size))
    }

    pub(crate) fn push_error(&mut self, kind: io::ErrorKind) {
        self.reads.push_back(Err(kind.into()));
    }

    pub(crate) fn written(&self) -> Vec<u8> {
        self.sent.concat()
    }
}

impl Socket for MockSocket {
    async fn receive_max(&mut self, max: usize, _: Duration) -> io::Result<Bytes> {
        self.receives += 1;
        match self.reads.pop_front() {
            None => Ok(Bytes::new()),
            Some(Err(err)) => Err(err),
            Some(Ok(mut chunk)) => {
                if chunk.len() > max {
                    let rest = chunk.split_off(max);
                    self.reads.push_front(Ok(rest));
                }
                Ok(chunk)
            }
        }
    }

    async fn send(&mut self, bytes: Bytes) -> io::Result<()> {
        if self.fail_send {
            return Err(io::ErrorKind::BrokenPipe.into());
        }
        self.sent.push(bytes);
        Ok(())
    }

    fn peer_addr(&self) -> io::Result<SocketAddr> {
        Ok(SocketAddr::from(([127, 0, 0, 1], 49152)))
    }

    fn local_addr(&self) -> io::Result<SocketAddr> {
        Ok(SocketAddr::from(([127, 0, 0, 1], 3000)))
    }
}
