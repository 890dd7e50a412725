//! Framed TCP transport for relay connections.
//!
//! Each frame is a little-endian `u32` length followed by that many bytes of
//! JSON. The codec never sees this layer; payloads cross it as opaque strings.

use std::net::SocketAddr;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener as TokioTcpListener, TcpStream, ToSocketAddrs};

use crate::relay::error::RelayError;
use crate::relay::message::Frame;

/// Largest frame accepted from a peer.
pub const MAX_FRAME_LEN: usize = 10 * 1024 * 1024;

/// Trait for bidirectional async frame transport.
#[async_trait]
pub trait FrameTransport: Send {
    /// Send a frame.
    async fn send(&mut self, frame: &Frame) -> Result<(), RelayError>;

    /// Receive a frame. Returns `RelayError::ConnectionClosed` on clean EOF.
    async fn receive(&mut self) -> Result<Frame, RelayError>;

    /// Flush and shut down the write side.
    async fn close(&mut self) -> Result<(), RelayError>;
}

/// Writes a length-prefixed frame.
pub async fn write_length_prefixed<W: AsyncWrite + Unpin>(
    writer: &mut W,
    data: &[u8],
) -> Result<(), RelayError> {
    if data.len() > MAX_FRAME_LEN {
        return Err(RelayError::Transport(format!(
            "Frame too large: {} bytes",
            data.len()
        )));
    }

    let len = data.len() as u32;
    writer.write_all(&len.to_le_bytes()).await?;
    writer.write_all(data).await?;
    writer.flush().await?;
    Ok(())
}

/// Reads a length-prefixed frame.
pub async fn read_length_prefixed<R: AsyncRead + Unpin>(
    reader: &mut R,
) -> Result<Vec<u8>, RelayError> {
    let mut len_bytes = [0u8; 4];
    match reader.read_exact(&mut len_bytes).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            return Err(RelayError::ConnectionClosed)
        }
        Err(e) => return Err(e.into()),
    }

    let len = u32::from_le_bytes(len_bytes) as usize;
    if len > MAX_FRAME_LEN {
        return Err(RelayError::Transport(format!(
            "Frame too large: {} bytes",
            len
        )));
    }

    let mut data = vec![0u8; len];
    reader.read_exact(&mut data).await?;
    Ok(data)
}

/// TCP connection carrying relay frames.
pub struct TcpConnection {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
    peer: SocketAddr,
}

impl TcpConnection {
    fn new(stream: TcpStream, peer: SocketAddr) -> Self {
        let (read_half, write_half) = stream.into_split();
        Self {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
            peer,
        }
    }

    /// Connects to a receiver.
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self, RelayError> {
        let stream = TcpStream::connect(addr).await?;
        let peer = stream.peer_addr()?;
        Ok(Self::new(stream, peer))
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }
}

#[async_trait]
impl FrameTransport for TcpConnection {
    async fn send(&mut self, frame: &Frame) -> Result<(), RelayError> {
        let data = frame.to_bytes()?;
        write_length_prefixed(&mut self.writer, &data).await
    }

    async fn receive(&mut self) -> Result<Frame, RelayError> {
        let data = read_length_prefixed(&mut self.reader).await?;
        Ok(Frame::from_bytes(&data)?)
    }

    async fn close(&mut self) -> Result<(), RelayError> {
        self.writer.shutdown().await?;
        Ok(())
    }
}

/// Source of inbound relay connections.
#[async_trait]
pub trait FrameListener: Send + Sync {
    type Connection: FrameTransport + 'static;

    /// Waits for the next connection and returns it with the peer address.
    async fn accept(&self) -> Result<(Self::Connection, SocketAddr), RelayError>;
}

/// TCP listener accepting relay connections.
pub struct TcpListener(TokioTcpListener);

impl TcpListener {
    pub async fn bind<A: ToSocketAddrs>(addr: A) -> Result<Self, RelayError> {
        Ok(Self(TokioTcpListener::bind(addr).await?))
    }

    pub fn local_addr(&self) -> Result<SocketAddr, RelayError> {
        Ok(self.0.local_addr()?)
    }
}

#[async_trait]
impl FrameListener for TcpListener {
    type Connection = TcpConnection;

    async fn accept(&self) -> Result<(TcpConnection, SocketAddr), RelayError> {
        let (stream, peer) = self.0.accept().await?;
        Ok((TcpConnection::new(stream, peer), peer))
    }
}
