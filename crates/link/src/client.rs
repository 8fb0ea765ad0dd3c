use crate::message::{encode_line, parse_line};
use std::io::ErrorKind;
use std::os::unix::fs::FileTypeExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use sysmatrix_core::{MatrixError, Result, SystemStats};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Display-side end of the link: accepts agents on a Unix socket and streams
/// their parsed stats.
pub struct StatsListener {
    socket: PathBuf,
    listener: UnixListener,
}

impl StatsListener {
    /// Bind `socket`, replacing a stale socket file left by a previous run.
    /// Anything else at that path is left alone and the bind fails.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn bind(socket: impl AsRef<Path>) -> Result<Self> {
        let socket = socket.as_ref().to_path_buf();
        match std::fs::symlink_metadata(&socket) {
            Ok(meta) if meta.file_type().is_socket() => std::fs::remove_file(&socket)?,
            Ok(_) => {
                return Err(MatrixError::Link(format!(
                    "'{}' exists and is not a socket",
                    socket.display()
                )));
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let listener = UnixListener::bind(&socket)
            .map_err(|e| MatrixError::Link(format!("bind '{}': {e}", socket.display())))?;

        info!("Listening for stats on {}", socket.display());
        Ok(Self { socket, listener })
    }

    pub fn socket(&self) -> &Path {
        &self.socket
    }

    /// Spawn the accept loop and forward every valid stats line on the
    /// returned channel. Malformed lines are logged and skipped.
    pub fn spawn(self) -> mpsc::Receiver<SystemStats> {
        let (tx, rx) = mpsc::channel(16);

        tokio::spawn(async move {
            loop {
                let accepted = tokio::select! {
                    _ = tx.closed() => {
                        debug!("stats receiver dropped; closing '{}'", self.socket.display());
                        return;
                    }
                    accepted = self.listener.accept() => accepted,
                };

                match accepted {
                    Ok((stream, _)) => {
                        info!("Stats agent connected");
                        tokio::spawn(read_stats(stream, tx.clone()));
                    }
                    Err(e) => {
                        error!("Accept on '{}' failed: {e}", self.socket.display());
                        tokio::time::sleep(Duration::from_secs(1)).await;
                    }
                }
            }
        });

        rx
    }
}

async fn read_stats(stream: UnixStream, tx: mpsc::Sender<SystemStats>) {
    let mut lines = BufReader::new(stream).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match parse_line(&line) {
                Ok(stats) => {
                    if tx.send(stats).await.is_err() {
                        return; // display loop gone
                    }
                }
                Err(e) => warn!("Dropping stats line: {e}"),
            },
            Ok(None) => break,
            Err(e) => {
                warn!("Stats connection error: {e}");
                break;
            }
        }
    }

    info!("Stats agent disconnected");
}

/// Agent-side end of the link. Connects lazily and reconnects after any failure.
pub struct StatsSender {
    socket: PathBuf,
    timeout: Duration,
    stream: Option<UnixStream>,
}

impl StatsSender {
    pub fn new(socket: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            socket: socket.into(),
            timeout,
            stream: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Send one stats line.
    ///
    /// On failure the connection is dropped so the next call reconnects.
    pub async fn send(&mut self, stats: SystemStats) -> Result<()> {
        let line = encode_line(stats)?;
        let result = self.write_line(&line).await;
        if result.is_err() {
            self.stream = None;
        }
        result
    }

    async fn write_line(&mut self, line: &str) -> Result<()> {
        let stream = match self.stream.take() {
            Some(stream) => stream,
            None => self.connect().await?,
        };
        let stream = self.stream.insert(stream);

        tokio::time::timeout(self.timeout, stream.write_all(line.as_bytes()))
            .await
            .map_err(|_| MatrixError::Timeout(format!("send after {:?}", self.timeout)))?
            .map_err(|e| MatrixError::Link(format!("write: {e}")))
    }

    async fn connect(&self) -> Result<UnixStream> {
        let stream = tokio::time::timeout(self.timeout, UnixStream::connect(&self.socket))
            .await
            .map_err(|_| {
                MatrixError::Timeout(format!("connect to '{}'", self.socket.display()))
            })?
            .map_err(|e| {
                MatrixError::Link(format!("connect to '{}': {e}", self.socket.display()))
            })?;
        debug!("Connected to display at {}", self.socket.display());
        Ok(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn socket_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sysmatrix-{name}-{}.sock", std::process::id()))
    }

    #[tokio::test]
    async fn sender_to_listener_round_trip() {
        let path = socket_path("roundtrip");
        let mut rx = StatsListener::bind(&path).unwrap().spawn();
        let mut sender = StatsSender::new(&path, Duration::from_secs(1));

        let stats = SystemStats { cpu: 12.5, memory: 40.0, disk: 70.5, network_rx: 0.0 };
        sender.send(stats).await.unwrap();
        assert!(sender.is_connected());

        let received = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(received, stats);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn malformed_lines_are_skipped() {
        let path = socket_path("malformed");
        let mut rx = StatsListener::bind(&path).unwrap().spawn();

        let mut stream = UnixStream::connect(&path).await.unwrap();
        stream
            .write_all(b"not json\n{\"cpu\":9.5}\n")
            .await
            .unwrap();

        let received = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(received.cpu, 9.5);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn bind_refuses_to_replace_regular_file() {
        let path = std::env::temp_dir().join(format!("sysmatrix-precious-{}.txt", std::process::id()));
        std::fs::write(&path, "user data").unwrap();

        let err = StatsListener::bind(&path).err().unwrap();
        assert!(matches!(err, MatrixError::Link(msg) if msg.contains("is not a socket")));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "user data");

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn bind_replaces_stale_socket() {
        let path = socket_path("stale");
        drop(StatsListener::bind(&path).unwrap());
        assert!(path.exists());

        let mut rx = StatsListener::bind(&path).unwrap().spawn();
        let mut sender = StatsSender::new(&path, Duration::from_secs(1));
        sender.send(SystemStats::default()).await.unwrap();
        assert!(tokio::time::timeout(Duration::from_secs(2), rx.recv()).await.unwrap().is_some());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn listener_closes_when_receiver_drops() {
        let path = socket_path("closed");
        let rx = StatsListener::bind(&path).unwrap().spawn();
        drop(rx);
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(UnixStream::connect(&path).await.is_err());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn send_without_listener_fails_and_stays_disconnected() {
        let path = socket_path("absent");
        let _ = std::fs::remove_file(&path);
        let mut sender = StatsSender::new(&path, Duration::from_millis(200));

        let err = sender.send(SystemStats::default()).await.unwrap_err();
        assert!(matches!(err, MatrixError::Link(_) | MatrixError::Timeout(_)));
        assert!(!sender.is_connected());
    }
}
