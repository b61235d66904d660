//! Datagram-to-file logging.

use std::fs::{self, File, OpenOptions};
use std::future::Future;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Local};
use f1_telemetry::{ByteOrder, FramedWriter, PacketData, PacketKind, decode_header, decode_record};
use serde::Serialize;
use tokio::net::UdpSocket;
use tracing::{debug, info, warn};

use crate::config::RecorderConfig;
use crate::tracks::log_file_name;

/// Counters reported when logging stops.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoggerSummary {
    pub datagrams_seen: u64,
    /// Datagrams received before the first Session packet.
    pub datagrams_dropped: u64,
    pub records_written: u64,
    pub bytes_written: u64,
    pub log_file: Option<PathBuf>,
}

struct OpenLog {
    path: PathBuf,
    writer: FramedWriter<BufWriter<File>>,
}

/// Writes datagrams to a session log once the track is known.
///
/// Nothing is written until a Session packet decodes; that packet is the
/// first record of the file.
pub struct PacketLogger {
    log_dir: PathBuf,
    log: Option<OpenLog>,
    datagrams_seen: u64,
    datagrams_dropped: u64,
}

impl PacketLogger {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            log: None,
            datagrams_seen: 0,
            datagrams_dropped: 0,
        }
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.log.as_ref().map(|log| log.path.as_path())
    }

    pub fn datagrams_seen(&self) -> u64 {
        self.datagrams_seen
    }

    pub fn datagrams_dropped(&self) -> u64 {
        self.datagrams_dropped
    }

    /// Handle one datagram, stamping a new log with the local time.
    ///
    /// Returns `true` if the datagram was written.
    pub fn observe(&mut self, datagram: &[u8]) -> io::Result<bool> {
        self.observe_at(datagram, Local::now())
    }

    pub fn observe_at(&mut self, datagram: &[u8], now: DateTime<Local>) -> io::Result<bool> {
        self.datagrams_seen += 1;
        if self.log.is_none() {
            let Some(track_id) = session_track(datagram) else {
                self.datagrams_dropped += 1;
                debug!(len = datagram.len(), "waiting for session packet");
                return Ok(false);
            };
            self.log = Some(self.open(track_id, &now)?);
        }
        let Some(log) = self.log.as_mut() else {
            return Ok(false);
        };
        log.writer.write_record(datagram)?;
        Ok(true)
    }

    fn open(&self, track_id: i8, now: &DateTime<Local>) -> io::Result<OpenLog> {
        fs::create_dir_all(&self.log_dir)?;
        let path = self.log_dir.join(log_file_name(track_id, now));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        info!(path = %path.display(), track_id, "logging session");
        Ok(OpenLog {
            path,
            writer: FramedWriter::new(BufWriter::new(file)),
        })
    }

    pub fn flush(&mut self) -> io::Result<()> {
        match self.log.as_mut() {
            Some(log) => log.writer.flush(),
            None => Ok(()),
        }
    }

    /// Flush and close the log.
    pub fn finish(mut self) -> io::Result<LoggerSummary> {
        self.flush()?;
        let mut summary = LoggerSummary {
            datagrams_seen: self.datagrams_seen,
            datagrams_dropped: self.datagrams_dropped,
            ..LoggerSummary::default()
        };
        if let Some(log) = self.log.take() {
            summary.records_written = log.writer.records_written();
            summary.bytes_written = log.writer.bytes_written();
            summary.log_file = Some(log.path);
        }
        Ok(summary)
    }
}

/// Track id of a datagram that decodes as a Session packet.
fn session_track(datagram: &[u8]) -> Option<i8> {
    let header = decode_header(datagram).ok()?;
    if header.kind() != Some(PacketKind::Session) {
        return None;
    }
    match decode_record(datagram, ByteOrder::LittleEndian) {
        Ok(packet) => match packet.data {
            PacketData::Session(session) => Some(session.track_id),
            _ => None,
        },
        Err(e) => {
            debug!(error = %e, "session packet did not decode");
            None
        }
    }
}

/// Bind the configured address and log until `shutdown` completes.
///
/// # Errors
///
/// Fails if the socket cannot be bound, a receive fails or the log cannot be
/// written. The log is flushed before returning in every case.
pub async fn run_logger<S>(config: &RecorderConfig, shutdown: S) -> anyhow::Result<LoggerSummary>
where
    S: Future<Output = ()>,
{
    let socket = UdpSocket::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind UDP socket on {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, log_dir = %config.log_dir.display(), "listening for telemetry");
    log_socket(socket, config, shutdown).await
}

/// Log from an already bound socket until `shutdown` completes.
pub async fn log_socket<S>(
    socket: UdpSocket,
    config: &RecorderConfig,
    shutdown: S,
) -> anyhow::Result<LoggerSummary>
where
    S: Future<Output = ()>,
{
    let mut logger = PacketLogger::new(&config.log_dir);
    let received = receive_loop(&socket, &mut logger, config.max_datagram_bytes, shutdown).await;
    drop(socket);

    let summary = logger.finish().context("failed to flush telemetry log")?;
    received?;
    info!(
        seen = summary.datagrams_seen,
        written = summary.records_written,
        dropped = summary.datagrams_dropped,
        "logger stopped"
    );
    Ok(summary)
}

async fn receive_loop<S>(
    socket: &UdpSocket,
    logger: &mut PacketLogger,
    max_datagram_bytes: usize,
    shutdown: S,
) -> anyhow::Result<()>
where
    S: Future<Output = ()>,
{
    let mut buf = vec![0u8; max_datagram_bytes.max(1)];
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            biased;
            () = &mut shutdown => {
                debug!("shutdown requested");
                return Ok(());
            }
            received = socket.recv_from(&mut buf) => {
                let (len, peer) = received.context("failed to receive telemetry datagram")?;
                let datagram = buf.get(..len).unwrap_or_default();
                if let Err(e) = logger.observe(datagram) {
                    warn!(error = %e, %peer, "failed to write datagram");
                    return Err(e).context("failed to write telemetry log");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use f1_telemetry::fixtures::{HeaderSpec, encode_motion, encode_session};
    use f1_telemetry::packets::{MotionData, SessionData};
    use f1_telemetry::{DecodeOptions, decode_stream};
    use tempfile::TempDir;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn session(track_id: i8, frame: u32) -> Vec<u8> {
        encode_session(
            &HeaderSpec::default().for_frame(1, frame),
            &SessionData {
                track_id,
                ..SessionData::default()
            },
        )
    }

    fn motion(frame: u32) -> Vec<u8> {
        encode_motion(&HeaderSpec::default().for_frame(0, frame), &MotionData::default())
    }

    #[test]
    fn drops_until_session_then_writes_everything() -> TestResult {
        let dir = TempDir::new()?;
        let log_dir = dir.path().join("logs");
        let mut logger = PacketLogger::new(&log_dir);

        assert!(!logger.observe(&motion(1))?);
        assert!(!logger.observe(&[1, 2, 3])?);
        assert!(logger.log_path().is_none());

        assert!(logger.observe(&session(11, 2))?);
        assert!(logger.observe(&motion(2))?);
        assert!(logger.observe(&[9, 9])?);

        let summary = logger.finish()?;
        assert_eq!(summary.datagrams_seen, 5);
        assert_eq!(summary.datagrams_dropped, 2);
        assert_eq!(summary.records_written, 3);

        let path = summary.log_file.ok_or("no log file")?;
        let name = path.file_name().and_then(|n| n.to_str()).ok_or("bad name")?;
        assert!(name.starts_with("Monza_"), "{name}");
        assert!(name.ends_with(".bin"), "{name}");

        let bytes = fs::read(&path)?;
        assert_eq!(bytes.len() as u64, summary.bytes_written);
        let report = decode_stream(bytes.as_slice(), &DecodeOptions::default())?;
        assert_eq!(report.stats.records_observed, 3);
        assert_eq!(report.stats.decoded_of(PacketKind::Session), 1);
        assert_eq!(report.stats.decoded_of(PacketKind::Motion), 1);
        Ok(())
    }

    #[test]
    fn existing_log_is_appended() -> TestResult {
        let dir = TempDir::new()?;
        let now = Local::now();

        let mut first = PacketLogger::new(dir.path());
        first.observe_at(&session(5, 1), now)?;
        let first = first.finish()?;

        let mut second = PacketLogger::new(dir.path());
        second.observe_at(&session(5, 2), now)?;
        second.observe_at(&motion(2), now)?;
        let second = second.finish()?;

        assert_eq!(first.log_file, second.log_file);
        let path = second.log_file.ok_or("no log file")?;
        let report = decode_stream(fs::File::open(path)?, &DecodeOptions::default())?;
        assert_eq!(report.stats.records_observed, 3);
        Ok(())
    }

    #[test]
    fn unknown_track_gets_placeholder_name() -> TestResult {
        let dir = TempDir::new()?;
        let mut logger = PacketLogger::new(dir.path());
        logger.observe(&session(-1, 0))?;
        let name = logger
            .log_path()
            .and_then(Path::file_name)
            .and_then(|n| n.to_str())
            .ok_or("no log file")?
            .to_string();
        assert!(name.starts_with("UnknownTrack_-1_"), "{name}");
        Ok(())
    }

    #[test]
    fn finish_without_session_writes_nothing() -> TestResult {
        let dir = TempDir::new()?;
        let log_dir = dir.path().join("never");
        let mut logger = PacketLogger::new(&log_dir);
        logger.observe(&motion(0))?;
        let summary = logger.finish()?;
        assert_eq!(summary.log_file, None);
        assert_eq!(summary.records_written, 0);
        assert!(!log_dir.exists());
        Ok(())
    }

    #[tokio::test]
    async fn socket_logging_stops_on_shutdown() -> TestResult {
        let dir = TempDir::new()?;
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let config = RecorderConfig {
            bind_addr: addr,
            log_dir: dir.path().to_path_buf(),
            ..RecorderConfig::default()
        };

        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            log_socket(socket, &config, async { stop_rx.await.unwrap_or_default() }).await
        });

        let sender = UdpSocket::bind("127.0.0.1:0").await?;
        sender.send_to(&motion(0), addr).await?;
        sender.send_to(&session(3, 1), addr).await?;
        sender.send_to(&motion(1), addr).await?;
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        stop_tx.send(()).map_err(|()| "logger exited early")?;

        let summary = task.await??;
        assert_eq!(summary.datagrams_seen, 3);
        assert_eq!(summary.datagrams_dropped, 1);
        assert_eq!(summary.records_written, 2);
        let path = summary.log_file.ok_or("no log file")?;
        assert!(path.starts_with(dir.path()));
        Ok(())
    }

    #[tokio::test]
    async fn shutdown_wins_over_queued_datagrams() -> TestResult {
        let dir = TempDir::new()?;
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let sender = UdpSocket::bind("127.0.0.1:0").await?;
        sender.send_to(&session(3, 0), addr).await?;
        for frame in 0..50 {
            sender.send_to(&motion(frame), addr).await?;
        }

        let config = RecorderConfig {
            bind_addr: addr,
            log_dir: dir.path().to_path_buf(),
            ..RecorderConfig::default()
        };
        let summary = log_socket(socket, &config, std::future::ready(())).await?;
        assert_eq!(summary.datagrams_seen, 0);
        assert_eq!(summary.log_file, None);
        Ok(())
    }
}
