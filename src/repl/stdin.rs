//! Blocking line reader
//!
//! Reads a [`BufRead`] source on its own OS thread and forwards raw lines
//! over a channel, so the async side can stop without waiting on a read.

use std::io::{self, BufRead, ErrorKind};
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Lines buffered between the reader thread and the REPL.
const LINE_BUFFER: usize = 16;

/// Spawns a thread that sends each line of `reader`, newline included, until
/// EOF, a read error, or the receiver is dropped.
///
/// The thread is detached. If it is still blocked in a read when the process
/// exits, it is simply torn down with it.
pub fn spawn_line_reader<R>(reader: R) -> io::Result<mpsc::Receiver<Vec<u8>>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(LINE_BUFFER);
    thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || read_lines(reader, tx))?;
    Ok(rx)
}

fn read_lines<R: BufRead>(mut reader: R, tx: mpsc::Sender<Vec<u8>>) {
    loop {
        let mut line = Vec::new();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => break,
            Ok(_) => {
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => {
                warn!(error = %err, "Failed to read input");
                break;
            }
        }
    }
    debug!("Line reader finished");
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[tokio::test]
    async fn test_forwards_raw_lines_until_eof() {
        let mut rx = spawn_line_reader(Cursor::new(b"map\n\xff\xfe\nexit".to_vec())).unwrap();

        assert_eq!(rx.recv().await, Some(b"map\n".to_vec()));
        assert_eq!(rx.recv().await, Some(b"\xff\xfe\n".to_vec()));
        // Final line without a newline is still delivered
        assert_eq!(rx.recv().await, Some(b"exit".to_vec()));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_stops_when_receiver_dropped() {
        let rx = spawn_line_reader(Cursor::new(b"a\nb\nc\n".repeat(100))).unwrap();
        drop(rx);
        // Nothing to assert beyond not hanging; the thread exits on its own
    }
}
