//! Control UART task
//!
//! Reads newline-terminated requests, applies them through the
//! [`ControlInterface`] and writes one reply line per request.

use defmt::*;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embedded_io_async::{Read, Write};

use quadstep_core::control::{ControlInterface, WriteOutcome};
use quadstep_protocol::{LineParser, Request, Response};

use crate::channels::{CONTROL, STOP, STOPPED};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Control task - serves reads, writes and the stop command
#[embassy_executor::task]
pub async fn control_task(mut rx: BufferedUartRx, mut tx: BufferedUartTx, name: &'static str) {
    info!("Control task started for {}", name);

    let control = ControlInterface::new(&CONTROL, name);
    let mut session = Session {
        control,
        stopped: false,
    };
    let mut parser = LineParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(line)) => session.handle(&line, &mut tx).await,
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            warn!("Dropped control line: {}", e.as_str());
                            reply(&mut tx, Response::Error(e)).await;
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

struct Session {
    control: ControlInterface<'static>,
    /// Sequencer has acknowledged a stop
    stopped: bool,
}

impl Session {
    async fn handle(&mut self, line: &str, tx: &mut BufferedUartTx) {
        match Request::parse(line) {
            Ok(Request::Read(attribute)) => {
                let value = self.control.read(attribute);
                reply(tx, Response::Value(attribute, &value)).await;
            }
            Ok(Request::Write(attribute, raw)) => {
                match self.control.write(attribute, raw) {
                    WriteOutcome::Accepted => debug!("{} <- {}", attribute.key(), raw),
                    WriteOutcome::Rejected(reason) => {
                        warn!("Ignored {}={}: {:?}", attribute.key(), raw, reason)
                    }
                }
                // Reply with what is in effect now
                let value = self.control.read(attribute);
                reply(tx, Response::Value(attribute, &value)).await;
            }
            Ok(Request::Stop) => {
                if !self.stopped {
                    info!("Stop requested");
                    STOP.signal(());
                    let ticks = STOPPED.wait().await;
                    info!("Stop acknowledged after {} ticks", ticks);
                    self.stopped = true;
                }
                reply(tx, Response::Stopped).await;
            }
            Err(e) => {
                warn!("Bad request '{}': {}", line, e.as_str());
                reply(tx, Response::Error(e)).await;
            }
        }
    }
}

/// Encode and send one reply line
async fn reply(tx: &mut BufferedUartTx, response: Response<'_>) {
    match response.encode() {
        Ok(line) => {
            if let Err(e) = tx.write_all(line.as_bytes()).await {
                warn!("UART write error: {:?}", e);
            }
        }
        Err(e) => {
            warn!("Failed to encode reply: {}", e.as_str());
        }
    }
}
