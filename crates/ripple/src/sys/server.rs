use crate::events::{AppEvent, ControlCommand, SOCKET_PATH};
use async_channel::Sender;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

/// Answer for one control line: `ok` or `error: <reason>`.
fn reply_for(line: &str) -> (Option<ControlCommand>, String) {
    match line.parse::<ControlCommand>() {
        Ok(command) => (Some(command), "ok".to_string()),
        Err(e) => (None, format!("error: {e}")),
    }
}

pub async fn run_server(tx: Sender<AppEvent>) {
    // stale socket from a previous run
    if std::fs::metadata(SOCKET_PATH).is_ok() {
        let _ = std::fs::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket: {}", e);
            return;
        }
    };

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                tokio::spawn(handle_client(stream, tx.clone()));
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

async fn handle_client(stream: UnixStream, tx: Sender<AppEvent>) {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim().is_empty() {
            continue;
        }
        let (command, reply) = reply_for(&line);
        if let Some(command) = command {
            log::debug!("Control command: {}", command);
            if tx.send(AppEvent::Control(command)).await.is_err() {
                return;
            }
        } else {
            log::warn!("Rejected control line {:?}", line);
        }
        if writer.write_all(format!("{reply}\n").as_bytes()).await.is_err() {
            return;
        }
    }
}
