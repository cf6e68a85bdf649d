mod command;

pub use command::Command;

use crate::session::UploadSession;
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

/// Reads commands from stdin until `quit` or end of input.
pub async fn run(mut session: UploadSession) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    write_out(&mut stdout, &session.render()).await?;
    write_out(&mut stdout, "> ").await?;

    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => {
                write_out(&mut stdout, "> ").await?;
                continue;
            }
            Err(e) => {
                write_out(&mut stdout, &format!("{e}\n> ")).await?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => write_out(&mut stdout, &format!("{}\n", command::HELP)).await?,
            command => {
                if let Err(e) = apply(&mut session, command, &mut stdout).await {
                    warn!("Command failed: {:#}", e);
                    write_out(&mut stdout, &format!("{e}\n")).await?;
                }
                write_out(&mut stdout, &session.render()).await?;
            }
        }

        write_out(&mut stdout, "> ").await?;
    }

    info!("Session closed");
    Ok(())
}

async fn apply(
    session: &mut UploadSession,
    command: Command,
    stdout: &mut tokio::io::Stdout,
) -> Result<()> {
    match command {
        Command::Add(paths) => {
            session.add_paths(&paths).await;
        }
        Command::Remove(index) => {
            session.remove_pending(index);
        }
        Command::Upload(provider) => {
            let count = session.pending_names().len();
            write_out(
                stdout,
                &format!("Uploading {} file(s) to {}...\n", count, provider.title()),
            )
            .await?;
            session.submit(provider).await?;
        }
        Command::Show(provider) => {
            session.toggle_show(provider).await;
        }
        Command::List | Command::Help | Command::Quit => {}
    }
    Ok(())
}

async fn write_out(stdout: &mut tokio::io::Stdout, text: &str) -> Result<()> {
    stdout.write_all(text.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}
