use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Feed every non-empty line from stdin to `on_line` until EOF
pub async fn watch_stdin<F>(on_line: F) -> Result<(), anyhow::Error>
where
    F: FnMut(String) + Send + 'static,
{
    watch_lines(BufReader::new(tokio::io::stdin()), on_line).await
}

pub async fn watch_lines<R, F>(reader: R, mut on_line: F) -> Result<(), anyhow::Error>
where
    R: AsyncBufRead + Unpin,
    F: FnMut(String),
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if !line.is_empty() {
            on_line(line.to_string());
        }
    }

    tracing::debug!("Input stream closed");
    Ok(())
}
