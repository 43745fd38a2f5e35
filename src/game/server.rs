//! HTTP host for the game engine.
//!
//! A deliberately small HTTP/1.1 front: accept loop on a Tokio listener, one
//! task per connection, one request per connection. Only the request path
//! and the `Cookie` header matter to the engine; everything else is read and
//! discarded. The engine itself never produces an error status — the only
//! non-200 here is a 404 for paths with no configured level, which is a host
//! concern.
//!
//! The cookie is carried raw: the whole `Cookie` header value is the state
//! token and the `Set-Cookie` value is emitted the same way.

use anyhow::Result;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use super::handler::{self, CONTENT_TYPE};
use super::level::LevelDescriptor;
use crate::config::Config;
use crate::logutil::client_preview;

/// The running game server: configuration plus the level table resolved at
/// startup. The table is immutable for the server's lifetime; request tasks
/// share it read-only.
pub struct GameServer {
    config: Config,
    levels: Arc<HashMap<String, LevelDescriptor>>,
}

/// The parts of a request the engine cares about.
#[derive(Debug, PartialEq, Eq)]
struct RawRequest {
    path: String,
    cookie: Option<String>,
}

impl GameServer {
    /// Resolve levels from the configuration and build a server ready to run.
    pub async fn new(config: Config) -> Result<Self> {
        let levels = config.resolve_levels().await?;
        info!(
            "resolved {} level(s), entry route {}",
            levels.len(),
            config.server.entry_route
        );
        Ok(GameServer {
            config,
            levels: Arc::new(levels),
        })
    }

    /// Accept connections until the process is stopped.
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.server.bind).await?;
        info!("listening on http://{}", self.config.server.bind);
        loop {
            let (stream, peer) = listener.accept().await?;
            let levels = Arc::clone(&self.levels);
            let entry_route = self.config.server.entry_route.clone();
            tokio::spawn(async move {
                if let Err(e) = serve_connection(stream, &levels, &entry_route).await {
                    debug!("connection from {} ended early: {}", peer, e);
                }
            });
        }
    }

    /// Route table accessor for status output and tests.
    pub fn levels(&self) -> &HashMap<String, LevelDescriptor> {
        &self.levels
    }
}

/// Read one request, answer it, close.
async fn serve_connection(
    stream: TcpStream,
    levels: &HashMap<String, LevelDescriptor>,
    entry_route: &str,
) -> Result<()> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;
    let path = match parse_request_line(&request_line) {
        Some(path) => path,
        None => {
            warn!(
                "unparsable request line: {}",
                client_preview(request_line.trim_end())
            );
            let mut stream = reader.into_inner();
            write_response(&mut stream, "400 Bad Request", None, "").await?;
            return Ok(());
        }
    };

    let mut cookie = None;
    loop {
        let mut line = String::new();
        let n = reader.read_line(&mut line).await?;
        if n == 0 || line == "\r\n" || line == "\n" {
            break;
        }
        if let Some((name, value)) = parse_header(&line) {
            if name.eq_ignore_ascii_case("cookie") {
                cookie = Some(value.to_string());
            }
        }
    }

    let mut stream = reader.into_inner();
    match levels.get(&path) {
        Some(level) => {
            let resp = handler::handle(&path, cookie.as_deref(), level, entry_route);
            debug!("200 {} cookie_out={}", path, resp.cookie);
            write_response(&mut stream, "200 OK", Some(&resp.cookie), &resp.body).await?;
        }
        None => {
            debug!("404 {}", path);
            write_response(
                &mut stream,
                "404 Not Found",
                None,
                "<h2>No such place on this path.</h2>",
            )
            .await?;
        }
    }
    Ok(())
}

/// Pull the path out of an HTTP/1.x request line, dropping any query string.
/// Method is irrelevant to the engine.
fn parse_request_line(line: &str) -> Option<String> {
    let mut parts = line.split_whitespace();
    let _method = parts.next()?;
    let target = parts.next()?;
    let path = target.split('?').next().unwrap_or(target);
    if path.starts_with('/') {
        Some(path.to_string())
    } else {
        None
    }
}

/// Split a `Name: value` header line. Returns `None` for anything malformed.
fn parse_header(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.split_once(':')?;
    Some((name.trim(), value.trim()))
}

async fn write_response(
    stream: &mut TcpStream,
    status: &str,
    set_cookie: Option<&str>,
    body: &str,
) -> Result<()> {
    let mut head = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        status,
        CONTENT_TYPE,
        body.len()
    );
    if let Some(cookie) = set_cookie {
        head.push_str("Set-Cookie: ");
        head.push_str(cookie);
        head.push_str("\r\n");
    }
    head.push_str("\r\n");
    stream.write_all(head.as_bytes()).await?;
    stream.write_all(body.as_bytes()).await?;
    stream.flush().await?;
    Ok(())
}
