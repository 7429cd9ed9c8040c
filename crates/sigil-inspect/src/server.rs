use std::{
    io::{self, BufRead, BufReader, Write},
    net::{SocketAddr, TcpListener, TcpStream},
    sync::{Arc, Condvar, Mutex, PoisonError},
    thread,
};

use log::{info, warn};
use miette::Diagnostic;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InspectError {
    #[error("inspector i/o failed")]
    #[diagnostic(code(sigil::inspect::io))]
    Io(#[from] io::Error),
}

/// Blocking rendezvous server for a dumped unit.
///
/// `serve` parks the calling thread until a client requests `/continue`;
/// the intended use is to pause a compilation mid-pass, look at the tree in
/// a browser, and release it. Strictly single-shot presentation, nothing is
/// scheduled or pooled.
pub struct Server {
    listener: TcpListener,
}

impl Server {
    pub fn bind(addr: &str) -> Result<Self, InspectError> {
        let listener = TcpListener::bind(addr)?;
        Ok(Self { listener })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, InspectError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves `payload` and blocks until a client requests `/continue`.
    pub fn serve(self, payload: &Value) -> Result<(), InspectError> {
        let addr = self.local_addr()?;
        info!("inspector listening on http://{addr}, GET /continue to resume");

        let gate = Arc::new((Mutex::new(false), Condvar::new()));
        let release = Arc::clone(&gate);
        let body = payload.to_string();
        let listener = self.listener;

        thread::spawn(move || {
            for stream in listener.incoming() {
                let stream = match stream {
                    Ok(stream) => stream,
                    Err(err) => {
                        warn!("connection failed: {err}");
                        continue;
                    }
                };
                match handle(stream, &body) {
                    Ok(true) => {
                        let (flag, cvar) = &*release;
                        *flag.lock().unwrap_or_else(PoisonError::into_inner) = true;
                        cvar.notify_all();
                        break;
                    }
                    Ok(false) => {}
                    Err(err) => warn!("request failed: {err}"),
                }
            }
        });

        let (flag, cvar) = &*gate;
        let mut released = flag.lock().unwrap_or_else(PoisonError::into_inner);
        while !*released {
            released = cvar
                .wait(released)
                .unwrap_or_else(PoisonError::into_inner);
        }
        Ok(())
    }
}

/// Answers one request; returns whether it was the release request.
fn handle(mut stream: TcpStream, body: &str) -> io::Result<bool> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let path = line.split_whitespace().nth(1).unwrap_or("/").to_owned();

    // Drain the headers; requests carry no payload we care about.
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 || header == "\r\n" || header == "\n" {
            break;
        }
    }

    let (status, content_type, payload, release) = match path.as_str() {
        "/" => ("200 OK", "text/html; charset=utf-8", PAGE, false),
        "/ir.json" => ("200 OK", "application/json", body, false),
        "/continue" => ("200 OK", "text/plain", "resuming\n", true),
        _ => ("404 Not Found", "text/plain", "not found\n", false),
    };

    write!(
        stream,
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
        payload.len()
    )?;
    stream.flush()?;
    Ok(release)
}

const PAGE: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>sigil inspector</title></head>
<body>
<h1>sigil inspector</h1>
<p><button onclick="fetch('/continue').then(() => document.body.innerHTML = 'resumed')">continue compilation</button></p>
<pre id="tree">loading...</pre>
<script>
fetch('/ir.json')
  .then(r => r.json())
  .then(doc => { document.getElementById('tree').textContent = JSON.stringify(doc, null, 2); });
</script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Read;

    fn get(addr: SocketAddr, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).unwrap();
        write!(stream, "GET {path} HTTP/1.1\r\nHost: localhost\r\n\r\n").unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).unwrap();
        response
    }

    #[test]
    fn serves_the_dump_and_releases_on_continue() {
        let server = Server::bind("127.0.0.1:0").unwrap();
        let addr = server.local_addr().unwrap();
        let payload = json!({ "unit": "demo" });

        let parked = thread::spawn(move || server.serve(&payload));

        let doc = get(addr, "/ir.json");
        assert!(doc.contains("application/json"));
        assert!(doc.contains(r#""unit":"demo""#));

        let page = get(addr, "/");
        assert!(page.contains("sigil inspector"));

        let missing = get(addr, "/nope");
        assert!(missing.contains("404"));

        // The serving thread stays parked until the release request.
        assert!(!parked.is_finished());
        get(addr, "/continue");
        parked.join().unwrap().unwrap();
    }
}
