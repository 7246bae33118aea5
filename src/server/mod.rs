//! Local web studio.
//!
//! - [`http`] - Request parsing and response writing
//! - [`routes`] - The studio page and its JSON API
//!
//! [`Studio::run`] accepts connections on a blocking listener and serves
//! each one on its own thread.

pub mod http;
pub mod routes;

pub use http::{read_request, write_response, HttpRequest, HttpResponse};
pub use routes::{handle, locate_file, StudioState, INDEX_HTML};

use std::io::BufReader;
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::error::Result;
use crate::shell::open_browser;

/// Delay before the browser is opened, so the listener is ready.
pub const BROWSER_DELAY: Duration = Duration::from_millis(1500);

const READ_TIMEOUT: Duration = Duration::from_secs(30);

/// A bound studio server.
pub struct Studio {
    listener: TcpListener,
    state: Arc<StudioState>,
}

impl Studio {
    /// Bind to `host:port`.
    pub fn bind(host: &str, port: u16, state: StudioState) -> Result<Self> {
        let listener = TcpListener::bind((host, port))?;
        Ok(Self {
            listener,
            state: Arc::new(state),
        })
    }

    /// Address actually bound (useful with port 0 in tests).
    pub fn url(&self) -> Result<String> {
        let addr = self.listener.local_addr()?;
        Ok(format!("http://{}", addr))
    }

    /// Open the browser on a background thread after [`BROWSER_DELAY`].
    pub fn open_browser_later(&self) -> Result<()> {
        let url = self.url()?;
        thread::spawn(move || {
            thread::sleep(BROWSER_DELAY);
            if let Err(e) = open_browser(&url) {
                tracing::warn!("Could not open browser: {}", e);
            }
        });
        Ok(())
    }

    /// Serve until the process exits.
    pub fn run(self) -> Result<()> {
        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    let state = Arc::clone(&self.state);
                    thread::spawn(move || serve_connection(&state, stream));
                }
                Err(e) => tracing::warn!("Accept failed: {}", e),
            }
        }
        Ok(())
    }
}

fn serve_connection(state: &StudioState, stream: TcpStream) {
    if let Err(e) = stream.set_read_timeout(Some(READ_TIMEOUT)) {
        tracing::debug!("Could not set read timeout: {}", e);
    }

    let mut reader = BufReader::new(&stream);
    let response = match read_request(&mut reader) {
        None => return,
        Some(Ok(request)) => handle(state, &request),
        Some(Err(e)) => HttpResponse::error(400, &e.to_string()),
    };

    let mut writer = &stream;
    if let Err(e) = write_response(&mut writer, &response) {
        tracing::debug!("Client went away: {}", e);
    }
}
