/*!
 * Command line configuration
 * Every option can also be supplied through the environment.
 */

use std::ffi::CString;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::http::HeaderValue;
use clap::{Parser, Subcommand};

use crate::report::Format;
use crate::server::DEFAULT_PORT;

#[derive(Debug, Parser)]
#[command(name = "srbid-reader")]
#[command(about = "Reads a Serbian eID card and prints or serves its data as JSON")]
#[command(version)]
pub struct Args {
    /// Smart card reader name; empty selects the driver's default reader
    #[arg(long, env = "SRBID_READER", default_value = "", global = true)]
    pub reader: String,

    /// Console output format
    #[arg(short, long, env = "SRBID_FORMAT", value_enum, default_value_t = Format::All)]
    pub format: Format,

    #[command(subcommand)]
    pub mode: Option<Mode>,
}

#[derive(Debug, Subcommand)]
pub enum Mode {
    /// Serve card reads over HTTP: every POST performs one read
    Http {
        /// Address to bind
        #[arg(long, env = "SRBID_BIND", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
        bind: IpAddr,

        /// Port to listen on
        #[arg(long, env = "SRBID_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Browser origin allowed to read card data cross-origin; repeatable.
        /// No origin is allowed unless listed.
        #[arg(
            long = "allow-origin",
            value_name = "ORIGIN",
            env = "SRBID_ALLOW_ORIGIN",
            value_delimiter = ',',
            value_parser = parse_origin
        )]
        allow_origins: Vec<HeaderValue>,
    },
}

fn parse_origin(origin: &str) -> Result<HeaderValue, String> {
    if origin == "*" || origin.is_empty() {
        return Err("an explicit origin such as https://app.example is required".to_string());
    }
    HeaderValue::from_str(origin).map_err(|err| err.to_string())
}

impl Args {
    /// Reader name as passed to the driver.
    pub fn reader_id(&self) -> Result<CString, String> {
        CString::new(self.reader.as_str())
            .map_err(|_| format!("reader name {:?} contains a NUL byte", self.reader))
    }
}

impl Mode {
    pub fn listen_addr(&self) -> SocketAddr {
        match self {
            Mode::Http { bind, port, .. } => SocketAddr::new(*bind, *port),
        }
    }

    pub fn allow_origins(&self) -> &[HeaderValue] {
        match self {
            Mode::Http { allow_origins, .. } => allow_origins,
        }
    }
}
