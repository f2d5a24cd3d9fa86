// sig-probe: connect to a signaling endpoint, optionally send, then poll
use clap::Parser;
use sig_client::{format_chunk, SignalClient};
use sig_transport::TransportConfig;
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sig-probe")]
#[command(about = "Probe a signaling endpoint over plain TCP", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    /// Host name or IPv4 address
    #[arg(short = 'a', long, default_value = "127.0.0.1")]
    host: String,

    #[arg(short, long, default_value_t = 9000)]
    port: u16,

    /// Receive timeout in milliseconds (default: $SIG_TRANSPORT_READ_TIMEOUT_MS or 3000)
    #[arg(short, long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Text to send once connected
    #[arg(short, long, value_name = "TEXT")]
    send: Option<String>,

    /// Number of receive attempts before exiting
    #[arg(short = 'n', long, default_value_t = 1)]
    polls: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut config = TransportConfig::from_env();
    if let Some(ms) = cli.timeout_ms {
        config = config.with_recv_timeout(Duration::from_millis(ms));
    }

    let mut client = match SignalClient::connect(&cli.host, cli.port, config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if let Some(text) = cli.send {
        if let Err(e) = client.send_all(text.as_bytes()) {
            eprintln!("Send failed: {}", e);
            process::exit(1);
        }
    }

    for _ in 0..cli.polls {
        match client.poll() {
            Ok(Some([])) => {
                println!("Connection closed");
                break;
            }
            Ok(Some(data)) => println!("{}", format_chunk(data)),
            Ok(None) => println!("(timeout, no data)"),
            Err(e) => {
                eprintln!("Receive failed: {}", e);
                process::exit(1);
            }
        }
    }

    client.close();
}
