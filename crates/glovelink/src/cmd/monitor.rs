#[cfg(unix)]
use std::io::{ErrorKind, Read};
#[cfg(unix)]
use std::path::Path;

#[cfg(unix)]
use glovelink_client::ChannelConfig;
#[cfg(unix)]
use glovelink_record::{decode, RECORD_SIZE};
#[cfg(unix)]
use glovelink_transport::UnixDomainSocket;
#[cfg(unix)]
use tracing::{debug, info};

use crate::cmd::MonitorArgs;
use crate::exit::{CliError, CliResult};
#[cfg(unix)]
use crate::exit::{io_error, record_error, transport_error, INTERNAL, SUCCESS};
#[cfg(not(unix))]
use crate::exit::USAGE;
use crate::output::OutputFormat;
#[cfg(unix)]
use crate::output::print_record;

#[cfg(unix)]
pub fn run(args: MonitorArgs, format: OutputFormat) -> CliResult<i32> {
    let address = ChannelConfig::from_env().address_for(args.hand);
    let listener =
        UnixDomainSocket::bind(&address).map_err(|err| transport_error("bind failed", &err))?;
    install_ctrlc_handler(listener.path())?;
    info!(hand = %args.hand, address = %address.display(), "monitor listening");

    let mut seq = 0u64;
    loop {
        let mut stream = listener
            .accept()
            .map_err(|err| transport_error("accept failed", &err))?;
        debug!(hand = %args.hand, "client connected");

        let mut buf = [0u8; RECORD_SIZE];
        loop {
            match stream.read_exact(&mut buf) {
                Ok(()) => {}
                Err(err) if err.kind() == ErrorKind::UnexpectedEof => {
                    debug!(hand = %args.hand, "client disconnected");
                    break;
                }
                Err(err) => return Err(io_error("receive failed", err)),
            }

            let record = decode(&buf).map_err(|err| record_error("decode failed", &err))?;
            seq += 1;
            print_record(args.hand, seq, &record, format);

            if args.count.is_some_and(|count| seq >= count) {
                return Ok(SUCCESS);
            }
        }
    }
}

#[cfg(not(unix))]
pub fn run(args: MonitorArgs, _format: OutputFormat) -> CliResult<i32> {
    Err(CliError::new(
        USAGE,
        format!("monitor {} needs Unix domain sockets", args.hand),
    ))
}

#[cfg(unix)]
fn install_ctrlc_handler(path: &Path) -> CliResult<()> {
    let path = path.to_path_buf();
    ctrlc::set_handler(move || {
        // accept/read restart after the signal, so leave from the handler.
        let _ = std::fs::remove_file(&path);
        std::process::exit(130);
    })
    .map_err(|err| CliError::new(INTERNAL, format!("signal handler setup failed: {err}")))
}
