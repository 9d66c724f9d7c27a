use std::fs;
use std::time::Duration;

use glovelink_client::{ChannelClient, ChannelConfig, Endpoint};
use glovelink_record::{InputRecord, FINGER_COUNT, FLEXION_LEN, JOINTS_PER_FINGER};

use crate::cmd::SendArgs;
use crate::exit::{channel_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE};
use crate::output::{print_delivery, Delivery, OutputFormat};

pub fn run(args: SendArgs, format: OutputFormat) -> CliResult<i32> {
    let record = build_record(&args)?;
    deliver(
        args.hand,
        args.timeout.as_deref(),
        args.strict,
        &record,
        format,
    )
}

/// Open the hand's channel, write one record and report what happened.
pub(crate) fn deliver(
    hand: Endpoint,
    timeout: Option<&str>,
    strict: bool,
    record: &InputRecord,
    format: OutputFormat,
) -> CliResult<i32> {
    let mut config = ChannelConfig::from_env();
    if let Some(timeout) = timeout {
        config = config.with_connect_timeout(parse_duration(timeout)?);
    }

    let mut client = ChannelClient::open_with_config(hand, &config);
    if strict {
        if let Some(err) = client.connect_error() {
            return Err(channel_error("connect failed", err));
        }
    }

    client
        .write(record)
        .map_err(|err| channel_error("write failed", &err))?;

    let delivery = Delivery::new(
        hand,
        client.address(),
        client.is_connected(),
        client.records_written() > 0,
    );
    print_delivery(&delivery, format);
    Ok(SUCCESS)
}

fn build_record(args: &SendArgs) -> CliResult<InputRecord> {
    let mut record = base_record(args)?;

    if let Some(values) = &args.flexion {
        record.flexion = flexion_from(values)?;
    }
    if let Some(values) = &args.splay {
        record.splay = exact::<FINGER_COUNT>("--splay", values)?;
    }
    if let Some(values) = &args.joy {
        let [x, y] = exact::<2>("--joy", values)?;
        record.joy_x = x;
        record.joy_y = y;
    }
    if let Some(value) = args.trigger {
        record.trg_value = value;
    }
    for button in args.buttons.iter().flatten() {
        button.press(&mut record);
    }

    Ok(record)
}

fn base_record(args: &SendArgs) -> CliResult<InputRecord> {
    if let Some(json) = &args.json {
        return parse_record_json(json, "--json");
    }
    if let Some(path) = &args.file {
        let text = fs::read_to_string(path).map_err(|err| {
            crate::exit::io_error(&format!("failed reading {}", path.display()), err)
        })?;
        return parse_record_json(&text, &path.display().to_string());
    }
    Ok(InputRecord::zeroed())
}

fn parse_record_json(text: &str, source: &str) -> CliResult<InputRecord> {
    serde_json::from_str(text).map_err(|err| {
        CliError::new(
            DATA_INVALID,
            format!("{source} is not a valid input record: {err}"),
        )
    })
}

fn flexion_from(values: &[f32]) -> CliResult<[f32; FLEXION_LEN]> {
    match values.len() {
        FLEXION_LEN => exact::<FLEXION_LEN>("--flexion", values),
        FINGER_COUNT => {
            let mut flat = [0.0; FLEXION_LEN];
            for (joints, curl) in flat.chunks_exact_mut(JOINTS_PER_FINGER).zip(values) {
                joints.fill(*curl);
            }
            Ok(flat)
        }
        n => Err(CliError::new(
            USAGE,
            format!("--flexion takes {FLEXION_LEN} or {FINGER_COUNT} values, got {n}"),
        )),
    }
}

fn exact<const N: usize>(flag: &str, values: &[f32]) -> CliResult<[f32; N]> {
    <[f32; N]>::try_from(values).map_err(|_| {
        CliError::new(
            USAGE,
            format!("{flag} takes {N} values, got {}", values.len()),
        )
    })
}

pub(crate) fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        _ => Ok(Duration::from_secs(value)),
    }
}
