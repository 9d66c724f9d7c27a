use std::io::IsTerminal;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use glovelink_client::Endpoint;
use glovelink_record::layout::FieldLayout;
use glovelink_record::{InputRecord, FINGER_COUNT, RECORD_SIZE};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

const FINGER_NAMES: [&str; FINGER_COUNT] = ["thumb", "index", "middle", "ring", "pinky"];
const BUTTON_NAMES: [&str; 8] = [
    "joy", "trigger", "a", "b", "grab", "pinch", "menu", "calibrate",
];

#[derive(Serialize)]
struct RecordOutput<'a> {
    hand: &'static str,
    seq: u64,
    timestamp: String,
    record: &'a InputRecord,
}

/// Print one record received from a client.
pub fn print_record(hand: Endpoint, seq: u64, record: &InputRecord, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = RecordOutput {
                hand: hand.hand(),
                seq,
                timestamp: now_unix_seconds(),
                record,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"]);
            table.add_row(vec!["hand".to_string(), format!("{hand} #{seq}")]);
            for (name, joints) in FINGER_NAMES.iter().zip(record.flexion_matrix()) {
                table.add_row(vec![format!("flexion.{name}"), join_floats(&joints)]);
            }
            table.add_row(vec!["splay".to_string(), join_floats(&record.splay)]);
            table.add_row(vec![
                "joystick".to_string(),
                format!("{:.3} {:.3}", record.joy_x, record.joy_y),
            ]);
            table.add_row(vec!["trigger".to_string(), format!("{:.3}", record.trg_value)]);
            table.add_row(vec!["buttons".to_string(), pressed_buttons(record)]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "{hand} #{seq} flexion=[{}] splay=[{}] joy=({:.3}, {:.3}) trigger={:.3} buttons={}",
                join_floats(&record.flexion),
                join_floats(&record.splay),
                record.joy_x,
                record.joy_y,
                record.trg_value,
                pressed_buttons(record)
            );
        }
    }
}

#[derive(Serialize)]
pub struct Delivery<'a> {
    pub hand: &'static str,
    pub address: &'a Path,
    pub connected: bool,
    pub delivered: bool,
    pub bytes: usize,
}

impl<'a> Delivery<'a> {
    pub fn new(hand: Endpoint, address: &'a Path, connected: bool, delivered: bool) -> Self {
        Self {
            hand: hand.hand(),
            address,
            connected,
            delivered,
            bytes: if delivered { RECORD_SIZE } else { 0 },
        }
    }
}

/// Print the outcome of a send.
pub fn print_delivery(delivery: &Delivery<'_>, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(delivery).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["HAND", "ADDRESS", "CONNECTED", "DELIVERED", "BYTES"])
                .add_row(vec![
                    delivery.hand.to_string(),
                    delivery.address.display().to_string(),
                    delivery.connected.to_string(),
                    delivery.delivered.to_string(),
                    delivery.bytes.to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            if delivery.delivered {
                println!(
                    "sent {} bytes to {} ({})",
                    delivery.bytes,
                    delivery.hand,
                    delivery.address.display()
                );
            } else {
                println!(
                    "dropped record for {}: channel not connected ({})",
                    delivery.hand,
                    delivery.address.display()
                );
            }
        }
    }
}

#[derive(Serialize)]
struct LayoutOutput<'a> {
    record_size: usize,
    fields: Vec<FieldOutput<'a>>,
}

#[derive(Serialize)]
struct FieldOutput<'a> {
    name: &'a str,
    offset: usize,
    size: usize,
}

/// Print the wire layout.
pub fn print_layout(fields: &[FieldLayout], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = LayoutOutput {
                record_size: RECORD_SIZE,
                fields: fields
                    .iter()
                    .map(|f| FieldOutput {
                        name: f.name,
                        offset: f.offset,
                        size: f.size,
                    })
                    .collect(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "OFFSET", "SIZE"]);
            for f in fields {
                table.add_row(vec![
                    f.name.to_string(),
                    f.offset.to_string(),
                    f.size.to_string(),
                ]);
            }
            println!("{table}");
            println!("record size: {RECORD_SIZE} bytes");
        }
        OutputFormat::Pretty => {
            for f in fields {
                println!("{:>4} {:>3} {}", f.offset, f.size, f.name);
            }
            println!("{RECORD_SIZE:>4}     (end)");
        }
    }
}

fn join_floats(values: &[f32]) -> String {
    values
        .iter()
        .map(|v| format!("{v:.3}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn pressed_buttons(record: &InputRecord) -> String {
    let pressed: Vec<&str> = BUTTON_NAMES
        .iter()
        .zip(record.buttons().as_array())
        .filter_map(|(name, down)| down.then_some(*name))
        .collect();
    if pressed.is_empty() {
        "-".to_string()
    } else {
        pressed.join(",")
    }
}

fn now_unix_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}
