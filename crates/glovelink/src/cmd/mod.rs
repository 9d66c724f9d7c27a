use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use glovelink_client::Endpoint;
use glovelink_record::InputRecord;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod layout;
pub mod monitor;
pub mod relax;
pub mod send;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send a single input record to a hand's channel.
    Send(SendArgs),
    /// Send the relaxed record (open hand, nothing pressed).
    Relax(RelaxArgs),
    /// Stand in for the driver and print the records clients send.
    Monitor(MonitorArgs),
    /// Print the record wire layout.
    Layout(LayoutArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Send(args) => send::run(args, format),
        Command::Relax(args) => relax::run(args, format),
        Command::Monitor(args) => monitor::run(args, format),
        Command::Layout(args) => layout::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Hand to send to (left or right).
    pub hand: Endpoint,
    /// Connection timeout (e.g. 5s, 500ms). Default: $GLOVELINK_CONNECT_TIMEOUT_MS or 5s.
    #[arg(long)]
    pub timeout: Option<String>,
    /// Start from a JSON record (camelCase field names, missing fields zero).
    #[arg(long, conflicts_with = "file")]
    pub json: Option<String>,
    /// Start from a JSON record read from a file.
    #[arg(long, conflicts_with = "json")]
    pub file: Option<PathBuf>,
    /// Flexion: 20 values (finger-major), or 5 values applied to every joint of each finger.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub flexion: Option<Vec<f32>>,
    /// Splay: 5 values, thumb to pinky.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub splay: Option<Vec<f32>>,
    /// Joystick position as X,Y.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub joy: Option<Vec<f32>>,
    /// Analog trigger value.
    #[arg(long, allow_hyphen_values = true)]
    pub trigger: Option<f32>,
    /// Buttons to press (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub buttons: Option<Vec<Button>>,
    /// Fail when the channel is not connected instead of dropping the record.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct RelaxArgs {
    /// Hand to relax (left or right).
    pub hand: Endpoint,
    /// Connection timeout (e.g. 5s, 500ms). Default: $GLOVELINK_CONNECT_TIMEOUT_MS or 5s.
    #[arg(long)]
    pub timeout: Option<String>,
    /// Fail when the channel is not connected instead of dropping the record.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct MonitorArgs {
    /// Hand whose channel to serve (left or right).
    pub hand: Endpoint,
    /// Exit after printing N records (at least 1).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub count: Option<u64>,
}

#[derive(Args, Debug, Default)]
pub struct LayoutArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Button {
    Joy,
    Trigger,
    A,
    B,
    Grab,
    Pinch,
    Menu,
    Calibrate,
}

impl Button {
    pub fn press(self, record: &mut InputRecord) {
        let flag = match self {
            Button::Joy => &mut record.joy_button,
            Button::Trigger => &mut record.trg_button,
            Button::A => &mut record.a_button,
            Button::B => &mut record.b_button,
            Button::Grab => &mut record.grab,
            Button::Pinch => &mut record.pinch,
            Button::Menu => &mut record.menu,
            Button::Calibrate => &mut record.calibrate,
        };
        *flag = true;
    }
}
