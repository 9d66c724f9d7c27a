use glovelink_record::InputRecord;

use crate::cmd::send::deliver;
use crate::cmd::RelaxArgs;
use crate::exit::CliResult;
use crate::output::OutputFormat;

pub fn run(args: RelaxArgs, format: OutputFormat) -> CliResult<i32> {
    deliver(
        args.hand,
        args.timeout.as_deref(),
        args.strict,
        &InputRecord::zeroed(),
        format,
    )
}
