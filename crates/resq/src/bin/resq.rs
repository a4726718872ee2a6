use clap::{CommandFactory, FromArgMatches};

use resq::client::commands::{command_compare, command_fit, command_sum};
use resq::client::globalsettings::{GlobalSettings, load_limits};
use resq::client::output::create_output;
use resq::common::cli::{CommonOpts, RootOptions, SubCommand};
use resq::common::setup::setup_logging;

fn make_global_settings(opts: CommonOpts) -> anyhow::Result<GlobalSettings> {
    let limits = load_limits(opts.config.as_deref())?;
    log::debug!("Using resource limits {limits:?}");
    Ok(GlobalSettings::new(limits, create_output(&opts.output_mode)))
}

fn main() {
    let matches = RootOptions::command().get_matches();
    let top_opts = match RootOptions::from_arg_matches(&matches) {
        Ok(opts) => opts,
        Err(error) => error.exit(),
    };

    setup_logging(top_opts.common.debug);

    let result = make_global_settings(top_opts.common).and_then(|gsettings| {
        match top_opts.subcmd {
            SubCommand::Sum(opts) => command_sum(&gsettings, opts),
            SubCommand::Compare(opts) => command_compare(&gsettings, opts),
            SubCommand::Fit(opts) => command_fit(&gsettings, opts),
        }
    });

    if let Err(e) = result {
        log::error!("{e:?}");
        std::process::exit(1);
    }
}
