use colored::*;
use reckon_common::config::Config;
use reckon_common::success;
use reckon_common::target::Target;
use reckon_core::operations::AvailabilityService;
use tracing::warn;

use crate::commands::emit;
use crate::terminal::print;

pub async fn preengagement(target: Target, cfg: &Config, quiet: bool) -> anyhow::Result<()> {
    print::header("pre-engagement checks", quiet);
    print::aligned_line("target", &target);

    let service = AvailabilityService::from_config(cfg);
    let report = service.run(&target, cfg).await;

    if report.is_available {
        success!("{target} is reachable ({:.1} ms).", report.response_time_ms);
    } else {
        warn!("{target} did not answer any reachability probe.");
    }
    for (rule, state) in &report.firewall_rules {
        print::aligned_line(rule, state.bold());
    }
    print::aligned_line("methods", report.methods_used.join(", "));
    print::end_of_program(quiet);

    emit(&report)
}
