use reckon_common::config::Config;
use reckon_common::success;
use reckon_common::target::Target;
use reckon_core::indicators::INDICATOR_SOURCE;
use reckon_core::operations::AmassService;
use tracing::warn;

use crate::commands::emit;
use crate::terminal::print;

pub async fn amass(target: Target, cfg: &Config, quiet: bool) -> anyhow::Result<()> {
    print::header("amass enumeration", quiet);
    print::aligned_line("target", &target);
    print::aligned_line("mode", cfg.mode);

    let service = AmassService::from_config(cfg);
    let report = service.run(&target, cfg).await;
    print::aligned_line("command", &report.command);

    let summary = report.result.provenance().summary();
    if summary.contains_key(INDICATOR_SOURCE) {
        warn!("amass produced nothing, reporting indicator hosts instead.");
    } else {
        success!("{} subdomains found for {target}.", report.result.count());
    }
    print::aligned_line("sources", print::tally(&summary));
    print::end_of_program(quiet);

    emit(&report)
}
