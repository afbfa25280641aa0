use reckon_common::config::Config;
use reckon_common::success;
use reckon_common::target::Target;
use reckon_core::operations::WhoisService;

use crate::commands::emit;
use crate::terminal::print;

pub async fn whois(target: Target, cfg: &Config, quiet: bool) -> anyhow::Result<()> {
    print::header("whois lookup", quiet);
    print::aligned_line("target", &target);

    let service = WhoisService::from_config(cfg);
    let report = service.run(&target, cfg).await;

    if let Some(source) = &report.source {
        success!("Registration data retrieved from {source}.");
        print::aligned_line("registrar", &report.record.registrar);
        print::aligned_line("expires", &report.record.expiration_date);
    }
    print::end_of_program(quiet);

    emit(&report)
}
