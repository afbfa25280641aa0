use reckon_common::config::Config;
use reckon_common::success;
use reckon_common::target::Target;
use reckon_core::operations::SubdomainService;

use crate::commands::emit;
use crate::terminal::print;

pub async fn recon(target: Target, cfg: &Config, quiet: bool) -> anyhow::Result<()> {
    print::header("subdomain enumeration", quiet);
    print::aligned_line("target", &target);
    print::aligned_line("mode", cfg.mode);
    print::aligned_line("accepted codes", &cfg.accepted_codes);

    let service = SubdomainService::from_config(cfg);
    let result = service.run(&target, cfg).await;

    if result.count() == 0 {
        tracing::warn!("No live subdomains found for {target}.");
    } else {
        success!("{} live subdomains found for {target}.", result.count());
    }
    print::aligned_line("sources", print::tally(&result.provenance().summary()));
    print::end_of_program(quiet);

    emit(&result)
}
