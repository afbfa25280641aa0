use reckon_common::config::Config;
use reckon_common::success;
use reckon_common::target::Target;
use reckon_core::operations::PathsService;

use crate::commands::emit;
use crate::terminal::print;

pub async fn paths(target: Target, cfg: &Config, quiet: bool) -> anyhow::Result<()> {
    print::header("path brute force", quiet);
    print::aligned_line("target", &target);

    let service = PathsService::from_config(cfg)?;
    let result = service.run(&target, cfg).await;

    if result.count() > 0 {
        success!("{} paths matched on {target}.", result.count());
    }
    print::end_of_program(quiet);

    emit(&result)
}
