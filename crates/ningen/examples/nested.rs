//! A build description split across directories.
//!
//! `tools` defines a rule that `subdir` uses; the top level writes the
//! manifest once everything is registered.

use std::path::PathBuf;
use std::process::ExitCode;

use ningen::{GlobRequest, Ningen, NingenResult, report};

mod tools {
    use ningen::{FileRef, NingenResult, Package, RuleId, RuleSpec, TargetSpec};

    pub fn append_rule(pkg: &mut Package<'_>) -> NingenResult<RuleId> {
        let binary = pkg.file("append.sh");
        pkg.rule(
            RuleSpec::new("append", "$binary $in $out")
                .binary(binary)
                .description("Appending text"),
        )
    }

    pub fn append(pkg: &mut Package<'_>, rule: &RuleId, src: FileRef) -> NingenResult<()> {
        let out = src.replace_extension(".out")?;
        pkg.build(TargetSpec::new(rule).inputs([src]).outputs([out]))?;
        Ok(())
    }
}

mod subdir {
    use super::tools;
    use ningen::{NingenResult, Package, RuleId};

    pub fn describe(pkg: &mut Package<'_>, append: &RuleId) -> NingenResult<()> {
        let foo = pkg.file("foo.txt");
        tools::append(pkg, append, foo)
    }
}

fn describe() -> NingenResult<PathBuf> {
    let mut n = Ningen::new(".")?;

    let append = tools::append_rule(&mut n.package("tools"))?;
    subdir::describe(&mut n.package("subdir"), &append)?;

    let inputs = n.glob(&GlobRequest::new(["**/*.rs"]).can_be_empty(true))?;
    let options = n.options().inputs(inputs);
    n.generate(&options)
}

fn main() -> ExitCode {
    if let Err(e) = ningen::logging::init_logging(1, false) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    match describe() {
        Ok(path) => {
            println!("wrote {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            report::log_error(&err);
            eprint!("{}", report::format_error(&err));
            ExitCode::from(report::exit_code(&err))
        }
    }
}
