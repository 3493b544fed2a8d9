//! A one-rule build description.
//!
//! Run from the directory that should receive `build.ninja`:
//!
//! ```sh
//! cargo run --example simple
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use ningen::{FileRef, Ningen, NingenResult, RuleId, RuleSpec, TargetSpec, report};

fn append(n: &mut Ningen, rule: &RuleId, src: FileRef) -> NingenResult<()> {
    let out = src.replace_extension(".out")?;
    n.build(TargetSpec::new(rule).inputs([src]).outputs([out]))?;
    Ok(())
}

fn describe() -> NingenResult<PathBuf> {
    let mut n = Ningen::new(".")?;

    let srcs = n.files(["append.sh"])?;
    let append_rule = n.rule(
        RuleSpec::new("append", "./append.sh $in $out")
            .srcs(srcs)
            .description("Appending text"),
    )?;

    let foo = n.file("foo.txt");
    append(&mut n, &append_rule, foo)?;

    n.generate(&n.options())
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
